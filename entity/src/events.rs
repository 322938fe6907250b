use crate::{event_status::EventStatus, Id};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::events::Model)] // OpenAPI schema
#[sea_orm(schema_name = "parea", table_name = "events")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[sea_orm(unique)]
    pub name: String,
    /// Derived from `name` once at creation, immutable afterwards
    #[serde(skip_deserializing)]
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(unique)]
    pub acronym: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::papers::Entity")]
    Papers,
    #[sea_orm(has_many = "super::chairs::Entity")]
    Chairs,
    #[sea_orm(has_many = "super::pc_members::Entity")]
    PcMembers,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Papers.def()
    }
}

impl Related<super::chairs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chairs.def()
    }
}

impl Related<super::pc_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PcMembers.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
