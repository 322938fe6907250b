use crate::{paper_status::PaperStatus, Id};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::papers::Model)] // OpenAPI schema
#[sea_orm(schema_name = "parea", table_name = "papers")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub event_id: Id,
    pub title: String,
    /// Derived from `title` once at creation
    #[serde(skip_deserializing)]
    #[sea_orm(unique)]
    pub slug: String,
    pub abstract_text: String,
    /// Path of the uploaded paper file, relative to the media root
    pub file_path: String,
    #[serde(default)]
    pub status: PaperStatus,
    /// True exactly while status is accepted or rejected
    #[serde(default)]
    pub locked: bool,
    #[serde(skip_deserializing)]
    pub submitted_by: Id,
    #[serde(skip_deserializing)]
    pub decided_by: Option<Id>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub decided_at: Option<DateTimeWithTimeZone>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
    #[sea_orm(has_many = "super::authors::Entity")]
    Authors,
    #[sea_orm(has_many = "super::reviewers::Entity")]
    Reviewers,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Authors.def()
    }
}

impl Related<super::reviewers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewers.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
