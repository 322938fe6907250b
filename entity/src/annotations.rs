use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A free-form comment anchored to a span of rendered paper content,
/// keyed by the URI of the page being annotated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::annotations::Model)] // OpenAPI schema
#[sea_orm(schema_name = "parea", table_name = "annotations")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub text: String,
    pub quote: String,
    pub uri: String,
    #[serde(skip_deserializing)]
    pub user_id: Id,
    #[serde(skip_deserializing)]
    pub user_username: String,
    #[serde(default = "default_consumer")]
    pub consumer: String,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub updated_at: DateTimeWithTimeZone,
}

pub fn default_schema_version() -> String {
    "v1.0".to_string()
}

pub fn default_consumer() -> String {
    "parea".to_string()
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ranges::Entity")]
    Ranges,
}

impl Related<super::ranges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ranges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
