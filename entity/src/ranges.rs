use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Character-offset span one annotation is anchored to. An annotation
/// may carry several ranges.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::ranges::Model)] // OpenAPI schema
#[sea_orm(schema_name = "parea", table_name = "ranges")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    #[serde(skip_deserializing)]
    pub annotation_id: Id,
    /// XPath-like reference to the node the span starts in
    pub start: String,
    /// XPath-like reference to the node the span ends in
    pub end: String,
    pub start_offset: i32,
    pub end_offset: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::annotations::Entity",
        from = "Column::AnnotationId",
        to = "super::annotations::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Annotations,
}

impl Related<super::annotations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Annotations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
