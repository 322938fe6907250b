use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a conference event. Transitions happen only via
/// explicit chair/staff actions, never automatically.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
pub enum EventStatus {
    #[sea_orm(string_value = "open")]
    #[default]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Open => write!(fmt, "open"),
            EventStatus::Closed => write!(fmt, "closed"),
        }
    }
}
