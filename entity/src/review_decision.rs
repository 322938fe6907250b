use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single reviewer's recommendation for a paper.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "review_decision")]
pub enum ReviewDecision {
    #[sea_orm(string_value = "not_sure")]
    #[default]
    NotSure,
    #[sea_orm(string_value = "accept")]
    Accept,
    #[sea_orm(string_value = "reject")]
    Reject,
}

impl std::fmt::Display for ReviewDecision {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewDecision::NotSure => write!(fmt, "not_sure"),
            ReviewDecision::Accept => write!(fmt, "accept"),
            ReviewDecision::Reject => write!(fmt, "reject"),
        }
    }
}
