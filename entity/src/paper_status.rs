use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review workflow state of a submitted paper.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "paper_status")]
pub enum PaperStatus {
    /// Reviews are still outstanding
    #[sea_orm(string_value = "under_review")]
    #[default]
    UnderReview,
    /// Every assigned reviewer has submitted a review
    #[sea_orm(string_value = "awaiting_decision")]
    AwaitingDecision,
    /// Chair accepted the paper; record is locked
    #[sea_orm(string_value = "accepted")]
    Accepted,
    /// Chair rejected the paper; record is locked
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl PaperStatus {
    /// Whether a chair decision has been recorded for this status.
    pub fn is_decided(&self) -> bool {
        matches!(self, PaperStatus::Accepted | PaperStatus::Rejected)
    }
}

impl std::fmt::Display for PaperStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaperStatus::UnderReview => write!(fmt, "under_review"),
            PaperStatus::AwaitingDecision => write!(fmt, "awaiting_decision"),
            PaperStatus::Accepted => write!(fmt, "accepted"),
            PaperStatus::Rejected => write!(fmt, "rejected"),
        }
    }
}
