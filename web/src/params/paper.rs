use serde::Deserialize;
use utoipa::ToSchema;

use domain::paper_status::PaperStatus;

/// Request body for the chair decision endpoint. Accepted values are
/// `accepted`, `rejected` and `under_review` (which reopens a decided
/// paper); the awaiting_decision state is derived, never requested.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct StatusParams {
    pub(crate) status: PaperStatus,
}
