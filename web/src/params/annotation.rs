use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{annotations, ranges};

/// Query parameters for listing annotations: all annotations anchored
/// to one page URI.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    pub(crate) uri: String,
}

/// Request body for creating an annotation: the annotation fields plus
/// its anchoring ranges, persisted together.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateParams {
    #[serde(flatten)]
    pub(crate) annotation: annotations::Model,
    #[serde(default)]
    pub(crate) ranges: Vec<ranges::Model>,
}
