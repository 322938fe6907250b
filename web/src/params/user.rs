use serde::Deserialize;
use utoipa::ToSchema;

use domain::{sex::Sex, users};

/// Request body for user registration: the account fields plus the
/// profile fields created alongside it.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RegisterParams {
    #[serde(flatten)]
    pub(crate) user: users::Model,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) sex: Sex,
}

/// Request body for editing a profile.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileParams {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub sex: Sex,
}
