use crate::error::Error;
use crate::{profiles, sex::Sex, users};
use sea_orm::DatabaseConnection;

pub use entity_api::user::{
    find_by_email, find_by_id, find_by_username, AuthSession, Backend, Credentials,
};

/// Registers a new user. The profile row is created in the same
/// transaction; a user never exists without one.
pub async fn register(
    db: &DatabaseConnection,
    user_model: users::Model,
    first_name: String,
    last_name: String,
    sex: Sex,
) -> Result<(users::Model, profiles::Model), Error> {
    Ok(entity_api::user::create_with_profile(db, user_model, first_name, last_name, sex).await?)
}
