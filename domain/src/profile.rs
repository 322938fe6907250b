use crate::error::Error;
use crate::{profiles, sex::Sex, users, Id};
use entity_api::{profile, user};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

pub use entity_api::profile::find_by_user_id;

/// A user's public profile page data.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = domain::profile::UserProfile)]
pub struct UserProfile {
    pub user: users::Model,
    pub profile: profiles::Model,
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<UserProfile, Error> {
    let user = user::find_by_username(db, username).await?;
    let profile = profile::find_by_user_id(db, user.id).await?;
    Ok(UserProfile { user, profile })
}

/// Updates a user's profile fields. The policy layer restricts this to
/// the profile's own user (or staff).
pub async fn update(
    db: &DatabaseConnection,
    user_id: Id,
    first_name: String,
    last_name: String,
    sex: Sex,
) -> Result<profiles::Model, Error> {
    Ok(profile::update(db, user_id, first_name, last_name, sex).await?)
}
