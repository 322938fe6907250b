use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::user::{RegisterParams, UpdateProfileParams};
use crate::{AppState, Error};
use domain::{profile as ProfileApi, user as UserApi, Id};
use log::*;
use service::config::ApiVersion;

/// POST register a new user account. Open to unauthenticated callers;
/// the profile row is created alongside the account. Staff status can
/// never be claimed through registration.
#[utoipa::path(
    post,
    path = "/users",
    params(ApiVersion),
    request_body = RegisterParams,
    responses(
        (status = 201, description = "Successfully registered a new user", body = domain::users::Model),
        (status = 405, description = "Method not allowed"),
        (status = 422, description = "Unprocessable Entity")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<RegisterParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Register new user: {}", params.user.email);

    let mut user_model = params.user;
    user_model.is_staff = false;

    let (user, _profile) = UserApi::register(
        app_state.db_conn_ref(),
        user_model,
        params.first_name,
        params.last_name,
        params.sex,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), user)))
}

/// GET a user's public profile page data by username.
#[utoipa::path(
    get,
    path = "/users/{username}",
    params(
        ApiVersion,
        ("username" = String, Path, description = "Username whose profile to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the user's profile", body = domain::profile::UserProfile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET profile of user: {username}");

    let user_profile = ProfileApi::find_by_username(app_state.db_conn_ref(), &username).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user_profile)))
}

/// PUT update a user's profile fields. The policy layer restricts this
/// to the profile's own user or staff.
#[utoipa::path(
    put,
    path = "/users/{id}/profile",
    params(
        ApiVersion,
        ("id" = String, Path, description = "User id whose profile to update")
    ),
    request_body = UpdateProfileParams,
    responses(
        (status = 200, description = "Successfully updated the profile", body = domain::profiles::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_profile(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(user_id): Path<Id>,
    Json(params): Json<UpdateProfileParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update profile of user: {user_id}");

    let profile = ProfileApi::update(
        app_state.db_conn_ref(),
        user_id,
        params.first_name,
        params.last_name,
        params.sex,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), profile)))
}
