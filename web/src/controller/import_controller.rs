use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use domain::import as ImportApi;
use log::*;
use service::config::ApiVersion;

/// POST import users from the configured fixtures path. Staff only;
/// users that already exist (matched by email) are skipped so the
/// import can be re-run safely.
#[utoipa::path(
    post,
    path = "/imports/users",
    params(ApiVersion),
    responses(
        (status = 200, description = "User import finished", body = domain::import::ImportOutcome),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Internal Server Error")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn users(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    info!("POST Import users requested by user {}", user.id);

    let outcome = ImportApi::import_users(app_state.db_conn_ref(), &app_state.config).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), outcome)))
}

/// POST import events from the configured fixtures path. Staff only;
/// events that already exist (matched by name) are skipped.
#[utoipa::path(
    post,
    path = "/imports/events",
    params(ApiVersion),
    responses(
        (status = 200, description = "Event import finished", body = domain::import::ImportOutcome),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Internal Server Error")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn events(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    info!("POST Import events requested by user {}", user.id);

    let outcome = ImportApi::import_events(app_state.db_conn_ref(), &app_state.config).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), outcome)))
}
