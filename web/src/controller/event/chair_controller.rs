use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::membership::MembershipParams;
use crate::{AppState, Error};
use domain::{chair as ChairApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET the users chairing an Event.
#[utoipa::path(
    get,
    path = "/events/{id}/chairs",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id whose chairs to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Event's chairs", body = [domain::users::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(event_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET chairs of Event: {event_id}");

    let chairs = ChairApi::find_users_by_event(app_state.db_conn_ref(), event_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), chairs)))
}

/// POST make a user a chair of an Event. Idempotent.
#[utoipa::path(
    post,
    path = "/events/{id}/chairs",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id to add the chair to")
    ),
    request_body = MembershipParams,
    responses(
        (status = 201, description = "Successfully added the chair", body = domain::chairs::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(event_id): Path<Id>,
    Json(params): Json<MembershipParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST add chair {} to Event {event_id}", params.user_id);

    let membership = ChairApi::add(app_state.db_conn_ref(), event_id, params.user_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        membership,
    )))
}

/// DELETE a user's chair membership of an Event. Removing a non-member
/// succeeds without effect.
#[utoipa::path(
    delete,
    path = "/events/{id}/chairs/{user_id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id to remove the chair from"),
        ("user_id" = String, Path, description = "User id of the chair to remove")
    ),
    responses(
        (status = 204, description = "Successfully removed the chair"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path((event_id, user_id)): Path<(Id, Id)>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE chair {user_id} from Event {event_id}");

    ChairApi::remove(app_state.db_conn_ref(), event_id, user_id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
