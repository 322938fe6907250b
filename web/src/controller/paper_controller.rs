use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::paper::StatusParams;
use crate::{AppState, Error};
use domain::{paper as PaperApi, paper_status::PaperStatus, papers::Model, Id};
use log::*;
use service::config::ApiVersion;

/// GET the papers submitted to an Event.
#[utoipa::path(
    get,
    path = "/events/{id}/papers",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id whose papers to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Event's Papers", body = [domain::papers::Model]),
        (status = 401, description = "Unauthorized"),
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
    debug!("GET Papers of Event: {event_id}");

    let papers = PaperApi::find_by_event(app_state.db_conn_ref(), event_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), papers)))
}

/// GET a particular Paper by its id.
#[utoipa::path(
    get,
    path = "/papers/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Paper by its id", body = domain::papers::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Paper not found"),
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
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Paper by id: {id}");

    let paper = PaperApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), paper)))
}

/// POST submit a new Paper to the Event named in the body. The
/// submitter is always the authenticated user, regardless of what the
/// body claims, and submissions to closed events are rejected.
#[utoipa::path(
    post,
    path = "/papers",
    params(ApiVersion),
    request_body = domain::papers::Model,
    responses(
        (status = 201, description = "Successfully submitted a new Paper", body = domain::papers::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(paper_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Submit a new Paper: {paper_model:?}");

    let paper = PaperApi::create(app_state.db_conn_ref(), paper_model, user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), paper)))
}

/// PUT record or reverse a chair decision on a Paper. An accepted or
/// rejected status records the decision and locks the paper; the
/// under_review status reopens a decided paper.
#[utoipa::path(
    put,
    path = "/papers/{id}/status",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to decide")
    ),
    request_body = StatusParams,
    responses(
        (status = 200, description = "Successfully updated the Paper's status", body = domain::papers::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Paper not found"),
        (status = 405, description = "Method not allowed"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_status(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<StatusParams>,
) -> Result<impl IntoResponse, Error> {
    info!(
        "PUT Paper {id} status to {:?} by user {}",
        params.status, user.id
    );

    let paper = if params.status.is_decided() {
        PaperApi::decide(app_state.db_conn_ref(), id, params.status, user.id).await?
    } else if params.status == PaperStatus::UnderReview {
        PaperApi::reopen(app_state.db_conn_ref(), id).await?
    } else {
        // awaiting_decision is derived from review counts, never set directly
        return Err(domain::error::Error::invalid().into());
    };

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), paper)))
}
