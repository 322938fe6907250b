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
use domain::{reviewer as ReviewerApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET the reviewers assigned to a Paper.
#[utoipa::path(
    get,
    path = "/papers/{id}/reviewers",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id whose reviewers to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Paper's reviewers", body = [domain::users::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Paper not found"),
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
    Path(paper_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET reviewers of Paper: {paper_id}");

    let reviewers = ReviewerApi::find_users_by_paper(app_state.db_conn_ref(), paper_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), reviewers)))
}

/// POST assign a user as a reviewer of a Paper. Idempotent; the
/// paper's status is re-derived since its review counts change.
#[utoipa::path(
    post,
    path = "/papers/{id}/reviewers",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to assign the reviewer to")
    ),
    request_body = MembershipParams,
    responses(
        (status = 201, description = "Successfully assigned the reviewer", body = domain::reviewers::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Paper not found"),
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
    Path(paper_id): Path<Id>,
    Json(params): Json<MembershipParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST assign reviewer {} to Paper {paper_id}", params.user_id);

    let membership = ReviewerApi::add(app_state.db_conn_ref(), paper_id, params.user_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        membership,
    )))
}

/// DELETE a reviewer assignment. Any review the reviewer already
/// submitted is removed with it.
#[utoipa::path(
    delete,
    path = "/papers/{id}/reviewers/{user_id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to withdraw the reviewer from"),
        ("user_id" = String, Path, description = "User id of the reviewer to withdraw")
    ),
    responses(
        (status = 204, description = "Successfully withdrew the reviewer"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Paper not found"),
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
    Path((paper_id, user_id)): Path<(Id, Id)>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE reviewer {user_id} from Paper {paper_id}");

    ReviewerApi::remove(app_state.db_conn_ref(), paper_id, user_id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
