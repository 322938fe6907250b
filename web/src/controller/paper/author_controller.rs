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
use domain::{author as AuthorApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET the authors of a Paper.
#[utoipa::path(
    get,
    path = "/papers/{id}/authors",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id whose authors to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Paper's authors", body = [domain::users::Model]),
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
    debug!("GET authors of Paper: {paper_id}");

    let authors = AuthorApi::find_users_by_paper(app_state.db_conn_ref(), paper_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), authors)))
}

/// POST record a user as an author of a Paper. Idempotent.
#[utoipa::path(
    post,
    path = "/papers/{id}/authors",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to add the author to")
    ),
    request_body = MembershipParams,
    responses(
        (status = 201, description = "Successfully added the author", body = domain::authors::Model),
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
    debug!("POST add author {} to Paper {paper_id}", params.user_id);

    let membership = AuthorApi::add(app_state.db_conn_ref(), paper_id, params.user_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        membership,
    )))
}

/// DELETE an author membership of a Paper. Removing a non-author
/// succeeds without effect.
#[utoipa::path(
    delete,
    path = "/papers/{id}/authors/{user_id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to remove the author from"),
        ("user_id" = String, Path, description = "User id of the author to remove")
    ),
    responses(
        (status = 204, description = "Successfully removed the author"),
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
    debug!("DELETE author {user_id} from Paper {paper_id}");

    AuthorApi::remove(app_state.db_conn_ref(), paper_id, user_id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
