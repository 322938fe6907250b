use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use domain::{review as ReviewApi, reviews::Model, Id};
use log::*;
use service::config::ApiVersion;

/// GET the reviews submitted for a Paper.
#[utoipa::path(
    get,
    path = "/papers/{id}/reviews",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id whose reviews to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Paper's Reviews", body = [domain::reviews::Model]),
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
    Path(paper_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Reviews of Paper: {paper_id}");

    let reviews = ReviewApi::find_by_paper(app_state.db_conn_ref(), paper_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), reviews)))
}

/// GET a particular Review by its id.
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Review id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Review by its id", body = domain::reviews::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Review not found"),
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
    debug!("GET Review by id: {id}");

    let review = ReviewApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), review)))
}

/// POST submit a Review of a Paper. The reviewer is always the
/// authenticated user and must be assigned to the paper; one review
/// per reviewer per paper.
#[utoipa::path(
    post,
    path = "/papers/{id}/reviews",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Paper id to review")
    ),
    request_body = domain::reviews::Model,
    responses(
        (status = 201, description = "Successfully submitted a Review", body = domain::reviews::Model),
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
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(paper_id): Path<Id>,
    Json(review_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Submit Review of Paper {paper_id} by user {}", user.id);

    let review = ReviewApi::submit(app_state.db_conn_ref(), review_model, paper_id, user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), review)))
}

/// DELETE a Review. Reviewers may withdraw only their own review;
/// staff may remove any.
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Review id to delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted the Review"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Review not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Review with id: {id}");

    let review = ReviewApi::find_by_id(app_state.db_conn_ref(), id).await?;
    if review.reviewer_id != user.id && !user.is_staff {
        return Err(domain::error::Error::forbidden("not the author of this review").into());
    }

    ReviewApi::delete(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
