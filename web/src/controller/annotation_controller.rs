use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::annotation::{CreateParams, IndexParams};
use crate::{AppState, Error};
use domain::{annotation as AnnotationApi, annotations::Model, Id};
use log::*;
use service::config::ApiVersion;

/// GET all annotations anchored to one page URI, oldest first.
#[utoipa::path(
    get,
    path = "/annotations",
    params(
        ApiVersion,
        IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved annotations for a URI", body = [domain::annotation::AnnotationWithRanges]),
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
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Annotations for uri: {}", params.uri);

    let annotations = AnnotationApi::find_by_uri(app_state.db_conn_ref(), &params.uri).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), annotations)))
}

/// GET a particular annotation with its ranges.
#[utoipa::path(
    get,
    path = "/annotations/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Annotation id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific annotation by its id", body = domain::annotation::AnnotationWithRanges),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Annotation not found"),
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
    debug!("GET Annotation by id: {id}");

    let annotation = AnnotationApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), annotation)))
}

/// POST create an annotation and its anchoring ranges in one
/// transaction. The author is always the authenticated user.
#[utoipa::path(
    post,
    path = "/annotations",
    params(ApiVersion),
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created a new annotation", body = domain::annotation::AnnotationWithRanges),
        (status = 401, description = "Unauthorized"),
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
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create Annotation from: {params:?}");

    let annotation =
        AnnotationApi::create(app_state.db_conn_ref(), params.annotation, params.ranges, &user)
            .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        annotation,
    )))
}

/// PUT update an annotation's text fields. Only the author may edit
/// their own annotation; ranges are left untouched.
#[utoipa::path(
    put,
    path = "/annotations/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Annotation id to update")
    ),
    request_body = domain::annotations::Model,
    responses(
        (status = 200, description = "Successfully updated the annotation", body = domain::annotation::AnnotationWithRanges),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Annotation not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(annotation_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Annotation with id: {id}");

    let existing = AnnotationApi::find_by_id(app_state.db_conn_ref(), id).await?;
    if existing.annotation.user_id != user.id && !user.is_staff {
        return Err(domain::error::Error::forbidden("not the author of this annotation").into());
    }

    let annotation = AnnotationApi::update(app_state.db_conn_ref(), id, annotation_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), annotation)))
}
