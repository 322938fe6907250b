use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use domain::{archive, event as EventApi, event_status::EventStatus, events::Model, Id};
use log::*;
use service::config::ApiVersion;

/// GET all events, open and closed alike, oldest first.
#[utoipa::path(
    get,
    path = "/events",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Events", body = [domain::events::Model]),
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
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Events");

    let events = EventApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), events)))
}

/// GET a particular Event with its chairs, PC members, papers and reviews.
#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Event by its id", body = domain::event::EventDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
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
    debug!("GET Event by id: {id}");

    let detail = EventApi::find_detail(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), detail)))
}

/// POST create a new Event. Any authenticated user may create one; the
/// slug is derived from the name server-side and the event opens in
/// the open state.
#[utoipa::path(
    post,
    path = "/events",
    params(ApiVersion),
    request_body = domain::events::Model,
    responses(
        (status = 201, description = "Successfully Created a New Event", body = domain::events::Model),
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
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(event_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Event from: {event_model:?}");

    let event = EventApi::create(app_state.db_conn_ref(), event_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), event)))
}

/// PUT update an Event's mutable fields. The slug, acronym and
/// lifecycle status never change through this endpoint.
#[utoipa::path(
    put,
    path = "/events/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id to update")
    ),
    request_body = domain::events::Model,
    responses(
        (status = 200, description = "Successfully updated the Event", body = domain::events::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(event_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Event with id: {id}");

    let event = EventApi::update(app_state.db_conn_ref(), id, event_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), event)))
}

/// PUT close an Event. Writes the archival snapshot and flips the
/// lifecycle status in one transaction.
#[utoipa::path(
    put,
    path = "/events/{id}/close",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id to close")
    ),
    responses(
        (status = 200, description = "Successfully closed the Event", body = domain::events::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn close(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    info!("PUT Close Event {id} requested by user {}", user.id);

    let event = EventApi::close(app_state.db_conn_ref(), &app_state.config, id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), event)))
}

/// PUT reopen a closed Event (staff only).
#[utoipa::path(
    put,
    path = "/events/{id}/reopen",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id to reopen")
    ),
    responses(
        (status = 200, description = "Successfully reopened the Event", body = domain::events::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reopen(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    info!("PUT Reopen Event {id} requested by user {}", user.id);

    let event = EventApi::reopen(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), event)))
}

/// GET download the pre-built archive tarball for an Event, named
/// after its acronym. A missing archive maps to 404 rather than an
/// unhandled error.
#[utoipa::path(
    get,
    path = "/events/{id}/archive",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Event id whose archive to download")
    ),
    responses(
        (status = 200, description = "Event archive tarball", content_type = "application/x-tar"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event or archive not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn download_archive(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Event archive for event id: {id}");

    let event = EventApi::find_by_id(app_state.db_conn_ref(), id).await?;
    let bytes = archive::load_archive(&app_state.config, &event.acronym).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/x-tar".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                archive::archive_file_name(&event.acronym)
            ),
        ),
    ];

    Ok((StatusCode::OK, headers, bytes))
}

/// GET events filtered to one lifecycle status, used by the event list
/// page to split open and closed conferences.
#[utoipa::path(
    get,
    path = "/events/status/{status}",
    params(
        ApiVersion,
        ("status" = String, Path, description = "Lifecycle status to filter by (open or closed)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved Events by status", body = [domain::events::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index_by_status(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(status): Path<EventStatus>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Events with status: {status}");

    let events = EventApi::find_by_status(app_state.db_conn_ref(), status).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), events)))
}
