use crate::{extractors::authenticated_user::AuthenticatedUser, protect, AppState};
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::IntoResponse,
};
use domain::{policy::Action, Id};

/// Chair-of-event or staff may edit an event.
pub(crate) async fn update(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(event_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(&app_state, &user, Action::UpdateEvent(event_id), request, next).await
}

/// Chair-of-event or staff may close an event.
pub(crate) async fn close(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(event_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(&app_state, &user, Action::CloseEvent(event_id), request, next).await
}

/// Reopening a closed event is reserved for staff.
pub(crate) async fn reopen(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(event_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(
        &app_state,
        &user,
        Action::ReopenEvent(event_id),
        request,
        next,
    )
    .await
}

/// Chair-of-event or staff may download the event archive.
pub(crate) async fn download(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(event_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(
        &app_state,
        &user,
        Action::DownloadArchive(event_id),
        request,
        next,
    )
    .await
}

/// Adding and removing chairs and PC members is an event-role
/// administration action.
pub(crate) async fn manage_roles(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(event_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(
        &app_state,
        &user,
        Action::ManageEventRoles(event_id),
        request,
        next,
    )
    .await
}

/// Same rule as [`manage_roles`], for the removal routes that carry
/// the member's user id as a second path segment.
pub(crate) async fn manage_roles_with_member(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((event_id, _user_id)): Path<(Id, Id)>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(
        &app_state,
        &user,
        Action::ManageEventRoles(event_id),
        request,
        next,
    )
    .await
}
