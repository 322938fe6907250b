use crate::{extractors::authenticated_user::AuthenticatedUser, protect, AppState};
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::IntoResponse,
};
use domain::{policy::Action, Id};

/// Accepting, rejecting or reopening a decision requires chairing the
/// paper's event (or staff).
pub(crate) async fn decide(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(paper_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(&app_state, &user, Action::DecidePaper(paper_id), request, next).await
}

/// Adding and removing reviewers and authors is a paper-role
/// administration action.
pub(crate) async fn manage_roles(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(paper_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(
        &app_state,
        &user,
        Action::ManagePaperRoles(paper_id),
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
    Path((paper_id, _user_id)): Path<(Id, Id)>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(
        &app_state,
        &user,
        Action::ManagePaperRoles(paper_id),
        request,
        next,
    )
    .await
}
