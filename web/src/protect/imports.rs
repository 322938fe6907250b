use crate::{extractors::authenticated_user::AuthenticatedUser, protect, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use domain::policy::Action;

/// Bulk fixture imports are reserved for staff.
pub(crate) async fn run(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(&app_state, &user, Action::ImportFixtures, request, next).await
}
