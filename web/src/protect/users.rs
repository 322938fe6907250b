use crate::{extractors::authenticated_user::AuthenticatedUser, protect, AppState};
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::IntoResponse,
};
use domain::{policy::Action, Id};

/// Profile edits are restricted to the profile's own user (or staff).
pub(crate) async fn update_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(user_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    protect::authorize(&app_state, &user, Action::EditProfile(user_id), request, next).await
}
