//! This module provides protection mechanisms for various resources in the web application.
//!
//! Each submodule pairs a route with the policy action it requires and
//! delegates the actual allow/deny decision to `domain::policy`, so the
//! authorization rules themselves live in one testable place outside
//! any handler.

pub(crate) mod events;
pub(crate) mod imports;
pub(crate) mod papers;
pub(crate) mod users;

use crate::AppState;
use axum::{extract::Request, http::StatusCode, middleware::Next, response::IntoResponse};
use domain::{policy, users::Model};
use log::*;

/// Evaluates one policy action and either forwards the request or
/// aborts it with 403 FORBIDDEN. Policy evaluation failures (e.g. the
/// referenced resource is gone) surface as 404.
pub(crate) async fn authorize(
    app_state: &AppState,
    authenticated_user: &Model,
    action: policy::Action,
    request: Request,
    next: Next,
) -> axum::response::Response {
    match policy::evaluate(app_state.db_conn_ref(), authenticated_user, action).await {
        Ok(true) => next.run(request).await,
        Ok(false) => (StatusCode::FORBIDDEN, "FORBIDDEN").into_response(),
        Err(e) => {
            error!("Policy evaluation failed for {action:?}: {e:?}");
            (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
        }
    }
}
