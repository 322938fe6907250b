use crate::{
    controller::health_check_controller, middleware::auth::require_auth, params, protect, AppState,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::controller::{
    annotation_controller, event, event_controller, import_controller, paper, paper_controller,
    review_controller, user_controller, user_session_controller,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Parea Platform API"
        ),
        paths(
            annotation_controller::index,
            annotation_controller::read,
            annotation_controller::create,
            annotation_controller::update,
            event_controller::index,
            event_controller::index_by_status,
            event_controller::read,
            event_controller::create,
            event_controller::update,
            event_controller::close,
            event_controller::reopen,
            event_controller::download_archive,
            event::chair_controller::index,
            event::chair_controller::create,
            event::chair_controller::delete,
            event::pc_member_controller::index,
            event::pc_member_controller::create,
            event::pc_member_controller::delete,
            import_controller::users,
            import_controller::events,
            paper_controller::index,
            paper_controller::read,
            paper_controller::create,
            paper_controller::update_status,
            paper::author_controller::index,
            paper::author_controller::create,
            paper::author_controller::delete,
            paper::reviewer_controller::index,
            paper::reviewer_controller::create,
            paper::reviewer_controller::delete,
            review_controller::index,
            review_controller::read,
            review_controller::create,
            review_controller::delete,
            user_controller::create,
            user_controller::read,
            user_controller::update_profile,
            user_session_controller::login,
            user_session_controller::delete,
        ),
        components(
            schemas(
                domain::annotations::Model,
                domain::annotation::AnnotationWithRanges,
                domain::authors::Model,
                domain::chairs::Model,
                domain::event::EventDetail,
                domain::events::Model,
                domain::import::ImportOutcome,
                domain::papers::Model,
                domain::pc_members::Model,
                domain::profile::UserProfile,
                domain::profiles::Model,
                domain::ranges::Model,
                domain::reviewers::Model,
                domain::reviews::Model,
                domain::user::Credentials,
                domain::users::Model,
                params::annotation::CreateParams,
                params::membership::MembershipParams,
                params::paper::StatusParams,
                params::user::RegisterParams,
                params::user::UpdateProfileParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "parea_platform", description = "Parea Conference Management API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value returned from successful login via Set-Cookie header",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(annotation_routes(app_state.clone()))
        .merge(event_routes(app_state.clone()))
        .merge(event_chair_routes(app_state.clone()))
        .merge(event_pc_member_routes(app_state.clone()))
        .merge(health_routes())
        .merge(import_routes(app_state.clone()))
        .merge(paper_routes(app_state.clone()))
        .merge(paper_author_routes(app_state.clone()))
        .merge(paper_reviewer_routes(app_state.clone()))
        .merge(review_routes(app_state.clone()))
        .merge(user_routes(app_state.clone()))
        .merge(user_session_routes())
        .merge(user_session_protected_routes(app_state.clone()))
        // **** FIXME: protect the OpenAPI web UI
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes())
}

fn annotation_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/annotations", get(annotation_controller::index))
        .route("/annotations", post(annotation_controller::create))
        .route("/annotations/:id", get(annotation_controller::read))
        .route("/annotations/:id", put(annotation_controller::update))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn event_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/events", get(event_controller::index))
        .route("/events", post(event_controller::create))
        .route(
            "/events/status/:status",
            get(event_controller::index_by_status),
        )
        .route("/events/:id", get(event_controller::read))
        .merge(
            // PUT /events/:id
            Router::new()
                .route("/events/:id", put(event_controller::update))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::update,
                )),
        )
        .merge(
            // PUT /events/:id/close
            Router::new()
                .route("/events/:id/close", put(event_controller::close))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::close,
                )),
        )
        .merge(
            // PUT /events/:id/reopen
            Router::new()
                .route("/events/:id/reopen", put(event_controller::reopen))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::reopen,
                )),
        )
        .merge(
            // GET /events/:id/archive
            Router::new()
                .route(
                    "/events/:id/archive",
                    get(event_controller::download_archive),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::download,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn event_chair_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/events/:id/chairs", get(event::chair_controller::index))
        .merge(
            // POST /events/:id/chairs
            Router::new()
                .route("/events/:id/chairs", post(event::chair_controller::create))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::manage_roles,
                )),
        )
        .merge(
            // DELETE /events/:id/chairs/:user_id
            Router::new()
                .route(
                    "/events/:id/chairs/:user_id",
                    delete(event::chair_controller::delete),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::manage_roles_with_member,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn event_pc_member_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/events/:id/pc_members",
            get(event::pc_member_controller::index),
        )
        .merge(
            // POST /events/:id/pc_members
            Router::new()
                .route(
                    "/events/:id/pc_members",
                    post(event::pc_member_controller::create),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::manage_roles,
                )),
        )
        .merge(
            // DELETE /events/:id/pc_members/:user_id
            Router::new()
                .route(
                    "/events/:id/pc_members/:user_id",
                    delete(event::pc_member_controller::delete),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::events::manage_roles_with_member,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn import_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/imports/users", post(import_controller::users))
        .route("/imports/events", post(import_controller::events))
        .route_layer(from_fn_with_state(app_state.clone(), protect::imports::run))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn paper_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/events/:id/papers", get(paper_controller::index))
        .route("/papers", post(paper_controller::create))
        .route("/papers/:id", get(paper_controller::read))
        .merge(
            // PUT /papers/:id/status
            Router::new()
                .route("/papers/:id/status", put(paper_controller::update_status))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::papers::decide,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn paper_author_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/papers/:id/authors", get(paper::author_controller::index))
        .merge(
            // POST /papers/:id/authors
            Router::new()
                .route("/papers/:id/authors", post(paper::author_controller::create))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::papers::manage_roles,
                )),
        )
        .merge(
            // DELETE /papers/:id/authors/:user_id
            Router::new()
                .route(
                    "/papers/:id/authors/:user_id",
                    delete(paper::author_controller::delete),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::papers::manage_roles_with_member,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn paper_reviewer_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/papers/:id/reviewers",
            get(paper::reviewer_controller::index),
        )
        .merge(
            // POST /papers/:id/reviewers
            Router::new()
                .route(
                    "/papers/:id/reviewers",
                    post(paper::reviewer_controller::create),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::papers::manage_roles,
                )),
        )
        .merge(
            // DELETE /papers/:id/reviewers/:user_id
            Router::new()
                .route(
                    "/papers/:id/reviewers/:user_id",
                    delete(paper::reviewer_controller::delete),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::papers::manage_roles_with_member,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn review_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/papers/:id/reviews", get(review_controller::index))
        .route("/papers/:id/reviews", post(review_controller::create))
        .route("/reviews/:id", get(review_controller::read))
        .route("/reviews/:id", delete(review_controller::delete))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

pub fn user_routes(app_state: AppState) -> Router {
    Router::new()
        // POST /users is the open registration endpoint
        .route("/users", post(user_controller::create))
        .merge(
            Router::new()
                .route("/users/:username", get(user_controller::read))
                .route_layer(from_fn(require_auth)),
        )
        .merge(
            // PUT /users/:id/profile
            Router::new()
                .route("/users/:id/profile", put(user_controller::update_profile))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::users::update_profile,
                ))
                .route_layer(from_fn(require_auth)),
        )
        .with_state(app_state)
}

pub fn user_session_routes() -> Router {
    Router::new().route("/login", post(user_session_controller::login))
}

pub fn user_session_protected_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/logout", delete(user_session_controller::delete))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

pub fn static_routes() -> Router {
    Router::new().nest_service("/", ServeDir::new("./"))
}
