use axum::http::HeaderValue;
use axum_login::AuthManagerLayerBuilder;
use log::*;
use std::net::SocketAddr;
use std::str::FromStr;
use time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

pub use self::error::{Error, Result};

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod protect;
pub mod router;

pub use service::AppState;

pub async fn init_server(app_state: AppState) -> anyhow::Result<()> {
    // Session layer backed by the same Postgres instance the entities
    // live in. This is what axum-login uses to persist session cookies.
    let pool = app_state
        .db_conn_ref()
        .get_postgres_connection_pool()
        .clone();
    let session_store = PostgresStore::new(pool);
    session_store.migrate().await?;

    let session_expiry_seconds = app_state.config.backend_session_expiry_seconds;
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(app_state.config.is_production())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            session_expiry_seconds as i64,
        )));

    let backend = domain::user::Backend::new(&app_state.database_connection);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let cors_layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
        .allow_origin(AllowOrigin::list(
            app_state
                .config
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        ));

    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let listen_addr = SocketAddr::from_str(&format!("{interface}:{port}"))?;

    info!("Server starting... listening for connections on http://{interface}:{port}");

    let app = router::define_routes(app_state)
        .layer(auth_layer)
        .layer(cors_layer);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
