use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Starting parea platform [{}]", config.runtime_env);

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let app_state = service::AppState::new(config, &db);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
