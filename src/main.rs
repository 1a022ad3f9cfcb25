//! Binary entry point: configuration, logging, database, serve.

use educonsult_backend::config::Config;
use educonsult_backend::db::{self, Repository};
use educonsult_backend::notify::Notifier;
use educonsult_backend::{create_router, AppState};

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EduConsult Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Uploads path: {:?}", config.uploads_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the JWT secret is not configured
    if config.jwt_secret.is_none() {
        tracing::warn!("No JWT secret configured (EDU_JWT_SECRET). Authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Repository::new(pool);

    let notifier = Notifier::new(config.notify_webhook.clone());

    // Create application state
    let state = AppState {
        repo,
        notifier,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
