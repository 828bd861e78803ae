//! Account API Server
//!
//! REST API server that authenticates accounts and issues session tokens.

use account_api::{create_router, logging, state::AppState};
use account_core::{AppConfig, PgAccountStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration: optional TOML file, then environment overrides
    let config = match std::env::var("ACCOUNT_CONFIG") {
        Ok(path) => AppConfig::from_file(path)?.with_env_override()?,
        Err(_) => AppConfig::from_env()?,
    };
    config.validate()?;

    logging::init(&config.logging);

    let store = PgAccountStore::connect(&config.database).await?;
    tracing::info!("Connected to PostgreSQL");

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::new(&config, Arc::new(store))?);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Account API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
