//! Account API - session server
//!
//! Provides HTTP endpoints for authenticating accounts.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the public endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::authenticate_handler,
        handlers::health::health_check,
    ),
    components(schemas(
        auth::AuthenticateRequest,
        auth::AuthenticateResponse,
        auth::AccountInfo,
        error::ApiError,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Account sessions"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
