//! API route definitions

use crate::handlers::auth;
use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Create API v1 routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/sessions", post(auth::authenticate_handler))
}
