//! Session API handlers

use crate::auth::{AuthenticateRequest, AuthenticateResponse};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Authenticate with email and password
///
/// Verifies the credentials and returns a short-lived access token and a
/// longer-lived refresh token. The refresh token is stored server side.
///
/// # Responses
///
/// * `200 OK` - Authentication successful, returns tokens
/// * `401 Unauthorized` - Unknown email or wrong password (same body for both)
/// * `500 Internal Server Error` - Storage or signing failure
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "auth",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Authentication successful", body = AuthenticateResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn authenticate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<Json<AuthenticateResponse>, AppError> {
    let response = state.auth.authenticate(request).await?;

    Ok(Json(response))
}
