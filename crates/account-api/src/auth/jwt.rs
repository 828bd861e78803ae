//! JWT token signing and decoding
//!
//! Tokens are signed with HMAC-SHA256. The caller chooses the secret and
//! lifetime per token kind, so access and refresh tokens never share keys.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Registered claims plus a caller-defined payload
///
/// The payload fields are flattened next to `sub`, `iat` and `exp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims<P> {
    #[serde(flatten)]
    pub payload: P,
    /// Subject - account ID
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
}

/// Access tokens carry no claims beyond the registered ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPayload {}

/// Refresh token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPayload {
    pub email: String,
}

/// Per-token signing options
#[derive(Debug, Clone, Copy)]
pub struct SignOptions<'a> {
    pub subject: &'a str,
    pub expires_in: Duration,
}

/// JWT signing and decoding errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token format")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expiry out of range")]
    ExpiryOverflow,

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// Sign a token for `options.subject` that expires after `options.expires_in`
///
/// # Example
///
/// ```no_run
/// use account_api::auth::jwt::{sign_token, RefreshPayload, SignOptions};
/// use std::time::Duration;
///
/// let token = sign_token(
///     RefreshPayload { email: "ada@example.com".to_string() },
///     "refresh-secret",
///     SignOptions { subject: "0b5c...", expires_in: Duration::from_secs(30 * 86_400) },
/// ).expect("Failed to sign token");
/// ```
pub fn sign_token<P: Serialize>(
    payload: P,
    secret: &str,
    options: SignOptions<'_>,
) -> Result<String, JwtError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        payload,
        sub: options.subject.to_string(),
        iat: now,
        exp: now
            .checked_add(options.expires_in.as_secs())
            .ok_or(JwtError::ExpiryOverflow)?,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate signature and expiration, then return the claims
pub fn decode_token<P: DeserializeOwned>(
    token: &str,
    secret: &str,
) -> Result<Claims<P>, JwtError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims<P>>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::InvalidToken,
    })?;

    Ok(token_data.claims)
}
