//! Account authentication
//!
//! This module opens sessions for existing accounts:
//! - Token signing and decoding (HS256 JWT)
//! - Password verification against Argon2 hashes
//! - The authentication service that ties them to the account store

pub mod jwt;
pub mod password;
pub mod service;

pub use jwt::{
    decode_token, sign_token, AccessPayload, Claims, JwtError, RefreshPayload, SignOptions,
};
pub use password::{verify_password, PasswordError};
pub use service::{
    AccountInfo, AuthError, AuthService, AuthenticateRequest, AuthenticateResponse,
    INVALID_CREDENTIALS_MESSAGE,
};
