//! Account Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used by the authentication service:
//! - Account and refresh token models
//! - Common error types
//! - The account store trait and its PostgreSQL implementation
//! - Clock abstraction for expiration arithmetic
//! - Configuration management

pub mod clock;
pub mod config;
pub mod store;

pub use clock::{add_days, Clock, SystemClock};
pub use config::{
    parse_duration, AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig,
    RefreshTokenSettings, ServerConfig, TokenSettings,
};
pub use store::{AccountStore, PgAccountStore};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::FixedClock;
#[cfg(any(test, feature = "test-utils"))]
pub use store::InMemoryAccountStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for account operations
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type Result<T> = std::result::Result<T, AccountError>;

// ============================================================================
// Accounts
// ============================================================================

/// A registered account
///
/// Accounts are created and updated elsewhere; the authentication service
/// only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login email, unique across accounts
    pub email: String,

    /// Argon2id PHC string, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Public view of the account, safe for API responses
    pub fn to_public(&self) -> AccountPublic {
        AccountPublic {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Fields of an account that may be returned to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPublic {
    pub name: String,
    pub email: String,
}

// ============================================================================
// Refresh Tokens
// ============================================================================

/// Refresh token to be persisted after a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    /// Signed token string, stored as issued
    pub refresh_token: String,
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Persisted refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    pub refresh_token: String,
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Tests
// ============================================================================
