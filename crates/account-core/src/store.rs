//! Account storage
//!
//! Account lookup and refresh token persistence using SQLx and PostgreSQL,
//! plus an in-memory implementation for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::{Account, AccountError, NewRefreshToken, Result};

/// Storage operations needed to authenticate an account
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account by its login email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Persist a newly issued refresh token
    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<()>;
}

/// PostgreSQL account store
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new account store connection
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::debug!(pool_size = config.postgres_pool_size, "Connecting to PostgreSQL");

        let pool = PgPoolOptions::new()
            .max_connections(config.postgres_pool_size)
            .connect(&config.postgres_url)
            .await
            .map_err(|e| {
                AccountError::DatabaseError(format!("PostgreSQL connection failed: {e}"))
            })?;

        Ok(Self { pool })
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Applying account schema migrations");

        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| AccountError::MigrationError(e.to_string()))
    }
}

/// Account row from database
#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email, password_hash FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(format!("Failed to fetch account: {e}")))?;

        Ok(row.map(Account::from))
    }

    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<()> {
        let created_at: DateTime<Utc> = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO account_tokens (id, refresh_token, account_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&token.refresh_token)
        .bind(token.account_id)
        .bind(token.expires_at)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(format!("Failed to store refresh token: {e}")))?;

        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryAccountStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use super::*;
    use crate::RefreshTokenRecord;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// In-memory account store for tests
    ///
    /// Lookups and inserts can be switched to fail so callers can check
    /// how storage errors propagate.
    #[derive(Default)]
    pub struct InMemoryAccountStore {
        accounts: RwLock<Vec<Account>>,
        tokens: RwLock<Vec<RefreshTokenRecord>>,
        fail_lookups: AtomicBool,
        fail_inserts: AtomicBool,
    }

    impl InMemoryAccountStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
            Self {
                accounts: RwLock::new(accounts.into_iter().collect()),
                ..Self::default()
            }
        }

        /// Snapshot of every persisted refresh token
        pub async fn refresh_tokens(&self) -> Vec<RefreshTokenRecord> {
            self.tokens.read().await.clone()
        }

        pub fn fail_lookups(&self, fail: bool) {
            self.fail_lookups.store(fail, Ordering::SeqCst);
        }

        pub fn fail_inserts(&self, fail: bool) {
            self.fail_inserts.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AccountStore for InMemoryAccountStore {
        async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
            if self.fail_lookups.load(Ordering::SeqCst) {
                return Err(AccountError::DatabaseError(
                    "Failed to fetch account: connection refused".to_string(),
                ));
            }

            Ok(self
                .accounts
                .read()
                .await
                .iter()
                .find(|a| a.email == email)
                .cloned())
        }

        async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<()> {
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(AccountError::DatabaseError(
                    "Failed to store refresh token: connection refused".to_string(),
                ));
            }

            self.tokens.write().await.push(RefreshTokenRecord {
                id: Uuid::new_v4(),
                refresh_token: token.refresh_token,
                account_id: token.account_id,
                expires_at: token.expires_at,
                created_at: Utc::now(),
            });

            Ok(())
        }
    }
}
