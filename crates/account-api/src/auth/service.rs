//! Authentication service layer
//!
//! Verifies account credentials and issues an access/refresh token pair.
//! The refresh token is persisted so later flows can look it up.

use super::jwt::{sign_token, AccessPayload, JwtError, RefreshPayload, SignOptions};
use super::password::{verify_password, PasswordError};
use account_core::{
    add_days, AccountError, AccountStore, AuthConfig, Clock, ConfigError, NewRefreshToken,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

/// Message shared by every credential failure, so callers cannot tell
/// an unknown email from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password incorrect";

/// Credentials submitted to open a session
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthenticateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public account fields returned after authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountInfo {
    pub name: String,
    pub email: String,
}

impl From<account_core::AccountPublic> for AccountInfo {
    fn from(public: account_core::AccountPublic) -> Self {
        Self {
            name: public.name,
            email: public.email,
        }
    }
}

/// Successful authentication response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub account: AccountInfo,
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] AccountError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Refresh token expiry out of range")]
    ExpiryOutOfRange,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
    access_secret: String,
    access_expires_in: Duration,
    refresh_secret: String,
    refresh_expires_in: Duration,
    refresh_expires_days: i64,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// Fails if the token settings do not validate.
    pub fn new(
        store: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            store,
            clock,
            access_secret: config.access_token.secret.clone(),
            access_expires_in: config.access_token.expires_in()?,
            refresh_secret: config.refresh_token.secret.clone(),
            refresh_expires_in: config.refresh_token.expires_in()?,
            refresh_expires_days: config.refresh_token.expires_days,
        })
    }

    /// Authenticate with email and password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticateResponse)` - Account info plus access and refresh tokens
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(AuthError)` - Any storage, hashing or signing failure, unchanged
    #[tracing::instrument(skip_all, fields(email = %request.email))]
    pub async fn authenticate(
        &self,
        request: AuthenticateRequest,
    ) -> Result<AuthenticateResponse, AuthError> {
        let Some(account) = self.store.find_account_by_email(&request.email).await? else {
            tracing::warn!("Authentication rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(&request.password, &account.password_hash)? {
            tracing::warn!("Authentication rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let subject = account.id.to_string();

        let access_token = sign_token(
            AccessPayload::default(),
            &self.access_secret,
            SignOptions {
                subject: &subject,
                expires_in: self.access_expires_in,
            },
        )?;

        let refresh_token = sign_token(
            RefreshPayload {
                email: account.email.clone(),
            },
            &self.refresh_secret,
            SignOptions {
                subject: &subject,
                expires_in: self.refresh_expires_in,
            },
        )?;

        let expires_at = add_days(self.clock.now(), self.refresh_expires_days)
            .ok_or(AuthError::ExpiryOutOfRange)?;

        self.store
            .create_refresh_token(NewRefreshToken {
                refresh_token: refresh_token.clone(),
                account_id: account.id,
                expires_at,
            })
            .await?;

        tracing::info!(account_id = %account.id, %expires_at, "Account authenticated");

        Ok(AuthenticateResponse {
            account: account.to_public().into(),
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{decode_token, Claims};
    use crate::testing::{fixture_account, test_auth_config, TEST_PASSWORD};
    use account_core::{FixedClock, InMemoryAccountStore};
    use chrono::{TimeZone, Utc};

    fn service_with(store: Arc<InMemoryAccountStore>) -> AuthService {
        let clock = FixedClock(Utc.with_ymd_and_hms(2030, 6, 1, 8, 0, 0).unwrap());
        AuthService::new(store, Arc::new(clock), &test_auth_config()).unwrap()
    }

    fn request(email: &str, password: &str) -> AuthenticateRequest {
        AuthenticateRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unknown_email_is_rejected() {
        let store = Arc::new(InMemoryAccountStore::with_accounts([fixture_account()]));
        let service = service_with(store.clone());

        let result = service
            .authenticate(request("nobody@example.com", TEST_PASSWORD))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(store.refresh_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store.clone());

        let result = service
            .authenticate(request(&account.email, "not-the-password"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(store.refresh_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_messages_are_identical() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store);

        let unknown = service
            .authenticate(request("nobody@example.com", TEST_PASSWORD))
            .await
            .unwrap_err()
            .to_string();
        let wrong = service
            .authenticate(request(&account.email, "not-the-password"))
            .await
            .unwrap_err()
            .to_string();

        assert_eq!(unknown.as_bytes(), wrong.as_bytes());
        assert_eq!(unknown, INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn test_successful_authentication() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store.clone());

        let response = service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await
            .expect("Authentication failed");

        assert_eq!(response.account.name, account.name);
        assert_eq!(response.account.email, account.email);
        assert!(!response.access_token.is_empty());
        assert!(!response.refresh_token.is_empty());

        let tokens = store.refresh_tokens().await;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].refresh_token, response.refresh_token);
        assert_eq!(tokens[0].account_id, account.id);
        assert_eq!(
            tokens[0].expires_at,
            Utc.with_ymd_and_hms(2030, 6, 8, 8, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_tokens_use_separate_secrets_and_lifetimes() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store);
        let config = test_auth_config();

        let response = service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await
            .unwrap();

        let access: Claims<AccessPayload> =
            decode_token(&response.access_token, &config.access_token.secret).unwrap();
        let refresh: Claims<RefreshPayload> =
            decode_token(&response.refresh_token, &config.refresh_token.secret).unwrap();

        assert_eq!(access.sub, account.id.to_string());
        assert_eq!(refresh.sub, account.id.to_string());
        assert_eq!(refresh.payload.email, account.email);
        assert_eq!(access.exp - access.iat, 15 * 60);
        assert_eq!(refresh.exp - refresh.iat, 7 * 86_400);

        assert!(matches!(
            decode_token::<AccessPayload>(&response.access_token, &config.refresh_token.secret),
            Err(JwtError::InvalidSignature)
        ));
        assert!(matches!(
            decode_token::<RefreshPayload>(&response.refresh_token, &config.access_token.secret),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[tokio::test]
    async fn test_each_login_persists_a_new_token() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store.clone());

        service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await
            .unwrap();
        service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await
            .unwrap();

        assert_eq!(store.refresh_tokens().await.len(), 2);
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store.clone());

        store.fail_lookups(true);
        let result = service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await;
        assert!(matches!(result, Err(AuthError::Store(_))));

        store.fail_lookups(false);
        store.fail_inserts(true);
        let result = service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await;
        assert!(matches!(result, Err(AuthError::Store(_))));
        assert!(store.refresh_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_stored_hash_is_not_invalid_credentials() {
        let mut account = fixture_account();
        account.password_hash = "plaintext-leftover".to_string();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let service = service_with(store.clone());

        let result = service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await;

        assert!(matches!(
            result,
            Err(AuthError::Password(PasswordError::InvalidHashFormat))
        ));
        assert!(store.refresh_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_expiry_out_of_range_is_an_error() {
        let account = fixture_account();
        let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
        let clock = FixedClock(chrono::DateTime::<Utc>::MAX_UTC);
        let service =
            AuthService::new(store.clone(), Arc::new(clock), &test_auth_config()).unwrap();

        let result = service
            .authenticate(request(&account.email, TEST_PASSWORD))
            .await;

        assert!(matches!(result, Err(AuthError::ExpiryOutOfRange)));
        assert!(store.refresh_tokens().await.is_empty());
    }

    #[test]
    fn test_response_uses_camel_case_fields() {
        let response = AuthenticateResponse {
            account: AccountInfo {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "a");
        assert_eq!(json["refreshToken"], "r");
        assert_eq!(json["account"]["email"], "ada@example.com");
        assert!(json.get("access_token").is_none());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = test_auth_config();
        config.refresh_token.expires = "forever".to_string();

        let result = AuthService::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(account_core::SystemClock),
            &config,
        );
        assert!(result.is_err());

        let mut config = test_auth_config();
        config.refresh_token.expires_days = 200_000_000;
        assert!(AuthService::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(account_core::SystemClock),
            &config,
        )
        .is_err());
    }

    #[test]
    fn test_request_debug_redacts_password() {
        let debug = format!("{:?}", request("a@example.com", "hunter2"));
        assert!(debug.contains("a@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
