use account_api::{create_router, state::AppState};
use account_core::{Account, AppConfig, FixedClock, InMemoryAccountStore};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use axum::{body::Body, http::Request, Router};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;

pub const PASSWORD: &str = "correct horse battery staple";
pub const ACCESS_SECRET: &str = "integration-access-secret";
pub const REFRESH_SECRET: &str = "integration-refresh-secret";
pub const REFRESH_DAYS: i64 = 10;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 3, 15, 9, 30, 0).unwrap()
}

pub fn account() -> Account {
    let params = Params::new(8 * 1024, 1, 1, None).unwrap();
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(PASSWORD.as_bytes(), &salt)
        .unwrap()
        .to_string();

    Account::new("Grace Hopper", "grace@example.com", hash)
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.access_token.secret = ACCESS_SECRET.to_string();
    config.auth.access_token.expires = "10m".to_string();
    config.auth.refresh_token.secret = REFRESH_SECRET.to_string();
    config.auth.refresh_token.expires = "10d".to_string();
    config.auth.refresh_token.expires_days = REFRESH_DAYS;
    config
}

/// Router over an in-memory store seeded with `account()`
pub fn app() -> (Router, Arc<InMemoryAccountStore>, Account) {
    let account = account();
    let store = Arc::new(InMemoryAccountStore::with_accounts([account.clone()]));
    let state = AppState::with_clock(&config(), store.clone(), Arc::new(FixedClock(now())))
        .expect("valid test config");

    (create_router(Arc::new(state)), store, account)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
