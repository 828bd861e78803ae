//! Fixtures shared by unit tests

use account_core::{Account, AuthConfig, RefreshTokenSettings, TokenSettings};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Hash with light Argon2id parameters so tests stay fast
pub fn hash_password(password: &str) -> String {
    let params = Params::new(8 * 1024, 1, 1, None).expect("valid argon2 params");
    let salt = SaltString::generate(&mut OsRng);

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .expect("hashing succeeds")
        .to_string()
}

pub fn fixture_account() -> Account {
    Account::new("Ada Lovelace", "ada@example.com", hash_password(TEST_PASSWORD))
}

/// 15 minute access tokens, 7 day refresh tokens
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        access_token: TokenSettings {
            secret: "test-access-secret".to_string(),
            expires: "15m".to_string(),
        },
        refresh_token: RefreshTokenSettings {
            secret: "test-refresh-secret".to_string(),
            expires: "7d".to_string(),
            expires_days: 7,
        },
    }
}
