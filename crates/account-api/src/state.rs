//! Application state management

use crate::auth::AuthService;
use account_core::{AccountStore, AppConfig, Clock, ConfigError, SystemClock};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Server start time
    pub start_time: Instant,
    /// Authentication use case
    pub auth: AuthService,
}

impl AppState {
    /// Create application state backed by the system clock
    pub fn new(config: &AppConfig, store: Arc<dyn AccountStore>) -> Result<Self, ConfigError> {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &AppConfig,
        store: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let auth = AuthService::new(store, clock, &config.auth)?;

        Ok(Self {
            start_time: Instant::now(),
            auth,
        })
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
