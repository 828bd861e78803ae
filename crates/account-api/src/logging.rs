//! Structured logging setup shared by the binaries

use account_core::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing
///
/// `RUST_LOG` takes precedence over the configured level. JSON output is
/// meant for production log shipping.
pub fn init(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},sqlx=warn,tower_http=debug", config.level))
    });

    let json_layer = config
        .json_format
        .then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let text_layer = (!config.json_format)
        .then(|| tracing_subscriber::fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
