//! Account CLI - Command-line interface
//!
//! Usage:
//!   account login --email <email> [--password <password>]
//!   account migrate

use account_api::auth::{AuthService, AuthenticateRequest};
use account_api::logging;
use account_core::{AppConfig, PgAccountStore, SystemClock};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "account")]
#[command(about = "Account session CLI")]
#[command(version)]
struct Cli {
    /// TOML configuration file; environment variables override it
    #[arg(long, env = "ACCOUNT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate an account and print the issued tokens
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "ACCOUNT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Apply database schema migrations
    Migrate,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    logging::init(&config.logging);

    let store = PgAccountStore::connect(&config.database).await?;

    match cli.command {
        Commands::Login { email, password } => {
            let service = AuthService::new(Arc::new(store), Arc::new(SystemClock), &config.auth)?;
            let response = service
                .authenticate(AuthenticateRequest { email, password })
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Migrate => {
            store.migrate().await?;
            tracing::info!("Migrations applied");
        }
    }

    Ok(())
}
