//! melos_accounts - user account service
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌─────────────────┐
//! │  Client  │───▶│ Session Gate │───▶│ CredentialStore │
//! │  (HTTP)  │    │    (JWT)     │    │   (in-memory)   │
//! └──────────┘    └──────────────┘    └─────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;

use melos_accounts::{AppConfig, AppState, gateway, logging};

#[derive(Debug, Parser)]
#[command(version, about = "In-memory user account service")]
struct Cli {
    /// Config environment; loads config/<env>.yaml
    #[arg(short, long, default_value = "dev")]
    env: String,

    /// Override gateway.port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.env)?;
    let _log_guard = logging::init_logging(&app_config);

    tracing::info!("Starting melos_accounts in {} mode", cli.env);
    tracing::debug!(auth = ?app_config.auth, "auth settings");
    if app_config.auth.enforce_ownership {
        tracing::info!("Ownership checks enabled for password update and delete");
    }

    let secret = app_config.auth.secret()?;
    let state = Arc::new(AppState::from_config(&app_config.auth, secret)?);

    let port = cli.port.unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state).await
}
