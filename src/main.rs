//! Hangar front-end gateway: entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Assemble config from the process environment
//!   3. Init logger at the configured level (a valid `RUST_LOG` wins)
//!   4. Spawn Ctrl-C → shutdown signal watcher
//!   5. Serve until shutdown

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use hangar_front::{config, error::AppError, gateway::Gateway, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let config = Arc::new(config::from_env());

    logger::init(&config.log_level)?;

    info!(
        proxy_host = %config.proxy_host,
        auth_host = %config.auth_host,
        public_host = %config.public_host,
        environment = config.environment.as_deref().unwrap_or("unset"),
        bind = %config.server.bind_addr(),
        "config assembled"
    );

    let shutdown = CancellationToken::new();

    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    Gateway::new(config)?.run(shutdown).await
}
