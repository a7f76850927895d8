//! eirinix-sample — hello-world webhook extension bootstrap.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI flags
//!   3. Init logger
//!   4. Resolve config (flag > env > default)
//!   5. Validate the required webhook host
//!   6. Build the webhook manager, wire Ctrl-C to shutdown
//!   7. Register the hello-world extension and start the manager
//!
//! Every error is fatal: `run` returns it to `main`, which prints the single
//! error line and exits non-zero. There is no retry path anywhere.

pub mod config;
pub mod error;
pub mod extensions;
pub mod logger;
pub mod manager;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use config::{Cli, Config};
use error::AppError;
use manager::{Manager, ManagerOptions, WebhookManager};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOG_LEVEL: &str = "info";

/// Full bootstrap: configuration, validation, manager construction, blocking
/// start. Returns only when the manager stops.
pub async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    logger::init(DEFAULT_LOG_LEVEL)?;

    let config = Config::resolve(cli, |name| std::env::var(name).ok())?;

    info!(version = %VERSION, namespace = %config.namespace, "starting eirinix-sample");

    config.validate()?;

    // Ctrl-C cancels the token; the manager shuts down its server cleanly.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    let manager = WebhookManager::new(ManagerOptions::from_config(&config), shutdown);

    launch(manager).await
}

/// Register the bundled extension set and hand control to the manager.
///
/// Kept generic over [`Manager`] so the registration-then-start contract is
/// testable with a fake manager instead of a live server.
pub async fn launch<M: Manager>(mut manager: M) -> Result<(), AppError> {
    manager.add_extension(Box::new(extensions::helloworld::new()));
    manager.start().await
}
