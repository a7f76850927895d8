//! Webhook manager boundary.
//!
//! The bootstrap talks to the manager only through the [`Manager`] trait so
//! tests can substitute a fake. [`WebhookManager`] is the concrete
//! implementation: it owns the registered extensions and drives an axum
//! server until the shutdown token fires or the server errors.
//!
//! Admission dispatch, TLS and Kubernetes API access are deliberately out of
//! scope; the kubeconfig path is carried so the manager can report how it
//! would connect, nothing more.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;

/// Fixed identity string reported to the cluster by this operator instance.
pub const OPERATOR_FINGERPRINT: &str = "eirini-x-helloworld";

// ── Boundary traits ───────────────────────────────────────────────────────────

/// A pluggable unit registered with the manager. Extension behaviour is owned
/// by the manager framework; this repository only supplies identity.
pub trait Extension: Send + Sync {
    /// Stable identifier used in log messages and the health report.
    fn name(&self) -> &str;
}

/// The seam between the bootstrap and whatever serves webhook traffic.
///
/// `start` blocks until the server stops: `Ok(())` on cooperative shutdown,
/// `Err` on any bind or serve failure. Errors are fatal to the process.
pub trait Manager {
    fn add_extension(&mut self, extension: Box<dyn Extension>);

    fn start(&mut self) -> impl Future<Output = Result<(), AppError>> + Send;
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Everything the manager needs to serve: resolved run configuration plus the
/// fixed operator fingerprint.
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    pub namespace: String,
    pub host: String,
    pub port: u16,
    /// `None` means in-cluster auto-discovery.
    pub kubeconfig: Option<PathBuf>,
    pub operator_fingerprint: String,
}

impl ManagerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            namespace: config.namespace.clone(),
            host: config.webhook_host.clone(),
            port: config.webhook_port,
            kubeconfig: config.kubeconfig.clone(),
            operator_fingerprint: OPERATOR_FINGERPRINT.to_string(),
        }
    }
}

// ── WebhookManager ────────────────────────────────────────────────────────────

pub struct WebhookManager {
    options: ManagerOptions,
    extensions: Vec<Box<dyn Extension>>,
    shutdown: CancellationToken,
}

impl WebhookManager {
    pub fn new(options: ManagerOptions, shutdown: CancellationToken) -> Self {
        Self {
            options,
            extensions: Vec::new(),
            shutdown,
        }
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    fn extension_names(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }
}

impl Manager for WebhookManager {
    fn add_extension(&mut self, extension: Box<dyn Extension>) {
        info!(extension = extension.name(), "extension registered");
        self.extensions.push(extension);
    }

    async fn start(&mut self) -> Result<(), AppError> {
        let bind_addr = format!("{}:{}", self.options.host, self.options.port);

        let router = build_router(ServerState {
            fingerprint: Arc::from(self.options.operator_fingerprint.as_str()),
            extensions: Arc::from(self.extension_names()),
        });

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Manager(format!("webhook bind failed on {bind_addr}: {e}")))?;

        info!(
            %bind_addr,
            namespace = %self.options.namespace,
            kubeconfig = %self
                .options
                .kubeconfig
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "in-cluster".to_string()),
            "webhook server listening"
        );

        let shutdown = self.shutdown.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| AppError::Manager(format!("webhook server error: {e}")))?;

        info!("webhook server shut down");
        Ok(())
    }
}

// ── Server ────────────────────────────────────────────────────────────────────

/// Axum router state, cheap to clone into every handler.
#[derive(Clone)]
struct ServerState {
    fingerprint: Arc<str>,
    extensions: Arc<[String]>,
}

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    operator: String,
    extensions: Vec<String>,
}

fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// GET /healthz
async fn healthz(State(state): State<ServerState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        operator: state.fingerprint.to_string(),
        extensions: state.extensions.to_vec(),
    })
}
