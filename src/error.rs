//! Application-wide error types.

use thiserror::Error;

/// Every failure in this process is fatal: the bootstrap propagates the
/// error up to `main`, which prints it and exits non-zero. No variant is
/// ever retried or recovered from.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("manager error: {0}")]
    Manager(String),
}
