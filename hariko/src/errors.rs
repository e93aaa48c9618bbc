//! Error types for hariko

use thiserror::Error;

/// Main error type for hariko
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),

    #[error("Deployment error: {0}")]
    DeployError(String),

    #[error("Notification error: {0}")]
    NotifyError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
