//! Admin client error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from the admin client.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Wrong username or password at login.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session, or the session expired.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Network or protocol failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an unexpected status.
    #[error("unexpected status {status} from {path}")]
    Status { status: u16, path: String },

    /// Session persistence failed.
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Session (de)serialization failed.
    #[error("session serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
