//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `ORIGAMI_API_URL` - Backend API base URL (default: `http://localhost:5015`)
//! - `ORIGAMI_ADMIN_USER` - Admin username (default: `admin`)
//! - `ORIGAMI_ADMIN_PASSWORD` - Admin password (required for login)
//! - `ORIGAMI_ADMIN_SESSION_PATH` - Session file (default: `admin_session.json`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Admin client configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    /// Backend API base URL, without a trailing slash
    pub api_url: String,
    /// Admin username accepted at login
    pub username: String,
    /// Admin password accepted at login
    pub password: SecretString,
    /// Path of the persisted session file
    pub session_path: PathBuf,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("session_path", &self.session_path)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `ORIGAMI_ADMIN_PASSWORD` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("ORIGAMI_API_URL", "http://localhost:5015")
            .trim_end_matches('/')
            .to_string();
        let username = get_env_or_default("ORIGAMI_ADMIN_USER", "admin");
        let password = std::env::var("ORIGAMI_ADMIN_PASSWORD")
            .map(SecretString::from)
            .map_err(|_| ConfigError::MissingEnvVar("ORIGAMI_ADMIN_PASSWORD".to_string()))?;
        let session_path = PathBuf::from(get_env_or_default(
            "ORIGAMI_ADMIN_SESSION_PATH",
            "admin_session.json",
        ));

        Ok(Self {
            api_url,
            username,
            password,
            session_path,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let config = AdminConfig {
            api_url: "http://localhost:5015".to_string(),
            username: "admin".to_string(),
            password: SecretString::from("hunter2hunter2"),
            session_path: PathBuf::from("admin_session.json"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
