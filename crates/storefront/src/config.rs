//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ORIGAMI_API_URL` - Backend API base URL (default: `http://localhost:5015`)
//! - `ORIGAMI_API_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `ORIGAMI_CART_PATH` - Cart persistence file (default: `cart_items.json`)
//! - `ORIGAMI_WHATSAPP_PHONE` - Phone number for checkout quotes, with
//!   country code and no `+` (e.g. `5491122334455`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend API base URL, without a trailing slash
    pub api_url: String,
    /// HTTP request timeout
    pub api_timeout: Duration,
    /// Path of the persisted cart file
    pub cart_path: PathBuf,
    /// Phone number that receives WhatsApp checkout quotes
    pub whatsapp_phone: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5015".to_string(),
            api_timeout: Duration::from_secs(30),
            cart_path: PathBuf::from("cart_items.json"),
            whatsapp_phone: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("ORIGAMI_API_URL", "http://localhost:5015")
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = get_env_or_default("ORIGAMI_API_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ORIGAMI_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let cart_path = PathBuf::from(get_env_or_default("ORIGAMI_CART_PATH", "cart_items.json"));
        let whatsapp_phone = get_optional_env("ORIGAMI_WHATSAPP_PHONE");

        Ok(Self {
            api_url,
            api_timeout: Duration::from_secs(timeout_secs),
            cart_path,
            whatsapp_phone,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
