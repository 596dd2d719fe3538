//! Unified error handling for the storefront.
//!
//! Selection states (incomplete selection, empty catalog, quantity at its
//! bound) are not errors and never appear here; they surface as disabled
//! controls in the view structs. `StoreError` covers the genuinely fallible
//! boundaries: the network fetch, cart persistence, and configuration.

use thiserror::Error;

use crate::api::ApiError;
use crate::cart::CartError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Cart persistence failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
