//! Origami Admin - back-office API client.
//!
//! Typed client for the catalog-management surface: products, categories,
//! and variants, plus the session handling the admin pages keep in local
//! storage. The back-office server itself is an external collaborator;
//! this crate only speaks its wire protocol.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use client::AdminClient;
pub use config::AdminConfig;
pub use error::AdminError;
pub use session::{AdminSession, SessionStore};
