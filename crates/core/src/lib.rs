//! Origami Core - Shared types library.
//!
//! This crate provides common types used across all Origami components:
//! - `storefront` - Catalog, product-page, and cart logic
//! - `admin` - Back-office API client
//! - `cli` - Command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
