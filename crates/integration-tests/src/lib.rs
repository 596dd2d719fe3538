//! Integration tests for Origami.
//!
//! # Running Tests
//!
//! ```bash
//! # Cross-view cart tests run against the filesystem only
//! cargo test -p origami-integration-tests
//!
//! # Live API tests need the backend running on ORIGAMI_API_URL
//! cargo test -p origami-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_sync` - Two storefront views sharing one persisted cart
//! - `storefront_api` - Live product/variant fetches (ignored by default)
//! - `admin_api` - Live back-office CRUD (ignored by default)

#![cfg_attr(not(test), forbid(unsafe_code))]
