//! Core types for Origami.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::*;
pub use price::Price;
