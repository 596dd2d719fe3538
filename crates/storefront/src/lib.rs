//! Origami Storefront library.
//!
//! Everything the store's buying surface needs, with rendering kept out:
//! the variant catalog for one product, option filtering with selection
//! repair, variant resolution, the pricing/quantity state machine, and the
//! persisted cart. Consumers (the CLI, tests) hold the state objects and
//! render the view structs however they like.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod browse;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;
pub mod resolver;
pub mod selection;

pub use error::StoreError;
