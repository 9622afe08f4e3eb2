//! Leather Lane Core - Shared domain types.
//!
//! This crate provides the types shared by every Leather Lane component:
//! - `storefront` - Catalog, cart store, search and checkout logic
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no timers.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, emails, products and checkout enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
