//! Leather Lane Storefront library.
//!
//! Everything the storefront does lives here, independent of any front end:
//!
//! - [`catalog`] - The read-only product catalog
//! - [`storage`] - Client-side key/value storage backends
//! - [`cart`] - The cart store, persisted to storage on every change
//! - [`search`] - Filtered, sorted, paginated catalog views and suggestions
//! - [`checkout`] - The three-step checkout state machine and order totals
//! - [`order`] - The order confirmation view
//! - [`timer`] - Cancellable scheduled callbacks on the tokio runtime
//! - [`notification`] - Toast messages shown to the shopper
//! - [`config`] - Environment-driven configuration
//! - [`error`] - The unified [`AppError`](error::AppError)
//! - [`state`] - The [`Storefront`](state::Storefront) that owns it all

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notification;
pub mod order;
pub mod search;
pub mod state;
pub mod storage;
pub mod timer;
