//! Unified error handling.
//!
//! Provides a unified `AppError` that front ends report to the shopper.
//! Storefront operations that can fail for more than one reason return
//! `Result<T, AppError>`.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::timer::TimerError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A checkout action was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// No async runtime for scheduled work.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to show the shopper.
    ///
    /// Internal details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Storage(_) | Self::Catalog(_) | Self::Timer(_) | Self::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::Checkout(CheckoutError::Validation(e)) => e.notification().description,
            Self::Checkout(e) => capitalize(&e.to_string()),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
