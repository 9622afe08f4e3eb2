//! Integration tests for Leather Lane.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leather-lane-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Browsing, filtering and search suggestions
//! - `storefront_checkout` - Cart persistence, checkout and order confirmation
//!
//! Every test gets its own [`TestContext`] with a throwaway data directory,
//! so the cart is persisted to a real storage file.

use std::path::Path;

use leather_lane_storefront::config::StorefrontConfig;
use leather_lane_storefront::error::Result;
use leather_lane_storefront::state::Storefront;
use tempfile::TempDir;

/// A storefront backed by a temporary data directory.
pub struct TestContext {
    data_dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Path of the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Configuration pointing at this context's data directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.data_dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        }
    }

    /// Open (or reopen) the storefront. Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the storefront cannot be opened.
    pub fn open(&self) -> Result<Storefront> {
        Storefront::open(self.config())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
