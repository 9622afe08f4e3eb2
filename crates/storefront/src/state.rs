//! The storefront session.
//!
//! A [`Storefront`] is created once at start-up and lives for the whole
//! session. It owns the catalog, the cart store and the timer used for
//! delayed work; front ends reach everything through it instead of through
//! globals.

use std::sync::Arc;

use leather_lane_core::{Product, ProductId};
use tracing::instrument;

use crate::cart::{CartStore, MAX_QUANTITY_PER_ADD};
use crate::catalog::Catalog;
use crate::checkout::CheckoutPage;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::search::{CatalogQuery, CatalogView, SuggestionDebouncer, derive_view};
use crate::storage::{FileStorage, LocalStorage};
use crate::timer::Timer;

/// Storefront state for one shopper.
#[derive(Debug)]
pub struct Storefront<S = FileStorage> {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore<S>,
    timer: Timer,
}

impl Storefront<FileStorage> {
    /// Open the storefront with the cart stored under `config.data_dir`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or catalog cannot be read, or
    /// no runtime is running.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStorage::open(&config.data_dir)?;
        Self::with_storage(config, storage)
    }
}

impl<S: LocalStorage> Storefront<S> {
    /// Create the storefront over an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or no runtime is
    /// running.
    pub fn with_storage(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin()?,
        };
        let timer = Timer::current()?;
        let cart = CartStore::load(storage);

        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.len(),
            "Storefront ready"
        );

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            cart,
            timer,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id.
    pub fn product(&self, id: &str) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
    }

    /// Add a product to the cart from the product page.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown product or a quantity outside
    /// `1..=10`.
    #[instrument(skip(self))]
    pub fn add_product_to_cart(&mut self, id: &str, quantity: u32) -> Result<()> {
        if !(1..=MAX_QUANTITY_PER_ADD).contains(&quantity) {
            return Err(AppError::BadRequest(format!(
                "Quantity must be between 1 and {MAX_QUANTITY_PER_ADD}"
            )));
        }

        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;
        self.cart.add_to_cart(product, quantity);
        Ok(())
    }

    /// Change a cart line's quantity from the cart page.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is below 1 or the product is not in
    /// the cart.
    pub fn update_cart_quantity(&mut self, id: &str, quantity: u32) -> Result<()> {
        if quantity < 1 {
            return Err(AppError::BadRequest("Quantity must be at least 1".to_string()));
        }

        let id = ProductId::new(id);
        if self.cart.get(&id).is_none() {
            return Err(AppError::NotFound(format!("Cart item {id}")));
        }
        self.cart.update_quantity(&id, quantity);
        Ok(())
    }

    /// Remove a line from the cart. Removing an absent line is not an error.
    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.remove_from_cart(&ProductId::new(id));
    }

    /// The product listing for `query`.
    #[must_use]
    pub fn view(&self, query: &CatalogQuery) -> CatalogView<'_> {
        derive_view(&self.catalog, query)
    }

    /// Enter checkout with the current cart.
    #[must_use]
    pub fn begin_checkout(&self) -> CheckoutPage {
        CheckoutPage::load(&self.cart)
    }

    /// A suggestion debouncer over this catalog.
    #[must_use]
    pub fn suggestion_debouncer(&self) -> SuggestionDebouncer {
        SuggestionDebouncer::new(
            Arc::clone(&self.catalog),
            self.timer.clone(),
            self.config.suggestion_debounce,
        )
    }
}
