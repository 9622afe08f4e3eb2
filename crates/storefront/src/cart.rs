//! The cart store.
//!
//! A [`CartStore`] owns the ordered list of cart lines and the storage it is
//! persisted to. It is rehydrated once on load and written back after every
//! mutation under [`CART_STORAGE_KEY`]. Storage failures are logged and never
//! surfaced: an unreadable record yields an empty cart, a failed write
//! leaves the in-memory cart authoritative.

use leather_lane_core::{CartItem, Price, Product, ProductId};
use tracing::instrument;

use crate::storage::LocalStorage;

/// Local storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Largest quantity the storefront lets a shopper add in one go.
///
/// The store itself does not enforce a bound.
pub const MAX_QUANTITY_PER_ADD: u32 = 10;

/// Ordered cart lines, at most one per product, persisted on every change.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartItem>,
}

impl<S: LocalStorage> CartStore<S> {
    /// Rehydrate the cart from `storage`, defaulting to empty.
    pub fn load(storage: S) -> Self {
        let items = match storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to parse cart from local storage");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read cart from local storage");
                Vec::new()
            }
        };

        let items = normalize(items);
        tracing::debug!(lines = items.len(), "Cart loaded");
        Self { storage, items }
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same product has its quantity increased;
    /// otherwise a new line is appended. A quantity of 0 adds a single unit.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == &product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::new(product.clone(), quantity));
        }

        self.persist();
    }

    /// Replace the quantity of a line. No-op if the product is not in the cart.
    ///
    /// Callers reject quantities below 1; a 0 that gets through removes the
    /// line rather than keeping an empty one.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Remove a line. No-op if the product is not in the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// A copy of the current lines.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write the full item list to storage.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(crate::storage::StorageError::from)
            .and_then(|json| self.storage.set_item(CART_STORAGE_KEY, &json));

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to save cart to local storage");
        }
    }
}

/// Merge lines sharing a product id in first-seen order and drop empty ones.
///
/// A stored record is not trusted to hold one line per product.
fn normalize(stored: Vec<CartItem>) -> Vec<CartItem> {
    let before = stored.len();
    let mut merged: Vec<CartItem> = Vec::with_capacity(before);
    let mut changed = false;

    for item in stored {
        if let Some(line) = merged.iter_mut().find(|line| line.id() == item.id()) {
            line.quantity = line.quantity.saturating_add(item.quantity);
            changed = true;
        } else {
            merged.push(item);
        }
    }
    merged.retain(|item| item.quantity > 0);

    if changed || merged.len() != before {
        tracing::warn!(
            before,
            after = merged.len(),
            "Normalized cart loaded from local storage"
        );
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use leather_lane_core::Category;

    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::{MemoryStorage, StorageError};

    fn product(id: &str) -> Product {
        Catalog::builtin().unwrap().get(id).cloned().unwrap()
    }

    fn empty_cart() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new())
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl LocalStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "storage.json".into(),
                source: std::io::Error::other("read-only"),
            })
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = empty_cart();
        let boots = product("leather-boots");

        cart.add_to_cart(&boots, 2);
        cart.add_to_cart(&boots, 3);
        cart.add_to_cart(&boots, 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&boots.id).unwrap().quantity, 6);
    }

    #[test]
    fn test_add_zero_defaults_to_one() {
        let mut cart = empty_cart();
        let belt = product("leather-belt");

        cart.add_to_cart(&belt, 0);

        assert_eq!(cart.get(&belt.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product("leather-wallet"), 1);
        cart.add_to_cart(&product("leather-jacket"), 1);
        cart.add_to_cart(&product("leather-wallet"), 1);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["leather-wallet", "leather-jacket"]);
    }

    #[test]
    fn test_remove_then_add_has_no_residual_quantity() {
        let mut cart = empty_cart();
        let bag = product("leather-handbag");

        cart.add_to_cart(&bag, 4);
        cart.remove_from_cart(&bag.id);
        cart.add_to_cart(&bag, 2);

        assert_eq!(cart.get(&bag.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product("leather-belt"), 1);

        cart.remove_from_cart(&ProductId::new("no-such-product"));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = empty_cart();
        let vest = product("leather-vest");
        cart.add_to_cart(&vest, 5);

        cart.update_quantity(&vest.id, 2);

        assert_eq!(cart.get(&vest.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = empty_cart();
        let vest = product("leather-vest");
        cart.add_to_cart(&vest, 5);

        cart.update_quantity(&vest.id, 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = empty_cart();
        cart.update_quantity(&ProductId::new("leather-vest"), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product("leather-belt"), 1);
        cart.add_to_cart(&product("work-apron"), 2);

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(
            cart.storage().get_item(CART_STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_item_count_and_subtotal() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product("leather-handbag"), 2); // 14,500
        cart.add_to_cart(&product("leather-wallet"), 1); // 3,500

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Price::new(32_500));
    }

    #[test]
    fn test_reload_reproduces_items() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product("welding-gloves"), 3);
        cart.add_to_cart(&product("leather-jacket"), 1);
        cart.add_to_cart(&product("chelsea-boots"), 2);
        let before = cart.snapshot();

        let reloaded = CartStore::load(cart.into_storage());

        assert_eq!(reloaded.items(), before.as_slice());
        assert_eq!(
            reloaded.get(&ProductId::new("welding-gloves")).unwrap().product.category,
            Category::Industrial
        );
    }

    #[test]
    fn test_corrupt_record_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, "{\"oops\":").unwrap();

        let cart = CartStore::load(storage);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_merges_duplicate_lines_and_drops_empty() {
        let belt = product("leather-belt");
        let wallet = product("leather-wallet");
        let stored = vec![
            CartItem::new(belt.clone(), 2),
            CartItem::new(wallet.clone(), 0),
            CartItem::new(belt.clone(), 3),
            CartItem::new(belt.clone(), 0),
        ];
        let mut storage = MemoryStorage::new();
        storage
            .set_item(CART_STORAGE_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let mut cart = CartStore::load(storage);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&belt.id).unwrap().quantity, 5);
        assert!(cart.get(&wallet.id).is_none());

        cart.remove_from_cart(&belt.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_keeps_first_seen_order() {
        let stored = vec![
            CartItem::new(product("work-apron"), 1),
            CartItem::new(product("leather-jacket"), 1),
            CartItem::new(product("work-apron"), u32::MAX),
        ];
        let mut storage = MemoryStorage::new();
        storage
            .set_item(CART_STORAGE_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let cart = CartStore::load(storage);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["work-apron", "leather-jacket"]);
        assert_eq!(
            cart.get(&ProductId::new("work-apron")).unwrap().quantity,
            u32::MAX
        );
    }

    #[test]
    fn test_failed_writes_keep_in_memory_cart() {
        let mut cart = CartStore::load(ReadOnlyStorage);

        cart.add_to_cart(&product("leather-belt"), 2);

        assert_eq!(cart.item_count(), 2);
    }
}
