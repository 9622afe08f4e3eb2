//! The order confirmation view.
//!
//! The confirmation is reached after checkout with an `order-id` marker in
//! its query string. On first render it snapshots the cart, computes the
//! totals and, only when the marker is present, clears the cart. Later
//! renders reuse that snapshot.

use chrono::{Local, NaiveDate};
use leather_lane_core::{CartItem, OrderId, PaymentMethod, ShippingMethod};
use url::form_urlencoded;

use crate::cart::CartStore;
use crate::checkout::OrderTotals;
use crate::storage::LocalStorage;

/// Query parameter marking a completed checkout.
pub const ORDER_ID_PARAM: &str = "order-id";

/// Query parameter carrying the chosen shipping method.
pub const SHIPPING_PARAM: &str = "shipping";

/// Query parameter carrying the chosen payment method.
pub const PAYMENT_PARAM: &str = "payment";

/// Payment label used when the payment method is not known.
pub const FALLBACK_PAYMENT_LABEL: &str = "Credit Card";

/// Navigation parameters of the confirmation view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationQuery {
    /// Raw `order-id` value. Present (even if empty) after checkout.
    pub order_id: Option<String>,
    pub shipping_method: Option<ShippingMethod>,
    pub payment_method: Option<PaymentMethod>,
}

impl ConfirmationQuery {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown methods are ignored.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                ORDER_ID_PARAM => parsed.order_id = Some(value.into_owned()),
                SHIPPING_PARAM => parsed.shipping_method = value.parse().ok(),
                PAYMENT_PARAM => parsed.payment_method = value.parse().ok(),
                _ => {}
            }
        }

        parsed
    }

    /// Encode as a query string (without `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(order_id) = &self.order_id {
            serializer.append_pair(ORDER_ID_PARAM, order_id);
        }
        if let Some(method) = self.shipping_method {
            serializer.append_pair(SHIPPING_PARAM, method.as_str());
        }
        if let Some(method) = self.payment_method {
            serializer.append_pair(PAYMENT_PARAM, method.as_str());
        }
        serializer.finish()
    }

    /// Whether the view was entered from a completed checkout.
    #[must_use]
    pub const fn has_order_marker(&self) -> bool {
        self.order_id.is_some()
    }

    /// The marker's order id, if it is a valid six-digit number.
    #[must_use]
    pub fn parsed_order_id(&self) -> Option<OrderId> {
        self.order_id.as_deref().and_then(|id| id.parse().ok())
    }
}

/// A synthetic order shown on the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: OrderId,
    pub order_date: NaiveDate,
    pub items: Vec<CartItem>,
    pub totals: OrderTotals,
    pub shipping_method: ShippingMethod,
    pub payment_method_label: &'static str,
}

impl Order {
    /// Receipt number, e.g. `AL-482913`.
    #[must_use]
    pub fn order_number(&self) -> String {
        self.order_id.receipt_number()
    }

    /// Order date, e.g. `October 16, 2026`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.order_date.format("%B %-d, %Y").to_string()
    }
}

/// What the confirmation view shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfirmationView<'a> {
    /// Reached directly with nothing to show.
    NoOrder,
    Receipt(&'a Order),
}

/// State of one visit to the confirmation view.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    query: ConfirmationQuery,
    order: Option<Order>,
}

impl OrderConfirmation {
    #[must_use]
    pub const fn new(query: ConfirmationQuery) -> Self {
        Self { query, order: None }
    }

    #[must_use]
    pub const fn query(&self) -> &ConfirmationQuery {
        &self.query
    }

    /// Render, dating a new order today.
    pub fn render<S: LocalStorage>(&mut self, cart: &mut CartStore<S>) -> ConfirmationView<'_> {
        self.render_on(cart, Local::now().date_naive())
    }

    /// Render, dating a new order `today`.
    ///
    /// Only the first render reads (and possibly clears) the cart.
    pub fn render_on<S: LocalStorage>(
        &mut self,
        cart: &mut CartStore<S>,
        today: NaiveDate,
    ) -> ConfirmationView<'_> {
        let query = &self.query;
        let order = self
            .order
            .get_or_insert_with(|| snapshot_order(query, cart, today));

        if order.items.is_empty() && !query.has_order_marker() {
            ConfirmationView::NoOrder
        } else {
            ConfirmationView::Receipt(order)
        }
    }
}

fn snapshot_order<S: LocalStorage>(
    query: &ConfirmationQuery,
    cart: &mut CartStore<S>,
    today: NaiveDate,
) -> Order {
    let shipping_method = query.shipping_method.unwrap_or_default();
    let items = cart.snapshot();
    let totals = OrderTotals::compute(&items, shipping_method);
    let order_id = query.parsed_order_id().unwrap_or_else(OrderId::generate);

    if query.has_order_marker() {
        cart.clear_cart();
        tracing::info!(%order_id, lines = items.len(), total = %totals.total, "Order confirmed");
    }

    Order {
        order_id,
        order_date: today,
        items,
        totals,
        shipping_method,
        payment_method_label: query
            .payment_method
            .map_or(FALLBACK_PAYMENT_LABEL, PaymentMethod::label),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use leather_lane_core::Price;

    use super::*;
    use crate::catalog::Catalog;
    use crate::checkout::EXPRESS_SHIPPING_RATE;
    use crate::storage::MemoryStorage;

    fn two_item_cart() -> CartStore<MemoryStorage> {
        let catalog = Catalog::builtin().unwrap();
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_to_cart(catalog.get("leather-jacket").unwrap(), 1);
        cart.add_to_cart(catalog.get("leather-belt").unwrap(), 2);
        cart
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_marker_clears_cart_and_shows_receipt() {
        let mut cart = two_item_cart();
        let mut confirmation =
            OrderConfirmation::new(ConfirmationQuery::from_query_string("?order-id=482913"));

        let ConfirmationView::Receipt(order) = confirmation.render_on(&mut cart, date()) else {
            panic!("expected a receipt");
        };

        assert_eq!(order.order_number(), "AL-482913");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.totals.subtotal, Price::new(38_500));
        assert_eq!(order.totals.shipping, Price::ZERO);
        assert_eq!(order.formatted_date(), "October 16, 2026");
        assert_eq!(order.payment_method_label, FALLBACK_PAYMENT_LABEL);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_direct_navigation_with_empty_cart_shows_no_order() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let mut confirmation = OrderConfirmation::new(ConfirmationQuery::default());

        assert_eq!(confirmation.render_on(&mut cart, date()), ConfirmationView::NoOrder);
    }

    #[test]
    fn test_without_marker_cart_is_kept() {
        let mut cart = two_item_cart();
        let mut confirmation = OrderConfirmation::new(ConfirmationQuery::default());

        let view = confirmation.render_on(&mut cart, date());

        assert!(matches!(view, ConfirmationView::Receipt(order) if order.items.len() == 2));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_only_first_render_snapshots() {
        let mut cart = two_item_cart();
        let mut confirmation =
            OrderConfirmation::new(ConfirmationQuery::from_query_string("order-id=123456"));

        let first = match confirmation.render_on(&mut cart, date()) {
            ConfirmationView::Receipt(order) => order.clone(),
            ConfirmationView::NoOrder => panic!("expected a receipt"),
        };

        let catalog = Catalog::builtin().unwrap();
        cart.add_to_cart(catalog.get("leather-wallet").unwrap(), 1);
        let later = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        assert_eq!(confirmation.render_on(&mut cart, later), ConfirmationView::Receipt(&first));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_methods_from_query() {
        let mut cart = two_item_cart();
        let mut confirmation = OrderConfirmation::new(ConfirmationQuery::from_query_string(
            "order-id=654321&shipping=express&payment=jazzcash-mobile",
        ));

        let ConfirmationView::Receipt(order) = confirmation.render_on(&mut cart, date()) else {
            panic!("expected a receipt");
        };

        assert_eq!(order.shipping_method, ShippingMethod::Express);
        assert_eq!(order.totals.shipping, EXPRESS_SHIPPING_RATE);
        assert_eq!(order.payment_method_label, "JazzCash Mobile Account");
    }

    #[test]
    fn test_malformed_marker_still_counts() {
        let query = ConfirmationQuery::from_query_string("order-id=abc");
        assert!(query.has_order_marker());
        assert!(query.parsed_order_id().is_none());

        let mut cart = two_item_cart();
        let mut confirmation = OrderConfirmation::new(query);
        let ConfirmationView::Receipt(order) = confirmation.render_on(&mut cart, date()) else {
            panic!("expected a receipt");
        };
        assert!(order.order_number().starts_with("AL-"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = ConfirmationQuery {
            order_id: Some("482913".to_string()),
            shipping_method: Some(ShippingMethod::Standard),
            payment_method: Some(PaymentMethod::JazzcashCard),
        };
        assert_eq!(
            query.to_query_string(),
            "order-id=482913&shipping=standard&payment=jazzcash-card"
        );
        assert_eq!(ConfirmationQuery::from_query_string(&query.to_query_string()), query);
    }
}
