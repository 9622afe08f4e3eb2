//! Order totals.
//!
//! Totals are never cached: callers recompute them from the live cart
//! whenever they are shown.

use leather_lane_core::{Amount, CartItem, Price, ShippingMethod};
use rust_decimal::Decimal;

/// Standard shipping is free when the subtotal is strictly above this.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(30_000);

/// Flat standard shipping rate below the free-shipping threshold.
pub const STANDARD_SHIPPING_RATE: Price = Price::new(3_000);

/// Flat express shipping rate, charged regardless of subtotal.
pub const EXPRESS_SHIPPING_RATE: Price = Price::new(4_500);

/// Sales tax applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal, shipping, tax and grand total of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Amount,
    pub total: Amount,
}

impl OrderTotals {
    /// Compute totals for `items` shipped with `method`.
    #[must_use]
    pub fn compute(items: &[CartItem], method: ShippingMethod) -> Self {
        let subtotal: Price = items.iter().map(CartItem::line_total).sum();
        let shipping = shipping_cost(subtotal, method);
        let tax = Amount::percentage_of(subtotal, TAX_RATE);
        let total = Amount::from(subtotal) + shipping + tax;

        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }

    /// Whether shipping is free.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping == Price::ZERO
    }
}

/// Shipping charge for a subtotal.
#[must_use]
pub fn shipping_cost(subtotal: Price, method: ShippingMethod) -> Price {
    match method {
        ShippingMethod::Express => EXPRESS_SHIPPING_RATE,
        ShippingMethod::Standard if subtotal > FREE_SHIPPING_THRESHOLD => Price::ZERO,
        ShippingMethod::Standard => STANDARD_SHIPPING_RATE,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn line(id: &str, quantity: u32) -> CartItem {
        let product = Catalog::builtin().unwrap().get(id).cloned().unwrap();
        CartItem::new(product, quantity)
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        assert_eq!(shipping_cost(Price::new(32_000), ShippingMethod::Standard), Price::ZERO);
    }

    #[test]
    fn test_standard_rate_below_threshold() {
        assert_eq!(
            shipping_cost(Price::new(10_000), ShippingMethod::Standard),
            Price::new(3_000)
        );
    }

    #[test]
    fn test_threshold_itself_is_not_free() {
        assert_eq!(
            shipping_cost(Price::new(30_000), ShippingMethod::Standard),
            STANDARD_SHIPPING_RATE
        );
    }

    #[test]
    fn test_express_always_charged() {
        assert_eq!(
            shipping_cost(Price::new(100_000), ShippingMethod::Express),
            Price::new(4_500)
        );
    }

    #[test]
    fn test_compute() {
        // 2 x 14,500 + 3,500 = 32,500
        let items = [line("leather-handbag", 2), line("leather-wallet", 1)];

        let totals = OrderTotals::compute(&items, ShippingMethod::Standard);

        assert_eq!(totals.subtotal, Price::new(32_500));
        assert!(totals.free_shipping());
        assert_eq!(totals.tax, Amount::new(Decimal::new(2_600, 0)));
        assert_eq!(totals.total, Amount::new(Decimal::new(35_100, 0)));
        assert_eq!(totals.total.to_string(), "Rs 35,100");
    }

    #[test]
    fn test_compute_with_fractional_tax() {
        // Catalog prices all give whole-rupee tax.
        let mut wallet = line("leather-wallet", 1);
        wallet.product.price = Price::new(12_345);

        let totals = OrderTotals::compute(&[wallet], ShippingMethod::Express);

        assert_eq!(totals.tax.to_string(), "Rs 987.6");
        assert_eq!(totals.total.to_string(), "Rs 17,832.6");
    }

    #[test]
    fn test_empty_cart() {
        let totals = OrderTotals::compute(&[], ShippingMethod::Standard);
        assert_eq!(totals.subtotal, Price::ZERO);
        assert_eq!(totals.shipping, STANDARD_SHIPPING_RATE);
    }
}
