//! Type-safe money representation.
//!
//! Catalog prices are whole rupee amounts ([`Price`]). Anything derived
//! with a percentage, such as tax, may carry a fractional part and is an
//! [`Amount`] backed by decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A whole-rupee price, as listed in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a new price from a whole rupee amount.
    #[must_use]
    pub const fn new(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Get the whole rupee amount.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Convert to a decimal [`Amount`].
    #[must_use]
    pub fn to_amount(self) -> Amount {
        Amount::from(self)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_amount(), f)
    }
}

/// A computed money amount that may carry a fractional part (tax, totals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// An amount of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new amount.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// `rate` applied to `price` (e.g. a rate of `0.08` for 8% tax).
    #[must_use]
    pub fn percentage_of(price: Price, rate: Decimal) -> Self {
        Self(Decimal::from(price.as_u64()) * rate)
    }
}

impl From<Price> for Amount {
    fn from(price: Price) -> Self {
        Self(Decimal::from(price.as_u64()))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<Price> for Amount {
    type Output = Self;

    fn add(self, rhs: Price) -> Self::Output {
        self + Self::from(rhs)
    }
}

/// Formats as `Rs 1,234` or `Rs 1,167.92`: thousands separators and at
/// most two fraction digits, trailing zeros dropped.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.round_dp(2).normalize().to_string();
        let (whole, fraction) = text
            .split_once('.')
            .map_or((text.as_str(), None), |(w, fr)| (w, Some(fr)));

        let (sign, digits) = whole
            .strip_prefix('-')
            .map_or(("", whole), |rest| ("-", rest));

        write!(f, "{sign}Rs {}", group_thousands(digits))?;
        if let Some(fraction) = fraction {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_times_and_sum() {
        let total: Price = [Price::new(14_500).times(2), Price::new(3_000)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(32_000));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(0).to_string(), "Rs 0");
        assert_eq!(Price::new(950).to_string(), "Rs 950");
        assert_eq!(Price::new(29_500).to_string(), "Rs 29,500");
        assert_eq!(Price::new(1_234_567).to_string(), "Rs 1,234,567");
    }

    #[test]
    fn test_amount_display_keeps_fraction() {
        let tax = Amount::percentage_of(Price::new(14_599), Decimal::new(8, 2));
        assert_eq!(tax.value(), Decimal::new(116_792, 2));
        assert_eq!(tax.to_string(), "Rs 1,167.92");
    }

    #[test]
    fn test_amount_display_drops_zero_fraction() {
        let tax = Amount::percentage_of(Price::new(14_500), Decimal::new(8, 2));
        assert_eq!(tax.to_string(), "Rs 1,160");
    }

    #[test]
    fn test_price_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Price::new(18_500)).unwrap(), "18500");
        let price: Price = serde_json::from_str("24500").unwrap();
        assert_eq!(price, Price::new(24_500));
    }
}
