//! Catalog products and cart line items.

use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Apparel,
    Accessories,
    Footwear,
    Industrial,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [
        Self::Apparel,
        Self::Accessories,
        Self::Footwear,
        Self::Industrial,
    ];

    /// The value used in storage and query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apparel => "apparel",
            Self::Accessories => "accessories",
            Self::Footwear => "footwear",
            Self::Industrial => "industrial",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apparel => "Apparel",
            Self::Accessories => "Accessories",
            Self::Footwear => "Footwear",
            Self::Industrial => "Industrial",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image reference (asset path).
    pub image: String,
    pub category: Category,
    pub color: String,
    pub featured: bool,
    /// Average rating, 0-5.
    pub rating: f32,
    pub review_count: u32,
    /// Date the product was added (ISO `YYYY-MM-DD`).
    pub date: NaiveDate,
}

/// A product in the cart.
///
/// Serializes as the product's fields plus `quantity`, which is the shape
/// kept in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart line for `quantity` units of `product`.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product id, which identifies the line.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
