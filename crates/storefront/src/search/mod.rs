//! Catalog search: filtering, sorting and pagination.
//!
//! The product listing is a pure function of the catalog and the
//! navigation query ([`derive_view`]). Filters are applied in a fixed
//! order (text, category, price range), then the sort, then pagination.
//! Sorts are stable, so ties keep catalog order.

mod suggestions;

use leather_lane_core::{Category, Price, Product};
use url::form_urlencoded;

use crate::catalog::Catalog;

pub use suggestions::{MAX_SUGGESTIONS, SuggestionDebouncer, Suggestions, suggest};

/// Products per listing page.
pub const PAGE_SIZE: usize = 9;

/// Upper price bound used when none is given.
pub const DEFAULT_MAX_PRICE: Price = Price::new(50_000);

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Featured products first, catalog order otherwise.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
    /// Most recently added first.
    Newest,
}

impl SortMode {
    /// Every sort mode, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Rating,
        Self::Newest,
    ];

    /// Parse a `sort` parameter. Unknown values fall back to featured.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }

    /// The `sort` parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Rating => "Top Rated",
            Self::Newest => "Newest",
        }
    }

    /// Sort `products` in place.
    pub fn apply(self, products: &mut [&Product]) {
        match self {
            Self::Featured => products.sort_by_key(|p| !p.featured),
            Self::PriceAsc => products.sort_by_key(|p| p.price),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            Self::Newest => products.sort_by(|a, b| b.date.cmp(&a.date)),
        }
    }
}

/// Navigation-encoded listing state.
///
/// Query parameters: `page`, `search`, `category`, `minPrice`, `maxPrice`,
/// `sort`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// 1-based page number.
    pub page: usize,
    pub search: String,
    /// Category value to match exactly, if any.
    pub category: Option<String>,
    pub min_price: Price,
    pub max_price: Price,
    pub sort: SortMode,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            category: None,
            min_price: Price::ZERO,
            max_price: DEFAULT_MAX_PRICE,
            sort: SortMode::Featured,
        }
    }
}

impl CatalogQuery {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Numbers that are missing, unparseable or not positive fall back to
    /// their defaults; unknown parameters are ignored. Fractional prices
    /// keep the same integer matches (`minPrice` rounds up, `maxPrice`
    /// rounds down) and a fractional page is truncated.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => {
                    parsed.page = positive_number(&value)
                        .map(f64::trunc)
                        .and_then(|n| usize::try_from(whole(n)).ok())
                        .filter(|n| *n != 0)
                        .unwrap_or(1);
                }
                "search" => parsed.search = value.into_owned(),
                "category" => {
                    parsed.category = Some(value.into_owned()).filter(|c| !c.is_empty());
                }
                "minPrice" => {
                    parsed.min_price = positive_number(&value)
                        .map_or(Price::ZERO, |n| Price::new(whole(n.ceil())));
                }
                "maxPrice" => {
                    parsed.max_price = positive_number(&value)
                        .map_or(DEFAULT_MAX_PRICE, |n| Price::new(whole(n.floor())));
                }
                "sort" => parsed.sort = SortMode::parse(&value),
                _ => {}
            }
        }

        parsed
    }

    /// Encode as a query string (without `?`), omitting default values.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.page != 1 {
            serializer.append_pair("page", &self.page.to_string());
        }
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        if let Some(category) = &self.category {
            serializer.append_pair("category", category);
        }
        if self.min_price != Price::ZERO {
            serializer.append_pair("minPrice", &self.min_price.as_u64().to_string());
        }
        if self.max_price != DEFAULT_MAX_PRICE {
            serializer.append_pair("maxPrice", &self.max_price.as_u64().to_string());
        }
        if self.sort != SortMode::Featured {
            serializer.append_pair("sort", self.sort.as_str());
        }
        serializer.finish()
    }

    /// The same query on another page.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Change the search text, returning to the first page.
    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// Toggle a category filter, returning to the first page.
    ///
    /// Selecting the active category clears the filter.
    #[must_use]
    pub fn toggle_category(&self, category: Category) -> Self {
        let category = if self.category.as_deref() == Some(category.as_str()) {
            None
        } else {
            Some(category.as_str().to_owned())
        };
        Self {
            category,
            page: 1,
            ..self.clone()
        }
    }

    /// Change the price range, returning to the first page.
    #[must_use]
    pub fn with_price_range(&self, min_price: Price, max_price: Price) -> Self {
        Self {
            min_price,
            max_price,
            page: 1,
            ..self.clone()
        }
    }

    /// Change the sort order, returning to the first page.
    #[must_use]
    pub fn with_sort(&self, sort: SortMode) -> Self {
        Self {
            sort,
            page: 1,
            ..self.clone()
        }
    }
}

/// Parse a positive decimal number, treating zero and garbage as absent.
fn positive_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Convert an already-rounded positive number, saturating at `u64::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(n: f64) -> u64 {
    n as u64
}

/// Whether a product's name or description contains `needle`
/// (already lowercased).
pub(crate) fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Filter and sort the catalog, without paginating.
#[must_use]
pub fn filter_products<'a>(catalog: &'a Catalog, query: &CatalogQuery) -> Vec<&'a Product> {
    let needle = query.search.to_lowercase();

    let mut products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| needle.is_empty() || matches_text(p, &needle))
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|category| p.category.as_str() == category)
        })
        .filter(|p| p.price >= query.min_price && p.price <= query.max_price)
        .collect();

    query.sort.apply(&mut products);
    products
}

/// One page of the product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    /// Products on the requested page.
    pub products: Vec<&'a Product>,
    /// Products matching the filters across all pages.
    pub total_count: usize,
    pub page: usize,
    pub total_pages: usize,
    /// Categories available for filtering.
    pub categories: Vec<Category>,
    pub query: CatalogQuery,
}

impl CatalogView<'_> {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page numbers for the pager.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> {
        1..=self.total_pages
    }
}

/// Derive the listing for `query` from the catalog.
///
/// A page past the end yields no products rather than an error.
#[must_use]
pub fn derive_view<'a>(catalog: &'a Catalog, query: &CatalogQuery) -> CatalogView<'a> {
    let filtered = filter_products(catalog, query);
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE);
    let start = query.page.saturating_sub(1).saturating_mul(PAGE_SIZE);

    let products = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();

    CatalogView {
        products,
        total_count,
        page: query.page,
        total_pages,
        categories: catalog.categories(),
        query: query.clone(),
    }
}
