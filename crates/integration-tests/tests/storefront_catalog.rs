//! Integration tests for catalog browsing.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use leather_lane_core::{Category, Price};
use leather_lane_integration_tests::TestContext;
use leather_lane_storefront::search::{CatalogQuery, PAGE_SIZE, SortMode, filter_products};

// =============================================================================
// Listing Tests
// =============================================================================

#[tokio::test]
async fn test_default_listing_puts_featured_first() {
    let ctx = TestContext::new();
    let storefront = ctx.open().unwrap();

    let view = storefront.view(&CatalogQuery::default());

    assert_eq!(view.total_count, storefront.catalog().len());
    assert_eq!(view.products.len(), PAGE_SIZE);
    let featured = storefront.catalog().featured().count();
    assert!(view.products.iter().take(featured).all(|p| p.featured));
    assert!(view.products.iter().skip(featured).all(|p| !p.featured));
}

#[tokio::test]
async fn test_price_window_sorted_ascending() {
    let ctx = TestContext::new();
    let storefront = ctx.open().unwrap();

    let query = CatalogQuery::from_query_string("?minPrice=15000&maxPrice=25000&sort=price-asc");
    let view = storefront.view(&query);

    let prices: Vec<Price> = view.products.iter().map(|p| p.price).collect();
    assert_eq!(
        prices,
        vec![Price::new(16_500), Price::new(18_500), Price::new(24_500)]
    );
}

#[tokio::test]
async fn test_filters_combine() {
    let ctx = TestContext::new();
    let storefront = ctx.open().unwrap();

    let query = CatalogQuery::default()
        .with_search("leather")
        .toggle_category(Category::Accessories)
        .with_price_range(Price::new(4_000), Price::new(20_000))
        .with_sort(SortMode::PriceDesc);
    let ids: Vec<&str> = filter_products(storefront.catalog(), &query)
        .iter()
        .map(|p| p.id.as_str())
        .collect();

    assert_eq!(ids, vec!["leather-handbag", "leather-belt"]);
}

#[tokio::test]
async fn test_paging_through_listing_visits_every_product_once() {
    let ctx = TestContext::new();
    let storefront = ctx.open().unwrap();
    let first = storefront.view(&CatalogQuery::default().with_sort(SortMode::Newest));

    let mut seen = Vec::new();
    for page in first.page_numbers() {
        let view = storefront.view(&first.query.with_page(page));
        seen.extend(view.products.iter().map(|p| p.id.clone()));
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), storefront.catalog().len());
}

#[tokio::test]
async fn test_listing_query_survives_navigation() {
    let query = CatalogQuery::default()
        .with_search("boots")
        .with_sort(SortMode::Rating)
        .with_page(2);

    let restored = CatalogQuery::from_query_string(&format!("?{}", query.to_query_string()));

    assert_eq!(restored, query);
}

// =============================================================================
// Product Detail Tests
// =============================================================================

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::new();
    let storefront = ctx.open().unwrap();

    let err = storefront.product("leather-hat").unwrap_err();

    assert_eq!(err.user_message(), "Product leather-hat not found");
}

// =============================================================================
// Suggestion Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_suggestions_debounce_typing() {
    let ctx = TestContext::new();
    let storefront = ctx.open().unwrap();
    let mut debouncer = storefront.suggestion_debouncer();
    let mut rx = debouncer.subscribe();

    for typed in ["g", "gl", "glo", "glov"] {
        debouncer.input(typed);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    rx.changed().await.unwrap();
    let suggestions = rx.borrow_and_update().clone();

    assert_eq!(suggestions.query, "glov");
    let ids: Vec<&str> = suggestions.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["welding-gloves"]);
}
