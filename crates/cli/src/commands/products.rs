//! Catalog browsing commands.

use leather_lane_storefront::error::Result;
use leather_lane_storefront::search::CatalogQuery;
use leather_lane_storefront::state::Storefront;

/// Print one page of the product listing.
pub fn list(storefront: &Storefront, query: &CatalogQuery) {
    let view = storefront.view(query);

    if view.total_count == 0 {
        println!("No products found. Try adjusting your search or filters.");
        return;
    }

    println!(
        "Showing {} of {} products (page {} of {})",
        view.products.len(),
        view.total_count,
        view.page,
        view.total_pages
    );
    for product in &view.products {
        let marker = if product.featured { "*" } else { " " };
        println!(
            "{marker} {:<20} {:<32} {:>10}  {:<12} {:.1}",
            product.id.as_str(),
            product.name,
            product.price.to_string(),
            product.category.label(),
            product.rating
        );
    }

    if view.has_previous() {
        println!(
            "Previous: --query \"{}\"",
            view.query.with_page(view.page - 1).to_query_string()
        );
    }
    if view.has_next() {
        println!(
            "Next: --query \"{}\"",
            view.query.with_page(view.page + 1).to_query_string()
        );
    }
}

/// Print a product's details.
pub fn show(storefront: &Storefront, id: &str) -> Result<()> {
    let product = storefront.product(id)?;
    let in_cart = storefront
        .cart()
        .get(&product.id)
        .map_or(0, |item| item.quantity);

    println!("{}", product.name);
    println!("{}", product.price);
    println!(
        "{:.1} stars ({} reviews)",
        product.rating, product.review_count
    );
    println!("Category: {}", product.category.label());
    println!("Color: {}", product.color);
    println!();
    println!("{}", product.description);
    if in_cart > 0 {
        println!();
        println!("In your cart: {in_cart}");
    }
    Ok(())
}

/// Type `text` one character at a time and print the suggestions shown
/// once typing pauses.
pub async fn suggest(storefront: &Storefront, text: &str) {
    if text.trim().is_empty() {
        println!("No suggestions.");
        return;
    }

    let mut debouncer = storefront.suggestion_debouncer();
    let mut rx = debouncer.subscribe();

    let mut typed = String::with_capacity(text.len());
    for c in text.chars() {
        typed.push(c);
        debouncer.input(typed.clone());
    }

    if rx.changed().await.is_err() {
        return;
    }
    let suggestions = rx.borrow_and_update().clone();

    if suggestions.products.is_empty() {
        println!("No suggestions for \"{}\".", suggestions.query);
        return;
    }
    for product in &suggestions.products {
        println!("{:<20} {:<32} {}", product.id.as_str(), product.name, product.price);
    }
}
