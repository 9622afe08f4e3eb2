//! Cart commands.

use leather_lane_storefront::error::Result;
use leather_lane_storefront::state::Storefront;

/// Print the cart.
pub fn show(storefront: &Storefront) {
    let cart = storefront.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        println!(
            "{:<20} {:<32} {:>3} x {:>10} = {:>10}",
            item.id().as_str(),
            item.product.name,
            item.quantity,
            item.product.price.to_string(),
            item.line_total().to_string()
        );
    }
    println!();
    println!("Items: {}", cart.item_count());
    println!("Subtotal: {}", cart.subtotal());
}

pub fn add(storefront: &mut Storefront, id: &str, quantity: u32) -> Result<()> {
    storefront.add_product_to_cart(id, quantity)?;
    let name = &storefront.product(id)?.name;
    println!("Added to cart: {quantity} x {name}");
    Ok(())
}

pub fn update(storefront: &mut Storefront, id: &str, quantity: u32) -> Result<()> {
    storefront.update_cart_quantity(id, quantity)?;
    show(storefront);
    Ok(())
}

pub fn remove(storefront: &mut Storefront, id: &str) {
    storefront.remove_from_cart(id);
    show(storefront);
}

pub fn clear(storefront: &mut Storefront) {
    storefront.cart_mut().clear_cart();
    println!("Cart cleared.");
}
