//! The order confirmation command.

use leather_lane_storefront::order::{ConfirmationQuery, ConfirmationView, Order, OrderConfirmation};
use leather_lane_storefront::state::Storefront;

/// Render the confirmation view.
pub fn show(storefront: &mut Storefront, query: ConfirmationQuery) {
    let mut confirmation = OrderConfirmation::new(query);
    match confirmation.render(storefront.cart_mut()) {
        ConfirmationView::NoOrder => {
            println!("No Order Found");
            println!(
                "It looks like you haven't placed an order yet or have accessed this page directly."
            );
        }
        ConfirmationView::Receipt(order) => print_receipt(order),
    }
}

fn print_receipt(order: &Order) {
    println!("Thank You for Your Order!");
    println!("Order Number: {}", order.order_number());
    println!("Date: {}", order.formatted_date());
    println!("Payment Method: {}", order.payment_method_label);
    println!(
        "Shipping Method: {} ({})",
        order.shipping_method.label(),
        order.shipping_method.delivery_estimate()
    );
    println!();

    for item in &order.items {
        println!(
            "{} x {:<32} {:>10}",
            item.quantity,
            item.product.name,
            item.line_total().to_string()
        );
    }

    let totals = &order.totals;
    println!("Subtotal: {}", totals.subtotal);
    if totals.free_shipping() {
        println!("Shipping: Free");
    } else {
        println!("Shipping: {}", totals.shipping);
    }
    println!("Tax: {}", totals.tax);
    println!("Total: {}", totals.total);
}
