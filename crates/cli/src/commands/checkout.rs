//! The checkout command.
//!
//! Walks the three checkout steps with the details given on the command
//! line, waits for the order to be processed and then shows the
//! confirmation exactly as a redirect from checkout would.

use leather_lane_core::{PaymentMethod, ShippingMethod};
use leather_lane_storefront::checkout::{Checkout, CheckoutError, DEFAULT_COUNTRY, ShippingInfo};
use leather_lane_storefront::error::{AppError, Result};
use leather_lane_storefront::state::Storefront;

use super::order;

/// Shipping and payment details.
///
/// Empty values are accepted here and rejected by the shipping step.
#[derive(clap::Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    address: String,

    #[arg(long, default_value = "")]
    city: String,

    /// State or province
    #[arg(long, default_value = "")]
    state: String,

    /// ZIP or postal code
    #[arg(long, default_value = "")]
    zip_code: String,

    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,

    /// `standard` or `express`
    #[arg(long, default_value_t = ShippingMethod::Standard)]
    shipping: ShippingMethod,

    /// `jazzcash-card`, `jazzcash-mobile` or `easypaisa`
    #[arg(long, default_value_t = PaymentMethod::JazzcashCard)]
    payment: PaymentMethod,

    /// Mobile account number for wallet payments
    #[arg(long, default_value = "")]
    mobile_number: String,
}

impl CheckoutArgs {
    fn fill(self, checkout: &mut Checkout) {
        *checkout.shipping_info_mut() = ShippingInfo {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
        };
        checkout.payment_info_mut().mobile_number = self.mobile_number;
        checkout.set_shipping_method(self.shipping);
        checkout.set_payment_method(self.payment);
    }
}

/// Run checkout to completion.
pub async fn run(storefront: &mut Storefront, args: CheckoutArgs) -> Result<()> {
    let mut checkout = storefront.begin_checkout().into_checkout().inspect_err(|_| {
        println!("Your cart is empty. Add some products before checking out.");
    })?;
    args.fill(&mut checkout);

    print_step(&checkout);
    if let Err(e) = checkout.next_step() {
        if let CheckoutError::Validation(validation) = &e {
            println!("{}", validation.notification());
        }
        return Err(e.into());
    }

    print_step(&checkout);
    checkout.next_step()?;

    print_step(&checkout);
    print_review(storefront, &checkout);

    let pending = checkout.place_order(
        storefront.timer(),
        storefront.config().order_processing_delay,
    )?;
    println!("Processing...");

    let placed = pending
        .completed()
        .await
        .ok_or_else(|| AppError::Internal("order processing was cancelled".to_string()))?;
    tracing::info!(path = %placed.redirect_path(), "Order placed");

    order::show(storefront, placed.confirmation_query());
    Ok(())
}

fn print_step(checkout: &Checkout) {
    let step = checkout.step();
    println!("Step {} of 3: {}", step.number(), step.name());
}

fn print_review(storefront: &Storefront, checkout: &Checkout) {
    let info = checkout.shipping_info();
    let items = storefront.cart().items();
    let totals = checkout.totals(items);

    println!("  Ship to: {} {}", info.first_name, info.last_name);
    println!("           {}", info.address);
    println!("           {}, {} {}", info.city, info.state, info.zip_code);
    println!("           {}", info.country);
    println!(
        "  Shipping: {} ({})",
        checkout.shipping_method().label(),
        checkout.shipping_method().delivery_estimate()
    );
    println!("  Payment:  {}", checkout.payment_method().label());
    println!();
    for item in items {
        println!(
            "  {} x {:<32} {:>10}",
            item.quantity,
            item.product.name,
            item.line_total().to_string()
        );
    }
    println!("  Subtotal: {}", totals.subtotal);
    if totals.free_shipping() {
        println!("  Shipping: Free");
    } else {
        println!("  Shipping: {}", totals.shipping);
    }
    println!("  Tax (8%): {}", totals.tax);
    println!("  Total:    {}", totals.total);
}
