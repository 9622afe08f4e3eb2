//! The checkout flow.
//!
//! Checkout is a linear three-step state machine:
//!
//! ```text
//! Shipping (1) -> Payment (2) -> Review (3) -> place order
//! ```
//!
//! Only leaving the shipping step is guarded: every required shipping field
//! must be filled and the email must be well formed. A failed check leaves
//! the step unchanged. Payment details are not validated.
//!
//! Placing an order schedules a simulated processing delay on a [`Timer`].
//! When it elapses a random [`OrderId`] is produced; the caller then
//! navigates to the confirmation view, which is responsible for clearing
//! the cart.

mod totals;
mod validation;

use std::time::Duration;

use leather_lane_core::{CartItem, CheckoutStep, OrderId, PaymentMethod, ShippingMethod};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::instrument;

use crate::cart::CartStore;
use crate::order::ConfirmationQuery;
use crate::storage::LocalStorage;
use crate::timer::{Timer, TimerHandle};

pub use totals::{
    EXPRESS_SHIPPING_RATE, FREE_SHIPPING_THRESHOLD, OrderTotals, STANDARD_SHIPPING_RATE, TAX_RATE,
    shipping_cost,
};
pub use validation::{
    DEFAULT_COUNTRY, PaymentInfo, ShippingField, ShippingInfo, ShippingValidationError,
};

/// How long simulated order processing takes.
pub const DEFAULT_ORDER_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Checkout errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout was entered with nothing in the cart.
    #[error("your cart is empty")]
    EmptyCart,

    /// The shipping step is incomplete.
    #[error(transparent)]
    Validation(#[from] ShippingValidationError),

    /// Orders can only be placed from the review step.
    #[error("cannot place an order from the {0} step")]
    NotAtReview(CheckoutStep),

    /// An order is already being processed.
    #[error("order is already being processed")]
    AlreadyProcessing,
}

/// What the checkout view shows when it loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPage {
    /// The cart is empty; show the empty state instead of a checkout.
    EmptyCart,
    Active(Checkout),
}

impl CheckoutPage {
    /// Enter checkout for the given cart.
    #[must_use]
    pub fn load<S: LocalStorage>(cart: &CartStore<S>) -> Self {
        if cart.is_empty() {
            tracing::debug!("Checkout entered with empty cart");
            Self::EmptyCart
        } else {
            Self::Active(Checkout::new())
        }
    }

    /// The checkout, if the cart had items.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for the empty state.
    pub fn into_checkout(self) -> Result<Checkout, CheckoutError> {
        match self {
            Self::EmptyCart => Err(CheckoutError::EmptyCart),
            Self::Active(checkout) => Ok(checkout),
        }
    }
}

/// Checkout form state for one visit to the checkout view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkout {
    step: CheckoutStep,
    shipping_info: ShippingInfo,
    payment_info: PaymentInfo,
    shipping_method: ShippingMethod,
    payment_method: PaymentMethod,
    processing: bool,
}

impl Checkout {
    /// A fresh checkout at the shipping step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn shipping_info(&self) -> &ShippingInfo {
        &self.shipping_info
    }

    pub const fn shipping_info_mut(&mut self) -> &mut ShippingInfo {
        &mut self.shipping_info
    }

    #[must_use]
    pub const fn payment_info(&self) -> &PaymentInfo {
        &self.payment_info
    }

    pub const fn payment_info_mut(&mut self) -> &mut PaymentInfo {
        &mut self.payment_info
    }

    #[must_use]
    pub const fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    pub const fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub const fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Whether an order is being processed.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// Totals for the current cart contents and shipping method.
    #[must_use]
    pub fn totals(&self, items: &[CartItem]) -> OrderTotals {
        OrderTotals::compute(items, self.shipping_method)
    }

    /// Advance to the next step, validating the current one.
    ///
    /// At the review step this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] if the shipping form is
    /// incomplete; the step does not change.
    #[instrument(skip(self), fields(step = %self.step))]
    pub fn next_step(&mut self) -> Result<CheckoutStep, CheckoutError> {
        if self.step == CheckoutStep::Shipping {
            if let Err(e) = self.shipping_info.validate() {
                tracing::info!(error = %e, "Shipping step rejected");
                return Err(e.into());
            }
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step. At the shipping step this is a no-op.
    pub fn previous_step(&mut self) -> CheckoutStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Place the order after `delay`.
    ///
    /// The cart is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout is not at the review step or an
    /// order is already being processed.
    #[instrument(skip(self, timer), fields(shipping = %self.shipping_method, payment = %self.payment_method))]
    pub fn place_order(&mut self, timer: &Timer, delay: Duration) -> Result<PendingOrder, CheckoutError> {
        if self.processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::NotAtReview(self.step));
        }

        self.processing = true;
        let (tx, rx) = oneshot::channel();
        let handle = timer.schedule(delay, move || {
            let order_id = OrderId::generate();
            tracing::info!(%order_id, "Order processed");
            // The receiver is gone if the shopper navigated away.
            let _ = tx.send(order_id);
        });

        tracing::info!(delay_ms = delay.as_millis(), "Processing order");
        Ok(PendingOrder {
            handle,
            rx,
            shipping_method: self.shipping_method,
            payment_method: self.payment_method,
        })
    }
}

/// An order waiting for simulated processing to finish.
#[derive(Debug)]
pub struct PendingOrder {
    handle: TimerHandle,
    rx: oneshot::Receiver<OrderId>,
    shipping_method: ShippingMethod,
    payment_method: PaymentMethod,
}

impl PendingOrder {
    /// Wait for processing to finish.
    ///
    /// Returns `None` if the order was cancelled.
    pub async fn completed(self) -> Option<OrderPlaced> {
        let order_id = self.rx.await.ok()?;
        Some(OrderPlaced {
            order_id,
            shipping_method: self.shipping_method,
            payment_method: self.payment_method,
        })
    }

    /// Abandon the order before processing finishes.
    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

/// A processed order, ready for the confirmation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

impl OrderPlaced {
    /// Navigation parameters for the confirmation view.
    #[must_use]
    pub fn confirmation_query(&self) -> ConfirmationQuery {
        ConfirmationQuery {
            order_id: Some(self.order_id.to_string()),
            shipping_method: Some(self.shipping_method),
            payment_method: Some(self.payment_method),
        }
    }

    /// Path of the confirmation view, e.g. `/order-success?order-id=482913&...`.
    #[must_use]
    pub fn redirect_path(&self) -> String {
        format!("/order-success?{}", self.confirmation_query().to_query_string())
    }
}
