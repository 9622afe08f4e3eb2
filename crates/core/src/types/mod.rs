//! Core types for Leather Lane.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod checkout;
pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use checkout::{CheckoutStep, PaymentMethod, ShippingMethod};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Amount, Price};
pub use product::{CartItem, Category, Product};
