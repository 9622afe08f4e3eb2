//! Checkout form state and shipping validation.

use core::fmt;

use leather_lane_core::{Email, EmailError};
use thiserror::Error;

use crate::notification::Notification;

/// Country preselected on the shipping form.
pub const DEFAULT_COUNTRY: &str = "Pakistan";

/// A required field of the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// Every required field, in form order.
    pub const REQUIRED: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
    ];

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State/Province",
            Self::ZipCode => "ZIP/Postal Code",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingInfo {
    /// Current value of a required field.
    #[must_use]
    pub fn field(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
        }
    }

    /// Replace the value of a required field.
    pub fn set_field(&mut self, field: ShippingField, value: impl Into<String>) {
        let slot = match field {
            ShippingField::FirstName => &mut self.first_name,
            ShippingField::LastName => &mut self.last_name,
            ShippingField::Email => &mut self.email,
            ShippingField::Phone => &mut self.phone,
            ShippingField::Address => &mut self.address,
            ShippingField::City => &mut self.city,
            ShippingField::State => &mut self.state,
            ShippingField::ZipCode => &mut self.zip_code,
        };
        *slot = value.into();
    }

    /// Required fields left empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ShippingField> {
        ShippingField::REQUIRED
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    /// Check that every required field is filled and the email is well formed.
    ///
    /// # Errors
    ///
    /// Missing fields are reported before a malformed email.
    pub fn validate(&self) -> Result<Email, ShippingValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ShippingValidationError::MissingFields(missing));
        }
        Ok(Email::parse(&self.email)?)
    }
}

/// Payment form contents. Not validated before an order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInfo {
    pub mobile_number: String,
    pub same_as_shipping: bool,
}

impl Default for PaymentInfo {
    fn default() -> Self {
        Self {
            mobile_number: String::new(),
            same_as_shipping: true,
        }
    }
}

/// Why the shipping step cannot be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingValidationError {
    #[error("missing required fields: {}", join_labels(.0))]
    MissingFields(Vec<ShippingField>),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

impl ShippingValidationError {
    /// The notification shown to the shopper.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::MissingFields(_) => Notification::destructive(
                "Missing information",
                "Please fill in all required fields.",
            ),
            Self::InvalidEmail(_) => Notification::destructive(
                "Invalid email",
                "Please enter a valid email address.",
            ),
        }
    }
}

fn join_labels(fields: &[ShippingField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
