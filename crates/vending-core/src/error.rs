//! # Error Types
//!
//! Domain-specific error types for vending-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vending-core errors (this file)                                        │
//! │  ├── CoreError        - Umbrella for domain failures                    │
//! │  ├── PurchaseError    - Wizard rule violations                          │
//! │  ├── ValidationError  - One field constraint failure                    │
//! │  └── FieldErrors      - Every failing field of one form                 │
//! │                                                                         │
//! │  vending-client errors (separate crate)                                 │
//! │  └── ClientError      - HTTP / decode failures                          │
//! │                                                                         │
//! │  Kiosk errors (in app)                                                  │
//! │  └── KioskError       - What the customer sees (localized)              │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → CoreError → KioskError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages here are English and meant for logs. The kiosk owns the
//! Indonesian wording shown to customers.

use std::fmt;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A purchase wizard rule was violated.
    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    /// A single field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A product form had one or more invalid fields.
    #[error("Invalid product form: {0}")]
    InvalidForm(#[from] FieldErrors),

    /// Product id is not in the loaded list.
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

// =============================================================================
// Purchase Error
// =============================================================================

/// Purchase wizard rule violations.
///
/// ## Where Each Occurs
/// ```text
///  SELECT ──select_product──► OutOfStock
///    │                        InvalidStep (not in SELECT)
///    │ advance
///    ▼
///  PAY ──propose_money──────► InvalidDenomination, MoneyAlreadyPending
///    │   commit/cancel ─────► NoPendingMoney
///    │ prepare_payment ─────► InsufficientFunds { shortfall }
///    ▼                        NoProductSelected
///  DONE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The chosen product has no stock left.
    #[error("Product {name} is out of stock")]
    OutOfStock { name: String },

    /// Inserted money does not cover the price.
    #[error("Insufficient funds: price {price}, inserted {inserted}, short by {shortfall}")]
    InsufficientFunds {
        price: Money,
        inserted: Money,
        shortfall: Money,
    },

    /// Payment attempted without a selected product.
    #[error("No product selected")]
    NoProductSelected,

    /// Operation is not valid at the current wizard step.
    #[error("Cannot {operation} during step {step}")]
    InvalidStep {
        operation: &'static str,
        step: &'static str,
    },

    /// A denomination is already waiting for confirmation.
    #[error("Another amount ({pending}) is waiting for confirmation")]
    MoneyAlreadyPending { pending: Money },

    /// Confirm or cancel without a pending amount.
    #[error("No amount is waiting for confirmation")]
    NoPendingMoney,

    /// Amount is not one of the accepted notes.
    #[error("Rp{0} is not an accepted denomination")]
    InvalidDenomination(i64),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (not a number, not an integer, bad URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Every field failure of one form, in field order.
///
/// A form is rejected as a whole; callers show each entry next to its field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct FieldErrors {
    errors: Vec<ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// First failure recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        FieldErrors {
            errors: vec![error],
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for wizard transitions.
pub type PurchaseResult<T> = Result<T, PurchaseError>;
