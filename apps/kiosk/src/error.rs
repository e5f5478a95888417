//! # Kiosk Error Type
//!
//! Unified error type for the kiosk pages.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk                              │
//! │                                                                         │
//! │  ClientError (any)      ──► ErrorCode::Network                          │
//! │    detail logged by client      message: one generic text per action    │
//! │                                 e.g. "Gagal memuat produk"              │
//! │                                                                         │
//! │  FieldErrors            ──► ErrorCode::Validation                       │
//! │                                 message: every field, localized         │
//! │                                                                         │
//! │  PurchaseError                                                          │
//! │    OutOfStock           ──► ErrorCode::OutOfStock                       │
//! │    InsufficientFunds    ──► ErrorCode::InsufficientFunds                │
//! │                                 "Uang tidak cukup! Kurang Rp3.000"      │
//! │    everything else      ──► ErrorCode::InvalidState                     │
//! │                                                                         │
//! │  ConfigError            ──► ErrorCode::Config                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A 400 and a 503 from the store look the same to the customer. The
//! distinction only exists in the logs.

use std::path::PathBuf;
use thiserror::Error;

use vending_client::ClientError;
use vending_core::{CoreError, FieldErrors, PurchaseError};

use crate::messages;

/// Error returned from kiosk pages.
///
/// `message` is what the customer sees; `code` is for programmatic handling
/// (exit codes, tests).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct KioskError {
    pub code: ErrorCode,
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Store unreachable or answered with a failure status
    Network,

    /// Product form failed validation
    Validation,

    /// Selected product has no stock
    OutOfStock,

    /// Inserted money does not cover the price
    InsufficientFunds,

    /// Action not valid in the current wizard step
    InvalidState,

    /// Configuration could not be loaded
    Config,
}

impl KioskError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        KioskError {
            code,
            message: message.into(),
        }
    }

    /// Collapses a store failure into the generic message for the action
    /// that failed. The client has already logged the detail at `error`.
    pub fn network(err: &ClientError, message: &str) -> Self {
        tracing::debug!(error = %err, status = ?err.status(), "{}", message);
        KioskError::new(ErrorCode::Network, message)
    }

    pub fn validation(errors: &FieldErrors) -> Self {
        KioskError::new(ErrorCode::Validation, messages::field_errors(errors))
    }
}

/// Converts wizard rule violations to customer messages.
impl From<PurchaseError> for KioskError {
    fn from(err: PurchaseError) -> Self {
        let code = match err {
            PurchaseError::OutOfStock { .. } => ErrorCode::OutOfStock,
            PurchaseError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            _ => ErrorCode::InvalidState,
        };
        KioskError::new(code, messages::purchase_error(&err))
    }
}

impl From<FieldErrors> for KioskError {
    fn from(errors: FieldErrors) -> Self {
        KioskError::validation(&errors)
    }
}

/// Converts core errors to kiosk errors.
impl From<CoreError> for KioskError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Purchase(e) => e.into(),
            CoreError::InvalidForm(errors) => KioskError::validation(&errors),
            CoreError::Validation(e) => {
                KioskError::new(ErrorCode::Validation, messages::field_error(&e))
            }
            CoreError::ProductNotFound(id) => KioskError::new(
                ErrorCode::InvalidState,
                messages::product_not_found(&id),
            ),
        }
    }
}

impl From<ConfigError> for KioskError {
    fn from(err: ConfigError) -> Self {
        KioskError::new(ErrorCode::Config, err.to_string())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for kiosk pages.
pub type KioskResult<T> = Result<T, KioskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use vending_core::{Money, ValidationError};

    struct ErrorEvents(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            if *meta.level() == Level::ERROR && meta.target().starts_with("vending") {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_network_error_is_not_logged_again() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorEvents(count.clone()));

        let err = ClientError::Status {
            method: "GET".to_string(),
            path: "/products".to_string(),
            status: 503,
        };
        tracing::subscriber::with_default(subscriber, || {
            KioskError::network(&err, messages::FETCH_PRODUCTS_FAILED);
        });

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_any_status_gives_same_message() {
        let statuses = [400u16, 404, 500, 503];
        let messages: Vec<String> = statuses
            .iter()
            .map(|status| {
                let err = if *status == 404 {
                    ClientError::NotFound {
                        path: "/products".to_string(),
                    }
                } else {
                    ClientError::Status {
                        method: "GET".to_string(),
                        path: "/products".to_string(),
                        status: *status,
                    }
                };
                KioskError::network(&err, messages::FETCH_PRODUCTS_FAILED).message
            })
            .collect();

        assert!(messages.iter().all(|m| m == "Gagal memuat produk"));
    }

    #[test]
    fn test_purchase_error_codes() {
        let err: KioskError = PurchaseError::InsufficientFunds {
            price: Money::from_rupiah(8000),
            inserted: Money::from_rupiah(5000),
            shortfall: Money::from_rupiah(3000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert_eq!(err.message, "Uang tidak cukup! Kurang Rp3.000");

        let err: KioskError = PurchaseError::OutOfStock {
            name: "Aqua".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(err.message, "Maaf, produk ini stok habis!");
    }

    #[test]
    fn test_validation_error_is_localized() {
        let errors = FieldErrors::from(ValidationError::TooShort {
            field: "name".to_string(),
            min: 3,
        });
        let err: KioskError = errors.into();
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, "Nama minimal 3 karakter");
    }
}
