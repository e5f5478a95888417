//! # vending-core: Pure Business Logic for the Vending Kiosk
//!
//! This crate is the **heart** of the kiosk. It contains the purchase wizard,
//! money handling and product validation as pure functions and state
//! machines with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vending Kiosk Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Kiosk (apps/kiosk)                           │   │
//! │  │    Shop ──► Admin ──► History          (CLI pages)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vending-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  wizard   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Session  │  │   rules   │  │   │
//! │  │   │Transaction│  │Denomination│ │   Step    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                vending-client (Data Store Layer)                │   │
//! │  │              GET/POST/PUT/PATCH/DELETE over JSON                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Product, Transaction, forms and patches)
//! - [`money`] - Rupiah money type with integer arithmetic
//! - [`denomination`] - The fixed set of insertable notes
//! - [`wizard`] - Purchase wizard state machine (select → pay → done)
//! - [`history`] - Transaction log ordering
//! - [`validation`] - Product form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vending_core::{Denomination, Money};
//!
//! let inserted: Money = [Denomination::Rp5000, Denomination::Rp5000]
//!     .iter()
//!     .map(|d| d.value())
//!     .sum();
//!
//! let price = Money::from_rupiah(8000);
//! assert_eq!((inserted - price).to_string(), "Rp2.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod denomination;
pub mod error;
pub mod history;
pub mod money;
pub mod types;
pub mod validation;
pub mod wizard;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use denomination::Denomination;
pub use error::{CoreError, CoreResult, FieldErrors, PurchaseError, ValidationError};
pub use money::Money;
pub use types::*;
pub use wizard::{PaymentPlan, PurchaseSession, Step};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum product name length, in characters.
pub const PRODUCT_NAME_MIN_LENGTH: usize = 3;

/// Maximum product name length, in characters.
pub const PRODUCT_NAME_MAX_LENGTH: usize = 50;

/// Lowest price an admin may set, in rupiah.
pub const MINIMUM_PRICE: i64 = 1000;

/// Lowest stock an admin may set.
pub const MINIMUM_STOCK: i64 = 0;
