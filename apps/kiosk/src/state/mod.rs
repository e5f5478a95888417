//! # Kiosk State
//!
//! Read-only settings shared by every page. Configuration is loaded once
//! at startup and never mutated afterwards, so no locking is needed.

pub mod config;

pub use config::{ApiSettings, KioskConfig, PurchaseSettings};
