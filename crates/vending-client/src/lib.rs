//! # vending-client: Data Store Layer for the Vending Kiosk
//!
//! This crate talks to the REST JSON data store (a `json-server` style API)
//! that holds the product and transaction collections.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Kiosk Data Flow                          │
//! │                                                                         │
//! │  PurchaseFlow / AdminPanel / HistoryView (apps/kiosk)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  vending-client (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ApiClient   │    │  Repositories │    │ MemoryStore  │  │   │
//! │  │   │  (client.rs)  │    │ (product.rs)  │    │ (memory.rs)  │  │   │
//! │  │   │               │◄───│ (transaction) │    │  tests and   │  │   │
//! │  │   │ reqwest, ids, │    │               │    │  demos       │  │   │
//! │  │   │ status checks │    └───────────────┘    └──────────────┘  │   │
//! │  │   └───────────────┘                                           │   │
//! │  │         ▲  ProductStore + TransactionStore = VendingStore      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             REST store  (default http://localhost:3001)         │   │
//! │  │             /products          /transactions                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - HTTP client creation and request plumbing
//! - [`repository`] - Store traits and the HTTP repositories
//! - [`memory`] - In-memory store with fault injection
//! - [`error`] - Client error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vending_client::{ApiClient, ApiConfig, ProductStore};
//!
//! let client = ApiClient::new(ApiConfig::new("http://localhost:3001"))?;
//! let products = client.list_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod memory;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, ClientResult};
pub use memory::MemoryStore;

pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
pub use repository::{ProductStore, TransactionStore, VendingStore};
