//! # Kiosk Pages
//!
//! One module per page. Each page owns its view state and talks to the
//! store through the narrowest trait it needs.
//!
//! ## Page Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports, notices)
//! ├── purchase.rs  ◄─── Storefront: select, pay, done
//! ├── admin.rs     ◄─── Product CRUD with form validation
//! └── history.rs   ◄─── Transaction log, newest first
//! ```
//!
//! ## Store Seams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PurchaseFlow<S: VendingStore>     products + transactions + purchase   │
//! │  AdminPanel<S: ProductStore>       products only                        │
//! │  HistoryView<S: TransactionStore>  transactions only                    │
//! │                                                                         │
//! │  S = ApiClient in the binary, MemoryStore in tests                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod history;
pub mod purchase;

pub use admin::AdminPanel;
pub use history::HistoryView;
pub use purchase::PurchaseFlow;

use std::fmt;

/// Transient feedback shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(m) => write!(f, "✓ {}", m),
            Notice::Error(m) => write!(f, "✗ {}", m),
        }
    }
}
