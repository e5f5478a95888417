//! # Client Error Types
//!
//! Error types for data store requests.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / non-2xx status / bad JSON                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← Keeps method, path and status for logs    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KioskError (in app) ← One generic localized message per operation      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Customer sees e.g. "Gagal memuat produk"                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Data store request errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    ///
    /// ## When This Occurs
    /// - Store not running (connection refused)
    /// - Timeout elapsed
    /// - TLS or DNS failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status other than 404.
    #[error("{method} {path} returned status {status}")]
    Status {
        method: String,
        path: String,
        status: u16,
    },

    /// Response body was not the JSON we expected.
    #[error("Could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL cannot be used to build request URLs.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The store answered 404.
    #[error("Not found: {path}")]
    NotFound { path: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// HTTP status, when the store answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result type for data store operations.
pub type ClientResult<T> = Result<T, ClientError>;
