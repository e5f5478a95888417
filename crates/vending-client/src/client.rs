//! # API Client
//!
//! HTTP client creation and the request plumbing shared by the repositories.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Store Request                                │
//! │                                                                         │
//! │  repository call (e.g. products().list())                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  endpoint(["products"]) ──► http://localhost:3001/products              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  headers: x-request-id: <uuid v4>                                       │
//! │           cache-control: no-cache        (GET only)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status 2xx ──► decode JSON body                                        │
//! │  status 404 ──► ClientError::NotFound                                   │
//! │  otherwise  ──► ClientError::Status                                     │
//! │                                                                         │
//! │  No retries. A failure is returned once and the caller reports it.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::repository::product::ProductRepository;
use crate::repository::transaction::TransactionRepository;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Configuration
// =============================================================================

/// Data store connection settings.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use vending_client::ApiConfig;
///
/// let config = ApiConfig::new("http://localhost:3001")
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the store. Collections live directly under it.
    pub base_url: String,

    /// Whole-request timeout.
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Handle to the REST data store.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client for `config.base_url`.
    ///
    /// Fails with [`ClientError::InvalidUrl`] unless the base is an absolute
    /// `http`/`https` URL.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        debug!(base_url = %base, timeout_ms = config.timeout.as_millis() as u64, "API client created");

        Ok(ApiClient { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Gets a product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Gets a transaction repository.
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Builds `base/segment/segment`, keeping any path prefix on the base.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes the JSON response body.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (path, text) = self.dispatch(method, segments, body).await?;

        serde_json::from_str(&text).map_err(|source| {
            error!(path = %path, error = %source, "Failed to decode store response");
            ClientError::Decode { path, source }
        })
    }

    /// Sends a request and discards the response body.
    pub(crate) async fn send_empty(&self, method: Method, segments: &[&str]) -> ClientResult<()> {
        self.dispatch::<()>(method, segments, None).await?;
        Ok(())
    }

    async fn dispatch<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<(String, String)>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, &request_id);

        if method == Method::GET {
            request = request.header(CACHE_CONTROL, "no-cache");
        }

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        let started = Instant::now();

        let response = request.send().await.map_err(|e| {
            error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Store request failed"
            );
            ClientError::Request(e)
        })?;

        let status = response.status();

        debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Store request completed"
        );

        if status == StatusCode::NOT_FOUND {
            error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                "Store record not found"
            );
            return Err(ClientError::NotFound { path });
        }

        if !status.is_success() {
            error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                "Store returned an error status"
            );
            return Err(ClientError::Status {
                method: method.to_string(),
                path,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            error!(request_id = %request_id, path = %path, error = %e, "Failed to read store response");
            ClientError::Request(e)
        })?;
        Ok((path, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ApiConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("http://localhost:3001");
        assert_eq!(
            c.endpoint(&["products"]).unwrap().as_str(),
            "http://localhost:3001/products"
        );
        assert_eq!(
            c.endpoint(&["products", "7"]).unwrap().as_str(),
            "http://localhost:3001/products/7"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("http://example.com/api/");
        assert_eq!(
            c.endpoint(&["transactions"]).unwrap().as_str(),
            "http://example.com/api/transactions"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            ApiClient::new(ApiConfig::new("localhost:3001")),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new(ApiConfig::new("ftp://example.com")),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(ApiClient::new(ApiConfig::new("not a url")).is_err());
    }
}
