//! # Product Repository
//!
//! HTTP operations on the `/products` collection.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET     /products        ──► [Product]                                 │
//! │  GET     /products/:id    ──► Product                                   │
//! │  POST    /products        ◄── ProductDraft        ──► Product           │
//! │  PUT     /products/:id    ◄── Product (with id)   ──► Product           │
//! │  PATCH   /products/:id    ◄── ProductPatch        ──► Product           │
//! │  DELETE  /products/:id    ──► (body ignored)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::Method;
use tracing::{debug, info};

use vending_core::{Product, ProductDraft, ProductPatch, RecordId};

use crate::client::ApiClient;
use crate::error::ClientResult;

const COLLECTION: &str = "products";

/// Repository for product requests.
///
/// ## Usage
/// ```rust,ignore
/// let repo = client.products();
///
/// let products = repo.list().await?;
/// let one = repo.get_by_id(&products[0].id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    client: ApiClient,
}

impl ProductRepository {
    pub fn new(client: ApiClient) -> Self {
        ProductRepository { client }
    }

    /// Lists all products in store order.
    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        let products: Vec<Product> = self
            .client
            .send_json::<(), _>(Method::GET, &[COLLECTION], None)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn get_by_id(&self, id: &RecordId) -> ClientResult<Product> {
        let segment = id.as_path_segment();
        self.client
            .send_json::<(), _>(Method::GET, &[COLLECTION, segment.as_str()], None)
            .await
    }

    /// Creates a product from validated fields.
    pub async fn insert(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let product: Product = self
            .client
            .send_json(Method::POST, &[COLLECTION], Some(draft))
            .await?;

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replaces a product. The full product, id included, is sent.
    pub async fn replace(&self, id: &RecordId, draft: &ProductDraft) -> ClientResult<Product> {
        let segment = id.as_path_segment();
        let body = draft.clone().into_product(id.clone());

        let product: Product = self
            .client
            .send_json(Method::PUT, &[COLLECTION, segment.as_str()], Some(&body))
            .await?;

        info!(id = %product.id, name = %product.name, "Product updated");
        Ok(product)
    }

    pub async fn patch(&self, id: &RecordId, patch: &ProductPatch) -> ClientResult<Product> {
        let segment = id.as_path_segment();

        debug!(id = %id, ?patch, "Patching product");

        self.client
            .send_json(Method::PATCH, &[COLLECTION, segment.as_str()], Some(patch))
            .await
    }

    pub async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        let segment = id.as_path_segment();
        self.client
            .send_empty(Method::DELETE, &[COLLECTION, segment.as_str()])
            .await?;

        info!(id = %id, "Product deleted");
        Ok(())
    }
}
