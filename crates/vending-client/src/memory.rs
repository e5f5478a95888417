//! # In-Memory Store
//!
//! A [`VendingStore`] that keeps both collections in memory and behaves the
//! way the REST store does: ids are assigned on create, PATCH merges fields,
//! and the log is append-only.
//!
//! Used by flow tests that need a store without a server. Every call bumps a
//! request counter, and failures can be switched on per collection:
//!
//! ```text
//!   fail_all(true)                  every call returns status 500
//!   fail_transaction_writes(true)   only POST /transactions fails
//! ```
//!
//! The second switch reproduces a half-recorded purchase: stock patched, no
//! transaction.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

use vending_core::{
    NewTransaction, Product, ProductDraft, ProductPatch, RecordId, Transaction,
};

use crate::error::{ClientError, ClientResult};
use crate::repository::{ProductStore, TransactionStore, VendingStore};

#[derive(Debug, Default)]
struct Collections {
    products: Vec<Product>,
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Collections {
    fn assign_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId::Number(self.next_id)
    }
}

/// In-memory store with a request counter and fault injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Collections>,
    requests: AtomicUsize,
    fail_all: AtomicBool,
    fail_transaction_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given products. New ids continue after the largest
    /// numeric id present.
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products
            .iter()
            .filter_map(|p| match p.id {
                RecordId::Number(n) => Some(n),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);

        MemoryStore {
            data: Mutex::new(Collections {
                products,
                transactions: Vec::new(),
                next_id,
            }),
            ..Default::default()
        }
    }

    /// Number of store calls made so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with status 500.
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Makes only transaction creation fail with status 500.
    pub fn fail_transaction_writes(&self, fail: bool) {
        self.fail_transaction_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn products(&self) -> Vec<Product> {
        self.data.lock().await.products.clone()
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.data.lock().await.transactions.clone()
    }

    fn begin(&self, method: &str, path: String) -> ClientResult<String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        debug!(method, path = %path, "Memory store request");

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(server_error(method, path));
        }
        Ok(path)
    }
}

fn server_error(method: &str, path: String) -> ClientError {
    ClientError::Status {
        method: method.to_string(),
        path,
        status: 500,
    }
}

fn product_path(id: &RecordId) -> String {
    format!("/products/{}", id)
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.begin("GET", "/products".to_string())?;
        Ok(self.products().await)
    }

    async fn get_product(&self, id: &RecordId) -> ClientResult<Product> {
        let path = self.begin("GET", product_path(id))?;
        let data = self.data.lock().await;
        data.products
            .iter()
            .find(|p| p.id.same_as(id))
            .cloned()
            .ok_or(ClientError::NotFound { path })
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.begin("POST", "/products".to_string())?;
        let mut data = self.data.lock().await;
        let id = data.assign_id();
        let product = draft.clone().into_product(id);
        data.products.push(product.clone());
        Ok(product)
    }

    async fn replace_product(&self, id: &RecordId, draft: &ProductDraft) -> ClientResult<Product> {
        let path = self.begin("PUT", product_path(id))?;
        let mut data = self.data.lock().await;
        let slot = data
            .products
            .iter_mut()
            .find(|p| p.id.same_as(id))
            .ok_or(ClientError::NotFound { path })?;
        *slot = draft.clone().into_product(slot.id.clone());
        Ok(slot.clone())
    }

    async fn patch_product(&self, id: &RecordId, patch: &ProductPatch) -> ClientResult<Product> {
        let path = self.begin("PATCH", product_path(id))?;
        let mut data = self.data.lock().await;
        let slot = data
            .products
            .iter_mut()
            .find(|p| p.id.same_as(id))
            .ok_or(ClientError::NotFound { path })?;
        patch.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: &RecordId) -> ClientResult<()> {
        let path = self.begin("DELETE", product_path(id))?;
        let mut data = self.data.lock().await;
        let before = data.products.len();
        data.products.retain(|p| !p.id.same_as(id));
        if data.products.len() == before {
            return Err(ClientError::NotFound { path });
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.begin("GET", "/transactions".to_string())?;
        Ok(self.transactions().await)
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> ClientResult<Transaction> {
        let path = self.begin("POST", "/transactions".to_string())?;
        if self.fail_transaction_writes.load(Ordering::SeqCst) {
            return Err(server_error("POST", path));
        }

        let mut data = self.data.lock().await;
        let id = data.assign_id();
        let created = transaction.clone().into_transaction(id);
        data.transactions.push(created.clone());
        Ok(created)
    }
}

impl VendingStore for MemoryStore {}
