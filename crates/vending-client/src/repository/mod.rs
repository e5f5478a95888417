//! # Repository Module
//!
//! Store traits and their HTTP implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Narrow Store Interface                               │
//! │                                                                         │
//! │  PurchaseFlow / AdminPanel / HistoryView                                │
//! │       │                                                                 │
//! │       │  store.list_products()                                          │
//! │       ▼                                                                 │
//! │  ProductStore                  TransactionStore                         │
//! │  ├── list_products             ├── list_transactions                    │
//! │  ├── get_product               └── create_transaction                   │
//! │  ├── create_product                                                     │
//! │  ├── replace_product           VendingStore = both                      │
//! │  ├── patch_product             └── record_purchase(plan)                │
//! │  └── delete_product                                                     │
//! │       │                                                                 │
//! │       ├──► ApiClient    (HTTP, via ProductRepository and                 │
//! │       │                  TransactionRepository)                         │
//! │       └──► MemoryStore  (tests)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purchases Are Not Atomic
//! [`VendingStore::record_purchase`] defaults to two independent calls:
//! `PATCH /products/:id` with the new stock, then `POST /transactions`. If
//! the second call fails the stock stays decremented with no transaction.
//! A backend that can do both in one transaction overrides the method.

use async_trait::async_trait;
use tracing::{debug, warn};

use vending_core::{
    NewTransaction, PaymentPlan, Product, ProductDraft, ProductPatch, RecordId, Transaction,
};

use crate::client::ApiClient;
use crate::error::ClientResult;

pub mod product;
pub mod transaction;

// =============================================================================
// Store Traits
// =============================================================================

/// Access to the product collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, in store order.
    async fn list_products(&self) -> ClientResult<Vec<Product>>;

    async fn get_product(&self, id: &RecordId) -> ClientResult<Product>;

    /// Creates a product; the store assigns the id.
    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product>;

    /// Replaces every field of an existing product.
    async fn replace_product(&self, id: &RecordId, draft: &ProductDraft) -> ClientResult<Product>;

    /// Updates only the fields set in `patch`.
    async fn patch_product(&self, id: &RecordId, patch: &ProductPatch) -> ClientResult<Product>;

    /// Deletes a product. The response body is ignored since store versions
    /// disagree on what they return.
    async fn delete_product(&self, id: &RecordId) -> ClientResult<()>;
}

/// Access to the append-only transaction log.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All transactions, in store order.
    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>>;

    async fn create_transaction(&self, transaction: &NewTransaction) -> ClientResult<Transaction>;
}

/// Everything the kiosk needs from a store.
#[async_trait]
pub trait VendingStore: ProductStore + TransactionStore {
    /// Persists a purchase: stock decrement, then transaction append.
    async fn record_purchase(&self, plan: &PaymentPlan) -> ClientResult<Transaction> {
        debug!(
            product_id = %plan.product_id,
            stock = plan.remaining_stock,
            "Recording purchase"
        );

        self.patch_product(&plan.product_id, &plan.stock_patch).await?;

        match self.create_transaction(&plan.transaction).await {
            Ok(transaction) => Ok(transaction),
            Err(err) => {
                warn!(
                    product_id = %plan.product_id,
                    stock = plan.remaining_stock,
                    error = %err,
                    "Stock was decremented but the transaction was not recorded"
                );
                Err(err)
            }
        }
    }
}

// =============================================================================
// HTTP Implementation
// =============================================================================

#[async_trait]
impl ProductStore for ApiClient {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.products().list().await
    }

    async fn get_product(&self, id: &RecordId) -> ClientResult<Product> {
        self.products().get_by_id(id).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.products().insert(draft).await
    }

    async fn replace_product(&self, id: &RecordId, draft: &ProductDraft) -> ClientResult<Product> {
        self.products().replace(id, draft).await
    }

    async fn patch_product(&self, id: &RecordId, patch: &ProductPatch) -> ClientResult<Product> {
        self.products().patch(id, patch).await
    }

    async fn delete_product(&self, id: &RecordId) -> ClientResult<()> {
        self.products().delete(id).await
    }
}

#[async_trait]
impl TransactionStore for ApiClient {
    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.transactions().list().await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> ClientResult<Transaction> {
        self.transactions().insert(transaction).await
    }
}

impl VendingStore for ApiClient {}
