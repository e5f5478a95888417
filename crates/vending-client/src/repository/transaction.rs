//! Transaction repository: `GET /transactions` and `POST /transactions`.
//!
//! The log is append-only. There is no update or delete.

use reqwest::Method;
use tracing::{debug, info};

use vending_core::{NewTransaction, Transaction};

use crate::client::ApiClient;
use crate::error::ClientResult;

const COLLECTION: &str = "transactions";

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    client: ApiClient,
}

impl TransactionRepository {
    pub fn new(client: ApiClient) -> Self {
        TransactionRepository { client }
    }

    /// Lists transactions in store order. Sorting is the caller's job.
    pub async fn list(&self) -> ClientResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self
            .client
            .send_json::<(), _>(Method::GET, &[COLLECTION], None)
            .await?;

        debug!(count = transactions.len(), "Listed transactions");
        Ok(transactions)
    }

    pub async fn insert(&self, transaction: &NewTransaction) -> ClientResult<Transaction> {
        let created: Transaction = self
            .client
            .send_json(Method::POST, &[COLLECTION], Some(transaction))
            .await?;

        info!(
            id = %created.id,
            product_id = %created.product_id,
            price = created.price.rupiah(),
            change = created.change.rupiah(),
            "Transaction recorded"
        );
        Ok(created)
    }
}
