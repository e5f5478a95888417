//! # History Page
//!
//! Lists recorded purchases, newest first.

use std::sync::Arc;
use tracing::debug;

use vending_client::TransactionStore;
use vending_core::history::newest_first;
use vending_core::Transaction;

use crate::display;
use crate::error::{KioskError, KioskResult};
use crate::messages;

pub struct HistoryView<S> {
    store: Arc<S>,
    transactions: Vec<Transaction>,
}

impl<S: TransactionStore> HistoryView<S> {
    pub fn new(store: Arc<S>) -> Self {
        HistoryView {
            store,
            transactions: Vec::new(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Fetches every transaction and orders them by timestamp, newest first.
    pub async fn load(&mut self) -> KioskResult<()> {
        let transactions = self
            .store
            .list_transactions()
            .await
            .map_err(|e| KioskError::network(&e, messages::FETCH_TRANSACTIONS_FAILED))?;

        debug!(count = transactions.len(), "Transactions loaded");
        self.transactions = newest_first(transactions);
        Ok(())
    }

    /// Renders the table with times in the machine's local zone.
    pub fn render(&self) -> String {
        display::history_table(&self.transactions, &chrono::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vending_client::MemoryStore;
    use vending_core::{Money, NewTransaction, RecordId};

    fn purchase(hour: u32) -> NewTransaction {
        NewTransaction {
            product_id: RecordId::Number(1),
            product_name: "Teh Botol".to_string(),
            price: Money::from_rupiah(8000),
            money_inserted: Money::from_rupiah(10000),
            change: Money::from_rupiah(2000),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 20, hour, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_load_orders_newest_first() {
        let store = Arc::new(MemoryStore::new());
        for hour in [8, 11, 9] {
            store.create_transaction(&purchase(hour)).await.unwrap();
        }

        let mut view = HistoryView::new(store);
        view.load().await.unwrap();

        let hours: Vec<u32> = view
            .transactions()
            .iter()
            .map(|t| chrono::Timelike::hour(&t.timestamp))
            .collect();
        assert_eq!(hours, vec![11, 9, 8]);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let mut view = HistoryView::new(Arc::new(MemoryStore::new()));
        view.load().await.unwrap();
        assert!(view.render().starts_with("Belum ada transaksi"));
    }

    #[tokio::test]
    async fn test_load_failure_message() {
        let store = Arc::new(MemoryStore::new());
        store.fail_all(true);

        let mut view = HistoryView::new(store);
        let err = view.load().await.unwrap_err();
        assert_eq!(err.message, "Gagal memuat transaksi");
    }
}
