//! Transaction log ordering.
//!
//! The store returns transactions in insertion order; the history page shows
//! newest first. Sorting is stable, so purchases with the same timestamp keep
//! their store order.

use crate::types::Transaction;

/// Sorts in place, newest timestamp first.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Returns the transactions ordered newest first.
pub fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    sort_newest_first(&mut transactions);
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::RecordId;
    use chrono::{TimeZone, Utc};

    fn tx(id: &str, hour: u32) -> Transaction {
        Transaction {
            id: RecordId::Text(id.to_string()),
            product_id: RecordId::Number(1),
            product_name: "Aqua".to_string(),
            price: Money::from_rupiah(3000),
            money_inserted: Money::from_rupiah(5000),
            change: Money::from_rupiah(2000),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 20, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_newest_first() {
        let sorted = newest_first(vec![tx("a", 8), tx("b", 12), tx("c", 10)]);
        let ids: Vec<String> = sorted.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_timestamps_keep_store_order() {
        let sorted = newest_first(vec![tx("first", 9), tx("second", 9), tx("later", 11)]);
        let ids: Vec<String> = sorted.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["later", "first", "second"]);
    }

    #[test]
    fn test_empty_history() {
        assert!(newest_first(Vec::new()).is_empty());
    }
}
