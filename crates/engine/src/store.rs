//! In-memory Transaction Store.
//!
//! The store keeps entries in the order they should be listed: `insert`
//! prepends, `replace` keeps the position of the entry it substitutes.
//! There is no delete.

use crate::{EngineError, ResultEngine, Transaction, TransactionId, seed};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the sample entries.
    pub fn with_mock_data() -> Self {
        Self {
            items: seed::mock_transactions(),
        }
    }

    /// Prepends `transaction`.
    pub fn insert(&mut self, transaction: Transaction) {
        tracing::debug!(id = %transaction.id, "insert transaction");
        self.items.insert(0, transaction);
    }

    /// Substitutes the entry with the same id in place.
    ///
    /// Returns [`EngineError::KeyNotFound`] and leaves the store untouched when
    /// no entry has that id.
    pub fn replace(&mut self, transaction: Transaction) -> ResultEngine<()> {
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.id == transaction.id)
            .ok_or_else(|| EngineError::KeyNotFound(transaction.id.to_string()))?;
        tracing::debug!(id = %transaction.id, "replace transaction");
        *slot = transaction;
        Ok(())
    }

    /// Read-only snapshot in listing order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.items.iter().find(|item| &item.id == id)
    }
}

impl From<Vec<Transaction>> for TransactionStore {
    fn from(items: Vec<Transaction>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, OccurredDate, TransactionKind};

    fn entry(id: &str, amount: i64) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            kind: TransactionKind::Expense,
            amount: Money::new(amount),
            note: String::new(),
            tags: Vec::new(),
            occurred_date: OccurredDate::new("2025年8月21日"),
            occurred_time: "12:00".to_string(),
            location: None,
            payment_method: None,
        }
    }

    #[test]
    fn insert_prepends() {
        let mut store = TransactionStore::new();
        store.insert(entry("a", 1));
        store.insert(entry("b", 2));
        let ids: Vec<_> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut store = TransactionStore::from(vec![entry("a", 1), entry("b", 2), entry("c", 3)]);
        store.replace(entry("b", 20)).unwrap();
        let ids: Vec<_> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(store.transactions()[1].amount, Money::new(20));
    }

    #[test]
    fn replace_twice_is_idempotent() {
        let mut once = TransactionStore::with_mock_data();
        let mut twice = once.clone();
        let mut edited = once.transactions()[0].clone();
        edited.note = "edited".to_string();

        once.replace(edited.clone()).unwrap();
        twice.replace(edited.clone()).unwrap();
        twice.replace(edited).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn replace_unknown_id_fails_and_leaves_store_untouched() {
        let mut store = TransactionStore::with_mock_data();
        let before = store.clone();
        let err = store.replace(entry("missing", 1)).unwrap_err();
        assert_eq!(err, EngineError::KeyNotFound("missing".to_string()));
        assert_eq!(store, before);
    }

    #[test]
    fn mock_data_has_unique_ids() {
        let store = TransactionStore::with_mock_data();
        assert_eq!(store.len(), 4);
        let mut ids: Vec<_> = store.transactions().iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(store.get(&TransactionId::from("t3")).is_some());
    }
}
