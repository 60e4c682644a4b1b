//! Ledger store
//!
//! Owns the active profile and the newest-first transaction list, and
//! mirrors every change into a `KeyValueStore` right after the in-memory
//! update. The two are not updated atomically: if the write fails the
//! in-memory state is kept and the error is returned to the caller.

mod seed;

pub use seed::initial_transactions;

use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction, TransactionStatus, TransactionType, UserProfile};
use crate::storage::KeyValueStore;
use crate::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const USER_KEY: &str = "nova_user";
pub const TRANSACTIONS_KEY: &str = "nova_tx";

const GUEST_USER_ID: &str = "guest";
const DEFAULT_CATEGORY: &str = "General";

pub struct LedgerStore {
    user: Option<UserProfile>,
    transactions: Vec<Transaction>,
    storage: Box<dyn KeyValueStore>,
}

impl LedgerStore {
    /// Hydrate from storage. A missing transaction blob yields the seed
    /// ledger; a missing profile blob means logged out.
    pub fn open(storage: Box<dyn KeyValueStore>) -> Result<Self> {
        let user: Option<UserProfile> = load_blob(storage.as_ref(), USER_KEY)?;
        let transactions = load_blob(storage.as_ref(), TRANSACTIONS_KEY)?
            .unwrap_or_else(seed::initial_transactions);

        info!(
            logged_in = user.is_some(),
            transaction_count = transactions.len(),
            "Ledger loaded"
        );

        Ok(Self {
            user,
            transactions,
            storage,
        })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.user.as_ref().map(|u| u.balance)
    }

    /// Replace the active identity wholesale. `None` logs out.
    pub fn set_user(&mut self, user: Option<UserProfile>) -> Result<()> {
        match &user {
            Some(profile) => info!(uid = %profile.uid, "Active user set"),
            None => info!("Active user cleared"),
        }

        self.user = user;
        self.persist_user()
    }

    pub fn logout(&mut self) -> Result<()> {
        self.set_user(None)
    }

    /// Record a transaction, filling unset fields with defaults, and apply
    /// it to the active user's balance.
    ///
    /// No funds check happens here; callers such as the transfer flow
    /// validate first. A balance that would leave the representable range
    /// is rejected with `LedgerError::Overflow` and nothing is recorded.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Transaction> {
        let tx = Transaction {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: draft.user_id.unwrap_or_else(|| {
                self.user
                    .as_ref()
                    .map(|u| u.uid.clone())
                    .unwrap_or_else(|| GUEST_USER_ID.to_string())
            }),
            amount: draft.amount.unwrap_or(Decimal::ZERO),
            kind: draft.kind.unwrap_or(TransactionType::Debit),
            category: draft.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: draft.description.unwrap_or_default(),
            timestamp: draft.timestamp.unwrap_or_else(Utc::now),
            status: draft.status.unwrap_or(TransactionStatus::Completed),
            recipient_id: draft.recipient_id,
        };

        let new_balance = match &self.user {
            Some(user) => Some(user.balance.checked_add(tx.signed_amount()).ok_or_else(|| {
                warn!(uid = %user.uid, amount = %tx.amount, "Balance overflow, transaction dropped");
                LedgerError::Overflow(format!(
                    "balance {} cannot absorb {} {}",
                    user.balance, tx.kind, tx.amount
                ))
            })?),
            None => None,
        };

        self.transactions.insert(0, tx.clone());

        if let (Some(user), Some(balance)) = (self.user.as_mut(), new_balance) {
            user.balance = balance;
            debug!(uid = %user.uid, balance = %user.balance, "Balance adjusted");
        }

        info!(
            tx_id = %tx.id,
            kind = %tx.kind,
            amount = %tx.amount,
            category = %tx.category,
            "Transaction recorded"
        );

        self.persist_transactions()?;
        if self.user.is_some() {
            self.persist_user()?;
        }

        Ok(tx)
    }

    fn persist_user(&self) -> Result<()> {
        match &self.user {
            Some(user) => {
                let blob = serde_json::to_string(user)?;
                self.storage.set(USER_KEY, &blob)
            }
            None => self.storage.remove(USER_KEY),
        }
    }

    fn persist_transactions(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.transactions)?;
        self.storage.set(TRANSACTIONS_KEY, &blob)
    }
}

fn load_blob<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable blob");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::storage::InMemoryStore;
    use std::sync::Arc;

    /// Shares one in-memory map between the store under test and assertions.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<InMemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(LedgerError::Storage("quota exceeded".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(LedgerError::Storage("quota exceeded".to_string()))
        }
    }

    fn profile(balance: Decimal) -> UserProfile {
        UserProfile {
            uid: "u1".to_string(),
            email: "user@example.com".to_string(),
            display_name: "Alex Thompson".to_string(),
            account_number: "NB-202501002".to_string(),
            balance,
            currency: "USD".to_string(),
            created_at: Utc::now(),
        }
    }

    fn logged_in(balance: Decimal) -> LedgerStore {
        let mut store = LedgerStore::open(Box::new(InMemoryStore::new())).unwrap();
        store.set_user(Some(profile(balance))).unwrap();
        store
    }

    #[test]
    fn test_fresh_store_is_seeded_and_logged_out() {
        let store = LedgerStore::open(Box::new(InMemoryStore::new())).unwrap();
        assert!(store.user().is_none());
        assert_eq!(store.transactions().len(), 3);
        assert_eq!(store.balance(), None);
    }

    #[test]
    fn test_debit_reduces_balance_and_prepends() {
        let mut store = logged_in(Decimal::new(1542050, 2));
        let before = store.transactions().len();

        let tx = store
            .add_transaction(NewTransaction::debit(Decimal::new(4500, 2)))
            .unwrap();

        assert_eq!(store.balance(), Some(Decimal::new(1537550, 2)));
        assert_eq!(store.transactions().len(), before + 1);
        assert_eq!(store.transactions()[0], tx);
    }

    #[test]
    fn test_defaults_are_filled() {
        let mut store = logged_in(Decimal::new(100, 0));
        let tx = store.add_transaction(NewTransaction::default()).unwrap();

        assert!(!tx.id.is_empty());
        assert_eq!(tx.user_id, "u1");
        assert_eq!(tx.amount, Decimal::ZERO);
        assert_eq!(tx.kind, TransactionType::Debit);
        assert_eq!(tx.category, "General");
        assert_eq!(tx.description, "");
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(store.balance(), Some(Decimal::new(100, 0)));
    }

    #[test]
    fn test_supplied_fields_override_defaults() {
        let mut store = logged_in(Decimal::new(100, 0));
        let draft = NewTransaction {
            id: Some("fixed".to_string()),
            status: Some(TransactionStatus::Pending),
            ..NewTransaction::credit(Decimal::new(5, 0)).category("Refund")
        };

        let tx = store.add_transaction(draft).unwrap();
        assert_eq!(tx.id, "fixed");
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.category, "Refund");
        assert_eq!(store.balance(), Some(Decimal::new(105, 0)));
    }

    #[test]
    fn test_balance_tracks_sum_of_signed_amounts() {
        let initial = Decimal::new(1000, 0);
        let mut store = logged_in(initial);

        let drafts = vec![
            NewTransaction::credit(Decimal::new(25050, 2)),
            NewTransaction::debit(Decimal::new(1999, 2)),
            NewTransaction::debit(Decimal::new(300, 0)),
            NewTransaction::credit(Decimal::new(1, 2)),
            NewTransaction {
                kind: Some(TransactionType::Transfer),
                amount: Some(Decimal::new(10, 0)),
                ..NewTransaction::default()
            },
        ];

        let mut expected = initial;
        for draft in drafts {
            let tx = store.add_transaction(draft).unwrap();
            expected += tx.signed_amount();
        }

        assert_eq!(store.balance(), Some(expected));
        assert_eq!(expected, Decimal::new(92052, 2));
    }

    #[test]
    fn test_guest_transaction_leaves_no_balance() {
        let mut store = LedgerStore::open(Box::new(InMemoryStore::new())).unwrap();
        let tx = store
            .add_transaction(NewTransaction::credit(Decimal::new(50, 0)))
            .unwrap();

        assert_eq!(tx.user_id, "guest");
        assert!(store.user().is_none());
        assert_eq!(store.transactions().len(), 4);
    }

    #[test]
    fn test_logout_keeps_transactions() {
        let mut store = logged_in(Decimal::new(100, 0));
        store
            .add_transaction(NewTransaction::debit(Decimal::new(10, 0)))
            .unwrap();
        let before = store.transactions().to_vec();

        store.logout().unwrap();

        assert!(store.user().is_none());
        assert_eq!(store.balance(), None);
        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn test_state_survives_reopen() {
        let shared = SharedStore::default();

        {
            let mut store = LedgerStore::open(Box::new(shared.clone())).unwrap();
            store.set_user(Some(profile(Decimal::new(100, 0)))).unwrap();
            store
                .add_transaction(NewTransaction::debit(Decimal::new(40, 0)).description("Groceries"))
                .unwrap();
        }

        let reopened = LedgerStore::open(Box::new(shared.clone())).unwrap();
        assert_eq!(reopened.balance(), Some(Decimal::new(60, 0)));
        assert_eq!(reopened.transactions().len(), 4);
        assert_eq!(reopened.transactions()[0].description, "Groceries");
    }

    #[test]
    fn test_logout_removes_profile_blob() {
        let shared = SharedStore::default();
        let mut store = LedgerStore::open(Box::new(shared.clone())).unwrap();

        store.set_user(Some(profile(Decimal::ONE))).unwrap();
        assert!(shared.get(USER_KEY).unwrap().is_some());

        store.logout().unwrap();
        assert!(shared.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_blob_falls_back() {
        let shared = SharedStore::default();
        shared.set(USER_KEY, "not json").unwrap();
        shared.set(TRANSACTIONS_KEY, "{").unwrap();

        let store = LedgerStore::open(Box::new(shared)).unwrap();
        assert!(store.user().is_none());
        assert_eq!(store.transactions().len(), 3);
    }

    #[test]
    fn test_overflowing_credit_is_rejected_untouched() {
        let mut store = logged_in(Decimal::MAX);
        let before = store.transactions().len();

        let result = store.add_transaction(NewTransaction::credit(Decimal::ONE));

        assert!(matches!(result, Err(LedgerError::Overflow(_))));
        assert_eq!(store.balance(), Some(Decimal::MAX));
        assert_eq!(store.transactions().len(), before);
    }

    #[test]
    fn test_overflowing_debit_is_rejected() {
        let mut store = logged_in(Decimal::MIN);
        let result = store.add_transaction(NewTransaction::debit(Decimal::ONE));
        assert!(matches!(result, Err(LedgerError::Overflow(_))));
        assert_eq!(store.balance(), Some(Decimal::MIN));
    }

    #[test]
    fn test_persist_failure_is_reported_but_memory_updated() {
        let mut store = LedgerStore::open(Box::new(BrokenStore)).unwrap();

        let result = store.add_transaction(NewTransaction::debit(Decimal::ONE));
        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert_eq!(store.transactions().len(), 4);
    }
}
