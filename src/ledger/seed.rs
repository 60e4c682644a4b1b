//! Illustrative starting ledger for a fresh install.
//!
//! Seed entries bypass `add_transaction`, so they are not reflected in any
//! profile balance.

use crate::models::{Transaction, TransactionStatus, TransactionType};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

pub fn initial_transactions() -> Vec<Transaction> {
    let now = Utc::now();

    let entry = |id: &str, amount: i64, kind, category: &str, description: &str, age: Duration| {
        Transaction {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount: Decimal::new(amount, 0),
            kind,
            category: category.to_string(),
            description: description.to_string(),
            timestamp: now - age,
            status: TransactionStatus::Completed,
            recipient_id: None,
        }
    };

    vec![
        entry("1", 1200, TransactionType::Credit, "Salary", "Monthly Payroll", Duration::hours(24)),
        entry("2", 45, TransactionType::Debit, "Food", "Starbucks Coffee", Duration::hours(12)),
        entry("3", 200, TransactionType::Debit, "Shopping", "Amazon Purchase", Duration::hours(6)),
    ]
}
