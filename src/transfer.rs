//! Money transfer flow
//!
//! Validates the transfer form against the active balance and only then
//! records a DEBIT through the ledger. A rejected request leaves the ledger
//! untouched.

use crate::error::TransferError;
use crate::ledger::LedgerStore;
use crate::models::{NewTransaction, Transaction, TransactionStatus, TransactionType};
use crate::Result;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, warn};

pub const DEFAULT_CATEGORY: &str = "Transfer";

/// Categories offered by the transfer form (value, label)
pub const CATEGORIES: &[(&str, &str)] = &[
    ("Transfer", "External Transfer"),
    ("Family", "Family & Friends"),
    ("Business", "Business Expense"),
    ("Savings", "Savings Goal"),
    ("Other", "Other"),
];

#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub recipient_account: String,
    /// Raw amount as typed by the user
    pub amount: String,
    pub category: String,
    pub note: String,
}

impl TransferRequest {
    pub fn new(recipient_account: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient_account: recipient_account.into(),
            amount: amount.into(),
            category: DEFAULT_CATEGORY.to_string(),
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Check the form against `balance` and return the parsed amount.
    pub fn validate(&self, balance: Decimal) -> std::result::Result<Decimal, TransferError> {
        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|_| TransferError::InvalidAmount)?;

        if amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount);
        }

        if amount > balance {
            return Err(TransferError::InsufficientFunds);
        }

        if self.recipient_account.trim().is_empty() {
            return Err(TransferError::MissingRecipient);
        }

        Ok(amount)
    }
}

/// Validate and record a transfer for the active user.
///
/// A logged-out ledger is treated as a zero balance.
pub fn submit(ledger: &mut LedgerStore, request: &TransferRequest) -> Result<Transaction> {
    let balance = ledger.balance().unwrap_or(Decimal::ZERO);

    let amount = request.validate(balance).map_err(|e| {
        warn!(error = %e, recipient = %request.recipient_account, "Transfer rejected");
        e
    })?;

    let recipient = request.recipient_account.trim().to_string();

    let tx = ledger.add_transaction(NewTransaction {
        amount: Some(amount),
        kind: Some(TransactionType::Debit),
        category: Some(request.category.clone()),
        description: Some(format!("Transfer to {}: {}", recipient, request.note)),
        status: Some(TransactionStatus::Completed),
        recipient_id: Some(recipient),
        ..NewTransaction::default()
    })?;

    info!(tx_id = %tx.id, amount = %amount, "Transfer completed");

    Ok(tx)
}
