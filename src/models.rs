//! Core data models for the ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Credit,
    Debit,
    Transfer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Advisor,
}

//
// ================= Profile =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub account_number: String,
    pub balance: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

//
// ================= Ledger =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Magnitude only, the sign comes from `kind`
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
}

impl Transaction {
    /// Effect of this transaction on the owner's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Credit => self.amount,
            TransactionType::Debit | TransactionType::Transfer => -self.amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Credit
    }

    /// Amount as rendered in lists, e.g. `+1200.00` or `-45.00`.
    pub fn display_amount(&self) -> String {
        let prefix = if self.is_income() { '+' } else { '-' };
        format!("{}{:.2}", prefix, self.amount)
    }
}

/// Partial transaction accepted by `LedgerStore::add_transaction`.
///
/// Every field left as `None` is filled with its default when the
/// transaction is recorded.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub amount: Option<Decimal>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub status: Option<TransactionStatus>,
    pub recipient_id: Option<String>,
}

impl NewTransaction {
    pub fn credit(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            kind: Some(TransactionType::Credit),
            ..Self::default()
        }
    }

    pub fn debit(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            kind: Some(TransactionType::Debit),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

//
// ================= Advisor Chat =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn advisor(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Advisor,
            content: content.into(),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Transfer => "TRANSFER",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: TransactionType, amount: Decimal) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            amount,
            kind,
            category: "General".to_string(),
            description: String::new(),
            timestamp: Utc::now(),
            status: TransactionStatus::Completed,
            recipient_id: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        let amount = Decimal::new(4500, 2);
        assert_eq!(sample(TransactionType::Credit, amount).signed_amount(), amount);
        assert_eq!(sample(TransactionType::Debit, amount).signed_amount(), -amount);
        assert_eq!(sample(TransactionType::Transfer, amount).signed_amount(), -amount);
    }

    #[test]
    fn test_display_amount() {
        let tx = sample(TransactionType::Credit, Decimal::new(1200, 0));
        assert_eq!(tx.display_amount(), "+1200.00");

        let tx = sample(TransactionType::Debit, Decimal::new(4550, 2));
        assert_eq!(tx.display_amount(), "-45.50");
    }

    #[test]
    fn test_transaction_wire_format() {
        let json = serde_json::to_value(sample(TransactionType::Debit, Decimal::ONE)).unwrap();
        assert_eq!(json["type"], "DEBIT");
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["userId"], "u1");
        assert!(json.get("recipientId").is_none());
    }

    #[test]
    fn test_reads_browser_blob() {
        // Blobs written by the web client carry plain numbers for amounts.
        let raw = r#"{
            "id": "2",
            "userId": "u1",
            "amount": 45,
            "type": "DEBIT",
            "category": "Food",
            "description": "Starbucks Coffee",
            "timestamp": "2025-01-02T10:00:00.000Z",
            "status": "COMPLETED"
        }"#;

        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.amount, Decimal::new(45, 0));
        assert_eq!(tx.kind, TransactionType::Debit);
        assert_eq!(tx.recipient_id, None);
    }
}
