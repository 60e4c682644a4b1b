//! Read-side queries behind the history and dashboard views

use crate::ledger::LedgerStore;
use crate::models::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

const RECENT_COUNT: usize = 5;
const ACTIVITY_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    /// Credits only
    Income,
    /// Debits only
    Expense,
}

impl HistoryFilter {
    fn matches(self, tx: &Transaction) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Income => tx.kind == TransactionType::Credit,
            HistoryFilter::Expense => tx.kind == TransactionType::Debit,
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "income" => Ok(HistoryFilter::Income),
            "expense" => Ok(HistoryFilter::Expense),
            other => Err(format!("unknown history filter: {}", other)),
        }
    }
}

/// Case-insensitive match on description or category, newest first.
pub fn search<'a>(
    transactions: &'a [Transaction],
    query: &str,
    filter: HistoryFilter,
) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();

    transactions
        .iter()
        .filter(|tx| {
            tx.description.to_lowercase().contains(&needle)
                || tx.category.to_lowercase().contains(&needle)
        })
        .filter(|tx| filter.matches(tx))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityPoint {
    /// Short weekday, e.g. "Mon"
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub balance: Option<Decimal>,
    pub currency: Option<String>,
    pub total_income: Decimal,
    pub total_spending: Decimal,
    pub recent: Vec<Transaction>,
    /// Oldest to newest
    pub activity: Vec<ActivityPoint>,
}

impl DashboardSummary {
    pub fn build(ledger: &LedgerStore) -> Self {
        let transactions = ledger.transactions();

        let (total_income, total_spending) =
            transactions
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(income, spending), tx| {
                    if tx.is_income() {
                        (income.saturating_add(tx.amount), spending)
                    } else {
                        (income, spending.saturating_add(tx.amount))
                    }
                });

        let activity = transactions
            .iter()
            .take(ACTIVITY_COUNT)
            .rev()
            .map(|tx| ActivityPoint {
                label: tx.timestamp.format("%a").to_string(),
                amount: tx.amount,
            })
            .collect();

        Self {
            balance: ledger.balance(),
            currency: ledger.user().map(|u| u.currency.clone()),
            total_income,
            total_spending,
            recent: transactions.iter().take(RECENT_COUNT).cloned().collect(),
            activity,
        }
    }
}
