//! NovaBank Ledger
//!
//! Headless core of a personal-banking demo:
//! - Ledger store holding the active profile and newest-first transactions
//! - Save-on-mutation into a key-value blob store
//! - Transfer validation ahead of the ledger
//! - Simulated login / registration
//! - AI advisor gateway over Gemini with fixed fallback replies
//!
//! FLOW:
//! LOGIN → LEDGER READS → TRANSFER / ADVISOR → LEDGER UPDATE → PERSIST

pub mod advisor;
pub mod auth;
pub mod config;
pub mod error;
pub mod gemini;
pub mod history;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod transfer;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use advisor::{AdvisorGateway, ChatSession, TextGenerator};
pub use ledger::LedgerStore;
