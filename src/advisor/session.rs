//! Advisor chat transcript
//!
//! Append-only, in-memory, scoped to one advisor session.

use crate::advisor::AdvisorGateway;
use crate::ledger::LedgerStore;
use crate::models::{ChatMessage, ChatRole};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start a session with the advisor's greeting.
    pub fn new(display_name: Option<&str>) -> Self {
        let name = display_name.filter(|n| !n.is_empty()).unwrap_or("there");

        Self {
            messages: vec![ChatMessage::advisor(format!(
                "Hello {}! I'm Nova, your AI financial advisor. How can I help you manage your wealth today? You can ask me to analyze your spending or for saving tips.",
                name
            ))],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == ChatRole::Advisor)
    }

    /// Send `input` to the advisor and append both sides of the exchange.
    ///
    /// Blank input or a logged-out ledger is ignored and returns `None`.
    pub async fn send(
        &mut self,
        gateway: &AdvisorGateway,
        ledger: &LedgerStore,
        input: &str,
    ) -> Option<&ChatMessage> {
        let query = input.trim();
        let profile = ledger.user()?;
        if query.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(query));
        debug!(turns = self.messages.len(), "Advisor query queued");

        let reply = gateway.advise(profile, ledger.transactions(), query).await;
        self.messages.push(ChatMessage::advisor(reply));

        self.messages.last()
    }
}
