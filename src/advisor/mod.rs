//! AI advisor gateway
//!
//! Builds a prompt from the profile, the most recent transactions and the
//! user's question, makes one call to a text generator and hands back the
//! reply. Failures never reach the caller: they become fixed fallback
//! messages that are shown like any other advisor reply.

pub mod session;

pub use session::ChatSession;

use crate::models::{Transaction, UserProfile};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Maximum number of transactions embedded in a prompt
pub const CONTEXT_WINDOW: usize = 10;

/// Returned when the generator call fails
pub const OFFLINE_REPLY: &str = "Nova AI is currently offline for maintenance. Please try again later.";

/// Returned when the generator answers with no text
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that financial inquiry right now.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Outbound text-generation call
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: SamplingParams) -> Result<String>;
}

pub struct AdvisorGateway {
    generator: Arc<dyn TextGenerator>,
    params: SamplingParams,
}

impl AdvisorGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            params: SamplingParams::default(),
        }
    }

    /// Answer `query` for `profile`. Always returns text.
    pub async fn advise(
        &self,
        profile: &UserProfile,
        transactions: &[Transaction],
        query: &str,
    ) -> String {
        let prompt = match build_prompt(profile, transactions, query) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Failed to build advisor prompt: {}", e);
                return OFFLINE_REPLY.to_string();
            }
        };

        info!(
            uid = %profile.uid,
            context_transactions = transactions.len().min(CONTEXT_WINDOW),
            "Requesting financial advice"
        );

        match self.generator.generate(&prompt, self.params).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("Advisor returned empty text");
                EMPTY_REPLY.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                error!("Advisor call failed: {}", e);
                OFFLINE_REPLY.to_string()
            }
        }
    }
}

/// Prompt with the serialized profile and up to `CONTEXT_WINDOW` transactions
pub fn build_prompt(
    profile: &UserProfile,
    transactions: &[Transaction],
    query: &str,
) -> Result<String> {
    let recent = &transactions[..transactions.len().min(CONTEXT_WINDOW)];

    let profile_json = serde_json::to_string(profile)?;
    let transactions_json = serde_json::to_string(recent)?;

    Ok(format!(
        r#"You are a professional banking AI advisor named Nova.
The user's profile: {profile_json}
Recent transactions: {transactions_json}

User's Query: "{query}"

Provide helpful, empathetic, and data-driven financial advice.
If they ask about spending habits, analyze the categories in their transactions.
Always maintain a professional tone and emphasize security.
Keep it concise and formatted in Markdown."#
    ))
}
