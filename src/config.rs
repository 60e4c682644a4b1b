//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from `.env`.

use crate::gemini::DEFAULT_MODEL;
use std::env;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_DATA_DIR: &str = ".nova";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Empty when unset; the advisor then answers with its offline reply
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub data_dir: PathBuf,
    pub advisor_query: Option<String>,
}

impl Settings {
    /// Load `.env` (if present) and read the environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let gemini_api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .unwrap_or_else(|| {
                warn!("GEMINI_API_KEY not set, advisor will answer offline");
                String::new()
            });

        Self {
            gemini_api_key,
            gemini_model: non_empty("NOVA_GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            data_dir: non_empty("NOVA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            advisor_query: non_empty("NOVA_ADVISOR_QUERY"),
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so env mutation does not race with itself.
    #[test]
    fn test_from_env() {
        env::remove_var("GEMINI_API_KEY");
        env::set_var("API_KEY", "fallback-key");
        env::set_var("NOVA_GEMINI_MODEL", "  ");
        env::set_var("NOVA_DATA_DIR", "/tmp/nova-test");
        env::remove_var("NOVA_ADVISOR_QUERY");

        let settings = Settings::from_env();
        assert_eq!(settings.gemini_api_key, "fallback-key");
        assert_eq!(settings.gemini_model, DEFAULT_MODEL);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/nova-test"));
        assert_eq!(settings.advisor_query, None);

        env::set_var("GEMINI_API_KEY", "primary-key");
        assert_eq!(Settings::from_env().gemini_api_key, "primary-key");

        for name in ["GEMINI_API_KEY", "API_KEY", "NOVA_GEMINI_MODEL", "NOVA_DATA_DIR"] {
            env::remove_var(name);
        }
    }
}
