//! Insight endpoint configuration.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Try the remote endpoint before the local template (default: false)
    #[serde(default)]
    pub remote_enabled: bool,

    /// Base URL of the generateContent API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to `GEMINI_API_KEY` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Upper bound on a remote request before falling back.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            remote_enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl InsightConfig {
    /// Configured key, else the environment key. Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(API_KEY_ENV)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn api_key_status(&self) -> &'static str {
        if self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
            "Set (from config)"
        } else if std::env::var(API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty()) {
            "Set (from environment)"
        } else {
            "Not set"
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Insight model cannot be empty".to_string());
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!("Invalid insight endpoint URL: {}", self.endpoint));
        }
        if self.timeout_secs == 0 {
            return Err("Insight timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}
