//! Insight text generation.
//!
//! Prompts are built from local aggregates; answers come from an optional
//! remote endpoint or, always as fallback, a deterministic template.

pub mod config;
pub mod prompt;
pub mod remote;
pub mod service;
pub mod template;
pub mod worker;

use crate::error::InsightError;
use async_trait::async_trait;

pub use config::InsightConfig;
pub use prompt::InsightKind;
pub use remote::RemoteResponder;
pub use service::InsightService;
pub use template::TemplateResponder;
pub use worker::{InsightHandle, InsightWorker};

/// Source of insight text for a prompt.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}
