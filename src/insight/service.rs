//! Insight service: remote first when enabled, template always as the answer of last resort.

use super::config::InsightConfig;
use super::remote::RemoteResponder;
use super::template::TemplateResponder;
use super::InsightProvider;
use std::time::Duration;
use tracing::{debug, warn};

pub struct InsightService {
    remote: Option<Box<dyn InsightProvider>>,
    timeout: Duration,
    template: TemplateResponder,
}

impl InsightService {
    /// Template-only service.
    pub fn local() -> Self {
        Self {
            remote: None,
            timeout: Duration::from_secs(super::config::DEFAULT_TIMEOUT_SECS),
            template: TemplateResponder::new(),
        }
    }

    /// Build from config. A remote endpoint without a usable key is skipped.
    pub fn from_config(config: &InsightConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let remote: Option<Box<dyn InsightProvider>> = if config.remote_enabled {
            match RemoteResponder::from_config(config) {
                Ok(remote) => Some(Box::new(remote)),
                Err(e) => {
                    warn!("Remote insights disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self {
            remote,
            timeout,
            template: TemplateResponder::new(),
        }
    }

    /// Use `provider` ahead of the template, bounded by `timeout`.
    pub fn with_remote(provider: Box<dyn InsightProvider>, timeout: Duration) -> Self {
        Self {
            remote: Some(provider),
            timeout,
            template: TemplateResponder::new(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Answer `prompt`. Never fails: any remote problem yields the template text.
    pub async fn respond_async(&self, prompt: &str) -> String {
        let Some(remote) = &self.remote else {
            return self.template.render(prompt);
        };

        match tokio::time::timeout(self.timeout, remote.generate(prompt)).await {
            Ok(Ok(text)) => {
                debug!(provider = remote.name(), "Remote insight delivered");
                text
            }
            Ok(Err(e)) => {
                warn!(provider = remote.name(), "Remote insight failed, using template: {}", e);
                self.template.render(prompt)
            }
            Err(_) => {
                warn!(
                    provider = remote.name(),
                    "Remote insight timed out after {}s, using template",
                    self.timeout.as_secs()
                );
                self.template.render(prompt)
            }
        }
    }

    /// Blocking variant. Must not be called from inside a tokio runtime.
    pub fn respond(&self, prompt: &str) -> String {
        if self.remote.is_none() {
            return self.template.render(prompt);
        }
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt.block_on(self.respond_async(prompt)),
            Err(e) => {
                warn!("Failed to create runtime for remote insight: {}", e);
                self.template.render(prompt)
            }
        }
    }
}
