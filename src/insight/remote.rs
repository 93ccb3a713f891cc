//! Remote text endpoint speaking the Gemini `generateContent` request shape.
//!
//! One stateless request per prompt: no retries, no streaming.

use super::config::InsightConfig;
use super::InsightProvider;
use crate::error::InsightError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct RemoteResponder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect()
    }
}

impl RemoteResponder {
    /// Build a responder from config. Fails only when no API key is available.
    pub fn from_config(config: &InsightConfig) -> Result<Self, InsightError> {
        let api_key = config
            .resolve_api_key()
            .ok_or(InsightError::MissingCredential)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InsightError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            timeout_secs: config.timeout_secs,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl InsightProvider for RemoteResponder {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InsightError::Timeout(self.timeout_secs)
                } else {
                    InsightError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InsightError::Transport(e.to_string()))?;

        let text = parsed.into_text();
        if text.trim().is_empty() {
            Err(InsightError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}
