//! OpenRouter-compatible streaming adapter.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{future, StreamExt};
use reqwest::Client;
use std::time::Duration;

use super::wire::{CompletionBody, StreamChunk};
use super::{CompletionAdapter, CompletionError, CompletionRequest, FragmentStream};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub api_key: String,
    /// Sent as `HTTP-Referer`
    pub referer: String,
    /// Sent as `X-Title`
    pub title: String,
    pub connect_timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            referer: "http://localhost:3000".to_string(),
            title: "Taskmind".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Streams completions over SSE. No overall request timeout is applied.
pub struct OpenRouterAdapter {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterAdapter {
    pub fn new(config: OpenRouterConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

enum StreamStep {
    Fragment(String),
    Skip,
    Done,
}

fn parse_event_data(data: &str) -> Result<StreamStep, CompletionError> {
    let trimmed = data.trim();
    if trimmed == DONE_MARKER {
        return Ok(StreamStep::Done);
    }
    if trimmed.is_empty() {
        return Ok(StreamStep::Skip);
    }

    let chunk: StreamChunk = serde_json::from_str(trimmed)
        .map_err(|e| CompletionError::Stream(format!("JSON parse error: {}", e)))?;

    if let Some(error) = chunk.error {
        return Err(CompletionError::Provider { code: error.status_code(), message: error.message });
    }

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content);

    Ok(content.map_or(StreamStep::Skip, StreamStep::Fragment))
}

#[async_trait]
impl CompletionAdapter for OpenRouterAdapter {
    async fn stream(&self, request: CompletionRequest) -> Result<FragmentStream, CompletionError> {
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&CompletionBody::streaming(&request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status: status.as_u16(), message });
        }

        tracing::debug!(model = %request.model, "Completion stream opened");

        let stream = resp
            .bytes_stream()
            .eventsource()
            .map(|event| match event {
                Ok(event) => parse_event_data(&event.data),
                Err(e) => Err(CompletionError::Stream(e.to_string())),
            })
            .take_while(|step| future::ready(!matches!(step, Ok(StreamStep::Done))))
            .filter_map(|step| {
                future::ready(match step {
                    Ok(StreamStep::Fragment(text)) => Some(Ok(text)),
                    Ok(StreamStep::Skip | StreamStep::Done) => None,
                    Err(e) => Some(Err(e)),
                })
            });

        Ok(Box::pin(stream))
    }
}
