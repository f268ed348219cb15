//! OpenAI-compatible chat-completion wire format.

use serde::{Deserialize, Serialize};
use taskmind_types::ProviderPreference;

use super::CompletionRequest;

#[derive(Debug, Serialize)]
pub(super) struct CompletionBody<'a> {
    pub model: &'a str,
    pub messages: [WireMessage<'a>; 1],
    pub stream: bool,
    pub provider: &'a ProviderPreference,
}

impl<'a> CompletionBody<'a> {
    pub fn streaming(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: [WireMessage { role: "user", content: &request.message }],
            stream: true,
            provider: &request.provider,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    pub error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChunkChoice {
    pub delta: Option<ChatDelta>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatDelta {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProviderErrorBody {
    pub code: Option<serde_json::Value>,
    pub message: String,
}

impl ProviderErrorBody {
    /// Numeric code when the provider sends an HTTP-like one.
    pub fn status_code(&self) -> Option<u16> {
        self.code.as_ref().and_then(serde_json::Value::as_u64).and_then(|c| u16::try_from(c).ok())
    }
}
