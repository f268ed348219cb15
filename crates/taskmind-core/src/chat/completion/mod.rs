//! Streaming chat-completion adapter.
//!
//! The pipeline only sees [`CompletionAdapter`]; the OpenRouter-compatible
//! implementation lives in [`openrouter`].

mod openrouter;
mod wire;

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use taskmind_types::ProviderPreference;
use thiserror::Error;

pub use openrouter::{OpenRouterAdapter, OpenRouterConfig};

/// Incremental content fragments in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send>>;

/// One single-turn streaming completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    /// Sent as the only (user-role) message
    pub message: String,
    pub provider: ProviderPreference,
}

#[derive(Error, Debug)]
pub enum CompletionError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Error code: {status} - {message}")]
    Status { status: u16, message: String },

    /// Provider reported an error inside the event stream.
    #[error("{message}")]
    Provider { code: Option<u16>, message: String },

    /// Event stream broke or carried an unparseable payload.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl CompletionError {
    /// Upstream HTTP status associated with the failure, if known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Provider { code, .. } => *code,
            Self::Stream(_) => None,
        }
    }
}

#[async_trait]
pub trait CompletionAdapter: Send + Sync {
    /// Start a streaming completion. Dropping the returned stream closes the
    /// upstream connection.
    async fn stream(&self, request: CompletionRequest) -> Result<FragmentStream, CompletionError>;
}
