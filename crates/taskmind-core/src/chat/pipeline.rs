//! Chat admission pipeline.

use futures::StreamExt;
use std::sync::Arc;
use taskmind_types::{ChatError, ChatReply, ChatRequest, ChatSettings, NewUsageRecord, User};

use super::completion::{CompletionAdapter, CompletionError, CompletionRequest};
use super::credits::CreditGate;
use super::rate_limit::RateLimiter;
use super::usage::UsageRecorder;

/// Concatenated stream output. One fragment counts as one token.
#[derive(Debug, Default)]
struct Accumulated {
    text: String,
    fragments: i64,
}

impl Accumulated {
    fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.fragments += 1;
    }
}

/// Runs one chat request end to end. Collaborators are injected; the
/// pipeline holds no locks and no transaction spans its steps.
pub struct ChatPipeline {
    completion: Arc<dyn CompletionAdapter>,
    rate_limiter: RateLimiter,
    credits: CreditGate,
    usage: UsageRecorder,
    settings: ChatSettings,
}

impl ChatPipeline {
    pub fn new(
        completion: Arc<dyn CompletionAdapter>,
        rate_limiter: RateLimiter,
        usage: UsageRecorder,
        settings: ChatSettings,
    ) -> Self {
        Self { completion, rate_limiter, credits: CreditGate, usage, settings }
    }

    /// Admit, complete and account one request.
    ///
    /// Rejections (429/402) happen before the provider is contacted. A
    /// failed or dropped stream yields no reply and no ledger entry.
    pub async fn handle(&self, user: &User, request: ChatRequest) -> Result<ChatReply, ChatError> {
        self.rate_limiter.check(user.id).await?;
        self.credits.check(user)?;

        let model = request.model.unwrap_or_else(|| self.settings.default_model.clone());
        let completion_request = CompletionRequest {
            model: model.clone(),
            message: request.message,
            provider: self.settings.provider.clone(),
        };

        tracing::info!(
            user_id = user.id,
            %model,
            message_len = completion_request.message.len(),
            "Chat request admitted"
        );

        let accumulated = self.complete(completion_request).await.map_err(|e| {
            tracing::error!(user_id = user.id, %model, "Chat completion failed: {}", e);
            ChatError::upstream(e.status(), e.to_string())
        })?;

        tracing::info!(
            user_id = user.id,
            %model,
            fragments = accumulated.fragments,
            response_len = accumulated.text.len(),
            "Chat completion finished"
        );

        self.usage.record(NewUsageRecord::chat_completed(user.id, model, accumulated.fragments));

        Ok(ChatReply { response: accumulated.text })
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Accumulated, CompletionError> {
        let mut stream = self.completion.stream(request).await?;
        let mut accumulated = Accumulated::default();
        while let Some(fragment) = stream.next().await {
            accumulated.push(&fragment?);
        }
        Ok(accumulated)
    }
}
