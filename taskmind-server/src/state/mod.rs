//! Application State
//!
//! Holds the stores, and the chat pipeline shared by every handler.

mod accessors;

use std::sync::Arc;

use taskmind_core::chat::completion::CompletionAdapter;
use taskmind_core::chat::{ChatPipeline, RateLimiter, UsageRecorder};
use taskmind_core::store::{UsageLedger, UserRepository};
use taskmind_types::ChatSettings;

use crate::backends::Backends;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub users: Arc<dyn UserRepository>,
    pub ledger: Arc<dyn UsageLedger>,
    pub pipeline: ChatPipeline,
}

impl AppState {
    pub fn new_with_components(
        backends: Backends,
        completion: Arc<dyn CompletionAdapter>,
        settings: ChatSettings,
    ) -> Self {
        let rate_limiter =
            RateLimiter::with_threshold(backends.counter.clone(), settings.rate_limit_threshold);
        let usage = UsageRecorder::new(backends.ledger.clone());
        let pipeline = ChatPipeline::new(completion, rate_limiter, usage, settings);

        Self {
            inner: Arc::new(AppStateInner {
                users: backends.users,
                ledger: backends.ledger,
                pipeline,
            }),
        }
    }
}
