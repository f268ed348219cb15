//! Test helpers for taskmind-server unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use futures::stream;
use taskmind_core::chat::completion::{
    CompletionAdapter, CompletionError, CompletionRequest, FragmentStream,
};
use taskmind_core::chat::RateLimiter;
use taskmind_core::store::{MemoryCounter, MemoryStore, UserRepository};
use taskmind_types::{ChatSettings, User};

use crate::backends::Backends;
use crate::state::AppState;

pub const FRONTEND_URL: &str = "http://localhost:3000";

/// Canned upstream behavior.
pub enum StubReply {
    Fragments(Vec<&'static str>),
    Status(u16, &'static str),
}

pub struct StubAdapter {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubAdapter {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self { reply, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionAdapter for StubAdapter {
    async fn stream(&self, _request: CompletionRequest) -> Result<FragmentStream, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Fragments(fragments) => {
                let items: Vec<Result<String, CompletionError>> =
                    fragments.iter().map(|f| Ok((*f).to_string())).collect();
                Ok(Box::pin(stream::iter(items)))
            },
            StubReply::Status(status, message) => {
                Err(CompletionError::Status { status: *status, message: (*message).to_string() })
            },
        }
    }
}

/// Router over in-memory stores and a stubbed completion provider.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub counter: Arc<MemoryCounter>,
    pub adapter: Arc<StubAdapter>,
}

impl TestApp {
    pub fn new(reply: StubReply) -> Self {
        let store = Arc::new(MemoryStore::new());
        let counter = Arc::new(MemoryCounter::new());
        let adapter = StubAdapter::new(reply);

        let backends = Backends {
            users: store.clone(),
            ledger: store.clone(),
            counter: counter.clone(),
        };
        let state =
            AppState::new_with_components(backends, adapter.clone(), ChatSettings::default());
        let server = TestServer::new(crate::router::build_router(state, FRONTEND_URL))
            .expect("failed to start test server");

        Self { server, store, counter, adapter }
    }

    /// Registers a user directly in the store and sets its balance.
    pub async fn user_with_credits(&self, email: &str, credits: i64) -> User {
        let user = taskmind_core::accounts::register(self.store.as_ref(), email, "secret", None)
            .await
            .expect("failed to register test user");
        self.store.set_credits(user.id, credits).await.expect("failed to set credits");
        self.store.find_by_id(user.id).await.unwrap().expect("user vanished")
    }

    pub fn set_request_count(&self, user: &User, count: i64) {
        self.counter.set(RateLimiter::key(user.id), count);
    }
}

pub fn bearer(api_key: &str) -> axum::http::HeaderValue {
    axum::http::HeaderValue::from_str(&format!("Bearer {}", api_key))
        .expect("api key is a valid header value")
}

/// Waits for detached usage writes to land.
pub async fn wait_for_ledger(store: &MemoryStore, expected: usize) -> Vec<taskmind_types::UsageRecord> {
    for _ in 0..50 {
        let records = store.ledger_snapshot();
        if records.len() >= expected {
            return records;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    store.ledger_snapshot()
}
