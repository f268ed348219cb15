//! Detached usage-ledger writes.

use std::sync::Arc;
use taskmind_types::NewUsageRecord;
use tokio::task::JoinHandle;

use crate::store::UsageLedger;

/// Schedules ledger appends off the response path.
#[derive(Clone)]
pub struct UsageRecorder {
    ledger: Arc<dyn UsageLedger>,
}

impl UsageRecorder {
    pub fn new(ledger: Arc<dyn UsageLedger>) -> Self {
        Self { ledger }
    }

    /// Spawn the append and return immediately. Failures are logged, never
    /// surfaced to the caller. The handle may be dropped.
    pub fn record(&self, record: NewUsageRecord) -> JoinHandle<()> {
        let ledger = Arc::clone(&self.ledger);
        tokio::spawn(async move {
            let user_id = record.user_id;
            let model = record.model.clone();
            let tokens = record.tokens_used;
            match ledger.append(record).await {
                Ok(()) => {
                    tracing::debug!(user_id, %model, tokens, "Usage recorded");
                },
                Err(e) => {
                    tracing::error!(user_id, %model, tokens, "Failed to record usage: {}", e);
                },
            }
        })
    }
}
