use taskmind_core::chat::ChatPipeline;
use taskmind_core::store::{UsageLedger, UserRepository};

use super::AppState;

impl AppState {
    pub fn users(&self) -> &dyn UserRepository {
        self.inner.users.as_ref()
    }

    pub fn ledger(&self) -> &dyn UsageLedger {
        self.inner.ledger.as_ref()
    }

    pub fn pipeline(&self) -> &ChatPipeline {
        &self.inner.pipeline
    }
}
