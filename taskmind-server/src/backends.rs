//! Storage backend selection: PostgreSQL and Redis when configured,
//! in-memory stores otherwise.

use anyhow::{Context, Result};
use std::sync::Arc;
use taskmind_core::store::{
    MemoryCounter, MemoryStore, PostgresStore, RedisCounter, RequestCounter, UsageLedger,
    UserRepository,
};
use tracing::{info, warn};

use crate::cli::StoreArgs;

#[derive(Clone)]
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub ledger: Arc<dyn UsageLedger>,
    pub counter: Arc<dyn RequestCounter>,
}

impl Backends {
    /// Connects to the configured stores. PostgreSQL migrations run on connect.
    pub async fn connect(store: &StoreArgs) -> Result<Self> {
        let (users, ledger): (Arc<dyn UserRepository>, Arc<dyn UsageLedger>) =
            match &store.database_url {
                Some(url) => {
                    let pg = connect_postgres(url).await?;
                    pg.run_migrations().await.context("Failed to run migrations")?;
                    info!("🗄️ PostgreSQL connected, migrations applied");
                    let pg = Arc::new(pg);
                    (pg.clone() as Arc<dyn UserRepository>, pg as Arc<dyn UsageLedger>)
                },
                None => {
                    warn!("⚠️ DATABASE_URL not set; users and usage are kept in memory");
                    let memory = Arc::new(MemoryStore::new());
                    (memory.clone() as Arc<dyn UserRepository>, memory as Arc<dyn UsageLedger>)
                },
            };

        let counter: Arc<dyn RequestCounter> = match &store.redis_url {
            Some(url) => {
                let counter = RedisCounter::new(url).context("Invalid REDIS_URL")?;
                info!("🧮 Rate-limit counters read from Redis");
                Arc::new(counter)
            },
            None => {
                warn!("⚠️ REDIS_URL not set; rate-limit counters are in memory and never advance");
                Arc::new(MemoryCounter::new())
            },
        };

        Ok(Self { users, ledger, counter })
    }
}

/// Administrative commands operate on the persistent store only.
pub async fn require_postgres(store: &StoreArgs) -> Result<PostgresStore> {
    let url = store
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for this command")?;
    connect_postgres(url).await
}

async fn connect_postgres(url: &str) -> Result<PostgresStore> {
    PostgresStore::connect(url).await.context("Failed to connect to PostgreSQL")
}
