//! Redis-backed request counter.

use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tokio::sync::Mutex;

use super::repository::{parse_counter, CounterError, RequestCounter};

#[derive(Clone, Debug)]
struct RedisCounterConfig {
    connection_timeout: Duration,
    response_timeout: Duration,
}

impl Default for RedisCounterConfig {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            response_timeout: Duration::from_secs(5),
        }
    }
}

/// Reads counters stored as decimal strings.
pub struct RedisCounter {
    client: redis::Client,
    config: RedisCounterConfig,
    connection: Mutex<Option<redis::aio::MultiplexedConnection>>,
}

impl RedisCounter {
    pub fn new(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client, config: RedisCounterConfig::default(), connection: Mutex::new(None) })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, CounterError> {
        let mut guard = self.connection.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = tokio::time::timeout(
            self.config.connection_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CounterError::Unavailable("connection timed out".to_string()))?
        .map_err(|err| CounterError::Unavailable(err.to_string()))?;

        tracing::debug!("Redis counter connection established");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    async fn reset_connection(&self) {
        self.connection.lock().await.take();
    }
}

#[async_trait]
impl RequestCounter for RedisCounter {
    async fn current(&self, key: &str) -> Result<Option<i64>, CounterError> {
        let mut conn = self.get_connection().await?;

        let result =
            tokio::time::timeout(self.config.response_timeout, conn.get::<_, Option<String>>(key))
                .await;

        let raw = match result {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                self.reset_connection().await;
                return Err(CounterError::Unavailable(err.to_string()));
            },
            Err(_) => {
                self.reset_connection().await;
                return Err(CounterError::Unavailable("read timed out".to_string()));
            },
        };

        match raw {
            Some(value) => parse_counter(key, &value),
            None => Ok(None),
        }
    }
}
