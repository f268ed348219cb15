//! Storage collaborators: users, usage ledger, request counters.

mod memory;
mod postgres;
mod postgres_helpers;
mod redis_counter;
mod repository;

pub use memory::{MemoryCounter, MemoryStore};
pub use postgres::PostgresStore;
pub use redis_counter::RedisCounter;
pub use repository::{
    CounterError, NewUser, RepoResult, RepositoryError, RequestCounter, UsageLedger,
    UserRepository,
};
