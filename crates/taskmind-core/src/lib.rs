//! # Taskmind Core
//!
//! Core business logic for the Taskmind backend.
//!
//! ## Architecture
//!
//! ```text
//! taskmind-core/src/
//! ├── chat/             # admission pipeline, rate limiter, credit gate, usage recorder
//! │   └── completion/   # streaming chat-completion adapter (OpenRouter)
//! ├── accounts.rs       # registration and password login
//! ├── store/            # user repository, usage ledger, counter store (pg, redis, memory)
//! └── credentials.rs    # api keys and password hashes
//! ```
//!
//! Every collaborator is constructed by the process entry point and injected;
//! nothing in this crate holds process-wide client state.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod accounts;
pub mod chat;
pub mod credentials;
pub mod error;
pub mod store;

pub use error::{AppError, AppResult};
