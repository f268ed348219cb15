//! # Taskmind Types
//!
//! Core types, models, and error definitions for Taskmind.
//!
//! - **`error`** - Typed error taxonomy for chat admission and accounts
//! - **`models`** - Domain models (User, usage records, chat DTOs, settings)
//!
//! ## Architecture Role
//!
//! `taskmind-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!      taskmind-types (this crate)
//!              │
//!              ▼
//!        taskmind-core
//!              │
//!              ▼
//!       taskmind-server
//! ```

pub mod error;
pub mod models;

pub use error::{AccountError, ChatError, UpstreamErrorKind};

pub use models::{
    AccountView, ChatReply, ChatRequest, ChatSettings, NewUsageRecord, ProviderPreference,
    TokenView, User, UsageRecord, DEFAULT_CREDITS,
};
