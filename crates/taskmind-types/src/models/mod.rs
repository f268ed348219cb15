//! Core domain models for Taskmind.

mod chat;
mod settings;
mod usage;
mod user;

pub use chat::{ChatReply, ChatRequest, DEFAULT_MODEL};
pub use settings::{ChatSettings, ProviderPreference};
pub use usage::{NewUsageRecord, UsageRecord, CHAT_ENDPOINT};
pub use user::{AccountView, TokenView, User, DEFAULT_CREDITS};
