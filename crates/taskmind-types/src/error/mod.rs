//! Typed error definitions for Taskmind.
//!
//! Every error here maps onto an HTTP status via `http_status_code()` and
//! renders the client-facing detail text through `Display`.

mod account;
mod chat;

pub use account::AccountError;
pub use chat::{ChatError, UpstreamErrorKind};
