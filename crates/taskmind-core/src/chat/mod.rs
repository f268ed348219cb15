//! Chat admission and usage accounting.
//!
//! Request lifecycle: rate-limit check → credit check → stream completion →
//! accumulate fragments → record usage (detached).

pub mod completion;
mod credits;
mod pipeline;
mod rate_limit;
mod usage;


pub use credits::CreditGate;
pub use pipeline::ChatPipeline;
pub use rate_limit::{RateLimiter, RATE_LIMIT_THRESHOLD};
pub use usage::UsageRecorder;
