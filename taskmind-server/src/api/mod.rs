//! HTTP handlers.

pub mod account;
pub mod chat;
mod error;

#[cfg(test)]
mod account_tests;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub use error::ApiError;

/// Routes that require an authenticated user.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/me", get(account::me))
        .route("/usage", get(account::usage))
}

/// Registration and password login.
pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(account::register))
        .route("/token", post(account::login))
}
