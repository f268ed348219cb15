pub mod auth;
pub mod cors;

pub use auth::require_user;
pub use cors::cors_layer;
