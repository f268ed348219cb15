use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::middleware::{cors_layer, require_user};
use crate::state::AppState;

pub fn build_router(state: AppState, frontend_url: &str) -> Router {
    let protected_api = api::protected_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let public_routes = Router::<AppState>::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info))
        .merge(api::account_router());

    protected_api
        .merge(public_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_url))
}

async fn root() -> impl IntoResponse {
    axum::Json(serde_json::json!({"message": "Welcome to the Taskmind API"}))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
