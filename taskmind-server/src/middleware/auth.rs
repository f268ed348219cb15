use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use taskmind_core::credentials::constant_time_compare;

use crate::api::ApiError;
use crate::state::AppState;

/// Resolves the bearer API key to an active user and stores it in the
/// request extensions for `Extension<User>` extractors.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let Some(api_key) = extract_api_key(request.headers()).map(str::to_owned) else {
        return Err(ApiError::unauthorized());
    };

    let user = state.users().find_by_api_key(&api_key).await?;

    match user {
        Some(user) if user.is_active && constant_time_compare(&user.api_key, &api_key) => {
            tracing::debug!(user_id = user.id, "Authenticated request");
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        },
        _ => Err(ApiError::unauthorized()),
    }
}

fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .or_else(|| headers.get("x-api-key").and_then(|h| h.to_str().ok()))
        .map(str::trim)
        .filter(|k| !k.is_empty())
}
