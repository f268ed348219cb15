use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Form, Json,
};
use serde::Deserialize;
use taskmind_core::accounts;
use taskmind_types::{AccountView, TokenView, UsageRecord, User};
use validator::Validate;

use super::ApiError;
use crate::state::AppState;

const DEFAULT_USAGE_LIMIT: i64 = 20;
const MAX_USAGE_LIMIT: i64 = 100;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1_u64))]
    pub password: String,
}

/// OAuth2 password-grant form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub limit: Option<i64>,
}

pub async fn me(Extension(user): Extension<User>) -> Json<AccountView> {
    Json(user.view())
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenView>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let user = accounts::register(state.users(), &payload.email, &payload.password, None).await?;
    Ok(Json(TokenView::bearer(user.api_key)))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenView>, ApiError> {
    let user = accounts::authenticate(state.users(), &form.username, &form.password).await?;
    Ok(Json(TokenView::bearer(user.api_key)))
}

/// Most recent ledger entries for the caller.
pub async fn usage(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<Vec<UsageRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_USAGE_LIMIT).clamp(1, MAX_USAGE_LIMIT);
    let records = state.ledger().list_for_user(user.id, limit).await?;
    Ok(Json(records))
}
