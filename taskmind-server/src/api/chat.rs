use axum::{extract::State, Extension, Json};
use taskmind_types::{ChatReply, ChatRequest, User};

use super::ApiError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state.pipeline().handle(&user, request).await?;
    Ok(Json(reply))
}
