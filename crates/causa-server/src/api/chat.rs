//! Per-case chat endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use causa_shared::types::ChatMessage;

use crate::chat;
use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = chat::list(&state, &user, case_id).await?;
    Ok(Json(messages))
}

#[derive(Deserialize)]
pub struct SendRequest {
    pub text: String,
}

pub async fn send(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(case_id): Path<Uuid>,
    Json(req): Json<SendRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let message = chat::send(&state, &user, case_id, &req.text).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
