//! Notification endpoints.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use causa_shared::types::Notification;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let db = state.db.lock().await;
    let notifications = db.list_notifications_for_user(user.id)?;
    Ok(Json(notifications))
}

pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let db = state.db.lock().await;
    if !db.mark_notification_read(id, user.id)? {
        return Err(ApiError::NotFound(format!("notification {id}")));
    }
    Ok(Json(serde_json::json!({ "read": true })))
}
