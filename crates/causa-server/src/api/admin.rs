//! Admin endpoints: user moderation and platform statistics.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use causa_shared::policy;
use causa_shared::types::{AccountStatus, User, UserRole};
use causa_shared::PolicyError;

use crate::accounts;
use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = accounts::list_users(&state, &user).await?;
    Ok(Json(users))
}

pub async fn approve_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let approved = accounts::approve_user(&state, &user, id).await?;
    Ok(Json(approved))
}

pub async fn reject_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let rejected = accounts::reject_user(&state, &user, id).await?;
    Ok(Json(rejected))
}

pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    accounts::delete_user(&state, &user, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Σ over cases of `unlocked_by.len() × unlock_price`.
    pub total_revenue: f64,
    pub total_cases: usize,
    pub pending_cases: usize,
    pub pending_registrations: usize,
}

pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<StatsResponse>, ApiError> {
    if !policy::can_moderate(&user) {
        return Err(PolicyError::AdminOnly.into());
    }

    let db = state.db.lock().await;
    let cases = db.list_cases()?;
    let profiles = db.list_profiles()?;

    let total_revenue: f64 = cases
        .iter()
        .map(|c| c.unlocked_by.len() as f64 * c.unlock_price.unwrap_or(0.0))
        .sum();
    let pending_cases = cases
        .iter()
        .filter(|c| c.status == causa_shared::types::CaseStatus::Pending)
        .count();
    let pending_registrations = profiles
        .iter()
        .filter(|p| p.role == UserRole::Lawyer && p.status == AccountStatus::Pending)
        .count();

    Ok(Json(StatsResponse {
        total_revenue,
        total_cases: cases.len(),
        pending_cases,
        pending_registrations,
    }))
}
