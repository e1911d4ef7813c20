//! Authentication endpoints: register, login, logout, current user.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use causa_shared::types::{User, UserRole};

use crate::accounts::{self, RegisterInput, RegisterOutcome};
use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub oab: Option<String>,
    #[serde(default)]
    pub uf_oab: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token; absent while the account awaits review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub pending_approval: bool,
    pub user: User,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let outcome = accounts::register(
        &state,
        RegisterInput {
            role: req.role,
            name: req.name,
            email: req.email,
            phone: req.phone,
            password: req.password,
            confirm_password: req.confirm_password,
            oab: req.oab,
            uf_oab: req.uf_oab,
        },
    )
    .await?;

    let response = match outcome {
        RegisterOutcome::Active(grant) => SessionResponse {
            token: Some(grant.token),
            pending_approval: false,
            user: grant.user,
        },
        RegisterOutcome::AwaitingReview(user) => SessionResponse {
            token: None,
            pending_approval: true,
            user,
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let grant = accounts::login(&state, &req.email, &req.password).await?;

    Ok(Json(SessionResponse {
        token: Some(grant.token),
        pending_approval: false,
        user: grant.user,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    accounts::logout(&state, token).await?;
    Ok(Json(serde_json::json!({ "loggedOut": true })))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
