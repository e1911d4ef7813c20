//! Session tokens and the authenticated-user extractor.
//!
//! A session is an opaque random bearer token stored alongside the user
//! id. Handlers that declare a [`CurrentUser`] parameter receive the
//! resolved profile; requests without a valid token are rejected before
//! the handler runs.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use rand::distributions::Alphanumeric;
use rand::Rng;

use causa_shared::constants::SESSION_TOKEN_LEN;
use causa_shared::types::User;
use causa_store::StoreError;

use crate::error::ApiError;
use crate::state::AppState;

/// Generate a fresh random session token.
pub fn new_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// The profile behind the request's `Authorization: Bearer` token.
pub struct CurrentUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

        let db = state.db.lock().await;
        match db.get_session_user(token) {
            Ok(user) => Ok(CurrentUser(user)),
            Err(StoreError::NotFound) => {
                Err(ApiError::Unauthorized("invalid or expired session".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_and_distinct() {
        let a = new_token();
        let b = new_token();
        assert_eq!(a.len(), SESSION_TOKEN_LEN);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
