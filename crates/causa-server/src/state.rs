//! Application state shared across all request handlers.
//!
//! Cloned per handler by axum; every field is a cheap handle. The store
//! is a single SQLite connection behind an async mutex, so each store
//! call is a short critical section.

use std::sync::Arc;

use tokio::sync::Mutex;

use causa_store::Database;

use crate::attachments::AttachmentStore;
use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub attachments: Arc<AttachmentStore>,
    pub config: Arc<ServerConfig>,
    /// General per-IP limiter applied to every route.
    pub api_limiter: RateLimiter,
    /// Stricter limiter for the authentication endpoints.
    pub auth_limiter: RateLimiter,
}

impl AppState {
    pub fn new(db: Database, attachments: AttachmentStore, config: ServerConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            attachments: Arc::new(attachments),
            config: Arc::new(config),
            api_limiter: RateLimiter::new("api", 20.0, 40.0),
            auth_limiter: RateLimiter::new("auth", 2.0, 10.0),
        }
    }
}
