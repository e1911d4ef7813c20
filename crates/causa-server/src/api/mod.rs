//! REST API surface.
//!
//! Route handlers are grouped by dashboard area: `auth`, `cases`, `chat`,
//! `notifications`, `admin`, and `files`. Handlers stay thin — parsing
//! and response shaping only; every policy check and mutation lives in
//! the service modules.

pub mod admin;
pub mod auth;
pub mod cases;
pub mod chat;
pub mod files;
pub mod notifications;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use causa_shared::constants::MAX_ATTACHMENTS;

use crate::rate_limit::rate_limit_middleware;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    // A full submission may carry every attachment at once.
    let body_limit = state
        .config
        .max_attachment_size
        .saturating_mul(MAX_ATTACHMENTS)
        .saturating_add(1024 * 1024);

    // Credential endpoints get their own, stricter bucket.
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .layer(middleware::from_fn_with_state(
            state.auth_limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes)
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/cases", get(cases::list).post(cases::submit))
        .route("/cases/:id", get(cases::detail))
        .route("/cases/:id/contact", get(cases::contact))
        .route("/cases/:id/approve", post(cases::approve))
        .route("/cases/:id/reject", post(cases::reject))
        .route("/cases/:id/unlock", post(cases::unlock))
        .route("/cases/:id/messages", get(chat::list).post(chat::send))
        .route("/notifications", get(notifications::list))
        .route("/notifications/:id/read", post(notifications::mark_read))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id/approve", post(admin::approve_user))
        .route("/admin/users/:id/reject", post(admin::reject_user))
        .route("/admin/users/:id", delete(admin::delete_user))
        .route("/admin/stats", get(admin::stats))
        .route("/files/cases/:name", get(files::download))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(
            state.api_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
