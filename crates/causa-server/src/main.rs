//! # causa-server
//!
//! HTTP backend for the Causa lead marketplace.
//!
//! This binary provides:
//! - **Account lifecycle**: registration, login sessions, and admin
//!   moderation of lawyer sign-ups
//! - **Case workflow**: submission with attachments, admin
//!   approval/rejection, and the per-lawyer lead unlock
//! - **Per-case chat** gated by the access policy
//! - **Notifications** written on every state transition
//! - **REST API** (axum) with per-IP rate limiting
//!
//! State lives in a SQLite database (`causa-store`) and a disk-backed
//! attachment store.

mod accounts;
mod api;
mod attachments;
mod cases;
mod chat;
mod config;
mod error;
mod notify;
mod password;
mod rate_limit;
mod session;
mod state;

#[cfg(test)]
mod testutil;

use tracing::info;
use tracing_subscriber::EnvFilter;

use causa_store::Database;

use crate::attachments::AttachmentStore;
use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,causa_server=debug")),
        )
        .init();

    info!("Starting Causa server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(
        addr = %config.http_addr,
        uploads = %config.upload_dir.display(),
        admin = %config.admin_email,
        "Loaded configuration"
    );

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------

    // Store (runs migrations on open)
    let db = match config.database_path {
        Some(ref path) => Database::open_at(path)?,
        None => Database::new()?,
    };

    // Attachment store (creates directories if missing)
    let attachment_store =
        AttachmentStore::new(config.upload_dir.clone(), config.max_attachment_size).await?;

    let http_addr = config.http_addr;
    let app_state = AppState::new(db, attachment_store, config);

    // Platform admin account, created once from ADMIN_* settings.
    accounts::bootstrap_admin(&app_state).await?;

    // -----------------------------------------------------------------------
    // 4. Spawn background tasks
    // -----------------------------------------------------------------------

    // Periodic rate limiter cleanup (every 5 minutes, evict buckets idle
    // >10 min)
    let limiters = [app_state.api_limiter.clone(), app_state.auth_limiter.clone()];
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            for limiter in &limiters {
                limiter.purge_stale(600.0).await;
            }
        }
    });

    // -----------------------------------------------------------------------
    // 5. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
