//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development, except the bootstrap admin
//! password, which must be provided explicitly before the moderation
//! account is created.

use std::net::SocketAddr;
use std::path::PathBuf;

use causa_shared::constants::{DEFAULT_HTTP_PORT, MAX_ATTACHMENT_SIZE};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Filesystem path of the SQLite database.
    /// Env: `DATABASE_PATH`
    /// Default: platform data directory (see `causa_store::Database::new`).
    pub database_path: Option<PathBuf>,

    /// Filesystem path where case attachments are stored.
    /// Env: `UPLOAD_DIR`
    /// Default: `./uploads`
    pub upload_dir: PathBuf,

    /// Maximum size of a single attachment in bytes.
    /// Env: `MAX_ATTACHMENT_SIZE`
    /// Default: 10 MiB.
    pub max_attachment_size: usize,

    /// Base URL prepended to attachment paths in API responses.
    /// Env: `PUBLIC_BASE_URL`
    /// Default: empty (relative URLs).
    pub public_base_url: String,

    // -- Bootstrap admin account --

    /// Email of the platform admin account, created at startup when
    /// missing.
    /// Env: `ADMIN_EMAIL`
    /// Default: `admin@causa.app`
    pub admin_email: String,

    /// Display name of the platform admin account.
    /// Env: `ADMIN_NAME`
    /// Default: `Administrador`
    pub admin_name: String,

    /// Password for the bootstrap admin account.
    /// Env: `ADMIN_PASSWORD`
    /// Default: unset (bootstrap is skipped with a warning).
    pub admin_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            database_path: None,
            upload_dir: PathBuf::from("./uploads"),
            max_attachment_size: MAX_ATTACHMENT_SIZE,
            public_base_url: String::new(),
            admin_email: "admin@causa.app".to_string(),
            admin_name: "Administrador".to_string(),
            admin_password: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(path);
        }

        if let Ok(val) = std::env::var("MAX_ATTACHMENT_SIZE") {
            if let Ok(n) = val.parse::<usize>() {
                config.max_attachment_size = n;
            } else {
                tracing::warn!(value = %val, "Invalid MAX_ATTACHMENT_SIZE, using default");
            }
        }

        if let Ok(url) = std::env::var("PUBLIC_BASE_URL") {
            config.public_base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(email) = std::env::var("ADMIN_EMAIL") {
            config.admin_email = email;
        }

        if let Ok(name) = std::env::var("ADMIN_NAME") {
            config.admin_name = name;
        }

        if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
            if !password.is_empty() {
                config.admin_password = Some(password);
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr, ([0, 0, 0, 0], 8080).into());
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert!(config.admin_password.is_none());
    }
}
