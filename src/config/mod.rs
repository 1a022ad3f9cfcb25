//! Configuration module for the EduConsult backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to verify role-bearing JWTs (auth disabled when unset)
    pub jwt_secret: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory for uploaded images, served under /uploads
    pub uploads_path: PathBuf,
    /// Optional webhook URL for confirmation notifications
    pub notify_webhook: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Deployment environment name reported by the health endpoint
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("EDU_JWT_SECRET").ok();

        let db_path = env::var("EDU_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let uploads_path = env::var("EDU_UPLOADS_PATH")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let notify_webhook = env::var("EDU_NOTIFY_WEBHOOK").ok();

        let bind_addr = env::var("EDU_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid EDU_BIND_ADDR format");

        let log_level = env::var("EDU_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let environment = env::var("EDU_ENV").unwrap_or_else(|_| "development".to_string());

        Self {
            jwt_secret,
            db_path,
            uploads_path,
            notify_webhook,
            bind_addr,
            log_level,
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("EDU_JWT_SECRET");
        env::remove_var("EDU_DB_PATH");
        env::remove_var("EDU_UPLOADS_PATH");
        env::remove_var("EDU_NOTIFY_WEBHOOK");
        env::remove_var("EDU_BIND_ADDR");
        env::remove_var("EDU_LOG_LEVEL");
        env::remove_var("EDU_ENV");

        let config = Config::from_env();

        assert!(config.jwt_secret.is_none());
        assert!(config.notify_webhook.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.uploads_path, PathBuf::from("./data/uploads"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.environment, "development");
    }
}
