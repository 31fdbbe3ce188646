//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |-------------|--------------------|------------------------------|
//! | WORK_DIR | /var/lib/ordo | data and log directory |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | LOG_LEVEL | info | tracing level filter |
//! | ENVIRONMENT | development | development \| production |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level filter
    pub log_level: String,
    /// Running environment: development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/ordo".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Directory holding the embedded database
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("data")
    }

    /// Directory for rolling log files (production only)
    pub fn log_dir(&self) -> Option<PathBuf> {
        if self.environment == "production" {
            Some(PathBuf::from(&self.work_dir).join("logs"))
        } else {
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
