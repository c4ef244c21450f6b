//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                   | Default                          |
//! |----------------------------|----------------------------------|
//! | `DIVVY_HTTP_HOST`          | `127.0.0.1`                      |
//! | `DIVVY_HTTP_PORT`          | `8080`                           |
//! | `DIVVY_DB_PATH`            | `<platform data dir>/divvy.db`   |
//! | `DIVVY_DB_MAX_CONNECTIONS` | `5`                              |

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Interface to bind
    pub http_host: String,

    /// HTTP port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Upper bound for the SQLite pool
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (env, test map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let http_port = match lookup("DIVVY_HTTP_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DIVVY_HTTP_PORT".to_string()))?,
            None => DEFAULT_HTTP_PORT,
        };

        let db_max_connections = match lookup("DIVVY_DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue("DIVVY_DB_MAX_CONNECTIONS".to_string())),
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let database_path = match lookup("DIVVY_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            Some(_) => return Err(ConfigError::InvalidValue("DIVVY_DB_PATH".to_string())),
            None => default_database_path()?,
        };

        Ok(ApiConfig {
            http_host: lookup("DIVVY_HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string()),
            http_port,
            database_path,
            db_max_connections,
        })
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Determines the default database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.divvy.divvy/divvy.db`
/// - **Windows**: `%APPDATA%\divvy\divvy\data\divvy.db`
/// - **Linux**: `~/.local/share/divvy/divvy.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "divvy", "divvy").ok_or(ConfigError::NoDataDirectory)?;

    Ok(proj_dirs.data_dir().join("divvy.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory; set DIVVY_DB_PATH")]
    NoDataDirectory,
}
