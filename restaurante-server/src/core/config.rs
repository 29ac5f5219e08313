use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first when present):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | DATABASE_PATH | `<WORK_DIR>/restaurante.db` | SQLite database file |
/// | HTTP_PORT | 8080 | HTTP API port |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Grace period for in-flight requests |
/// | DB_MAX_CONNECTIONS | 5 | SQLite pool size |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (unset) | Daily rolling log directory, stdout when unset |
/// | ENVIRONMENT | development | development / staging / production |
///
/// ```ignore
/// WORK_DIR=/srv/restaurante HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory
    pub work_dir: String,
    /// SQLite database file
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Shutdown timeout (ms)
    pub shutdown_timeout_ms: u64,
    /// Pool size
    pub db_max_connections: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("restaurante.db")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            work_dir,
            database_path,
            http_port: env_or("HTTP_PORT", 8080),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the storage location, keeping everything else from the environment
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, database_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = database_path.into();
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides("/tmp/rest", "/tmp/rest/test.db");
        assert_eq!(config.work_dir, "/tmp/rest");
        assert_eq!(config.database_path, "/tmp/rest/test.db");
        assert_eq!(
            config.request_timeout(),
            Duration::from_millis(config.request_timeout_ms)
        );
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or("RESTAURANTE_TEST_UNSET_VARIABLE", 42u16), 42);
    }
}
