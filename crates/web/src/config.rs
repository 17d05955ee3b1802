//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ARIF_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `ARIF_HOST` - Bind address (default: 127.0.0.1)
//! - `ARIF_PORT` - Listen port (default: 3000)
//! - `ARIF_BASE_URL` - Public base URL (default: http://localhost:3000)
//! - `ARIF_IMAGE_DIR` - Directory for uploaded product images (default: public/images)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Directory where uploaded product images are stored
    pub image_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ARIF_DATABASE_URL")?;
        let host = get_env_or_default("ARIF_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ARIF_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ARIF_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ARIF_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("ARIF_BASE_URL", "http://localhost:3000");
        let image_dir = PathBuf::from(get_env_or_default("ARIF_IMAGE_DIR", "public/images"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            image_dir,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            image_dir: PathBuf::from("public/images"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_get_env_or_default_returns_default() {
        assert_eq!(
            get_env_or_default("ARIF_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_missing_env_var_error_names_the_variable() {
        let err = ConfigError::MissingEnvVar("ARIF_DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: ARIF_DATABASE_URL"
        );
    }
}
