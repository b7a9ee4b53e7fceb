//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PORTAL_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTAL_PORT` - Listen port (default: 3000)
//! - `PORTAL_BASE_URL` - Public URL; `https://` turns on secure cookies
//!   (default: <http://localhost:3000>)
//! - `PORTAL_CATALOG_PATH` - JSON file replacing the built-in document catalog
//! - `PORTAL_TYPING_DELAY_MS` - Pause before each assistant reply (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use diario_core::chat::DEFAULT_TYPING_DELAY_MS;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the portal
    pub base_url: String,
    /// Optional catalog file replacing the built-in mock documents
    pub catalog_path: Option<PathBuf>,
    /// Simulated "assistant is typing" pause
    pub typing_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog_path: None,
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env_or("PORTAL_HOST", defaults.host)?;
        let port = parse_env_or("PORTAL_PORT", defaults.port)?;
        let base_url = get_env_or_default("PORTAL_BASE_URL", &defaults.base_url);
        let catalog_path = get_optional_env("PORTAL_CATALOG_PATH").map(PathBuf::from);
        let typing_delay = Duration::from_millis(parse_env_or(
            "PORTAL_TYPING_DELAY_MS",
            DEFAULT_TYPING_DELAY_MS,
        )?);

        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?;
        let sentry_traces_sample_rate =
            parse_rate("SENTRY_TRACES_SAMPLE_RATE", defaults.sentry_traces_sample_rate)?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            typing_delay,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the portal is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate, which must lie in `0.0..=1.0`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let rate = parse_env_or(key, default)?;
    validate_rate(key, rate)
}

fn validate_rate(key: &str, rate: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.typing_delay, Duration::from_millis(1500));
        assert!(!config.is_secure());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_is_secure() {
        let config = PortalConfig {
            base_url: "https://diario.example".to_string(),
            ..PortalConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("PORTAL_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);

        let err = parse_value::<u16>("PORTAL_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORTAL_PORT"));

        let host: IpAddr = parse_value("PORTAL_HOST", "0.0.0.0").unwrap();
        assert!(host.is_unspecified());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("SENTRY_SAMPLE_RATE", 0.0).is_ok());
        assert!(validate_rate("SENTRY_SAMPLE_RATE", 1.0).is_ok());
        assert!(validate_rate("SENTRY_SAMPLE_RATE", 1.5).is_err());
        assert!(validate_rate("SENTRY_SAMPLE_RATE", -0.1).is_err());
    }
}
