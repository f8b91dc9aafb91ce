//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `DAEBAK_HOST` - Bind address (default: 127.0.0.1)
//! - `DAEBAK_PORT` - Listen port (default: 3000)
//! - `DAEBAK_BASE_URL` - Public URL; an `https://` URL makes the session
//!   cookie `Secure` (default: `http://{host}:{port}`)
//! - `DAEBAK_DATA_DIR` - Directory for the file-backed store. Without it the
//!   storefront keeps users and orders in memory.
//! - `DAEBAK_MAX_BREAD` - Most baguettes per order (default: 20)
//! - `DAEBAK_MAX_WINE` - Most wine/champagne units per order (default: 20)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::models::DraftLimits;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// File store directory; `None` selects the in-memory store
    pub data_dir: Option<PathBuf>,
    /// Count maxima and delivery slots applied to drafts and edits
    pub limits: DraftLimits,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or("DAEBAK_HOST", &lookup, IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or("DAEBAK_PORT", &lookup, 3000_u16)?;
        let base_url = non_empty(lookup("DAEBAK_BASE_URL"))
            .unwrap_or_else(|| format!("http://{}", SocketAddr::new(host, port)));
        let data_dir = non_empty(lookup("DAEBAK_DATA_DIR")).map(PathBuf::from);

        let defaults = DraftLimits::default();
        let limits = DraftLimits {
            max_bread: parse_count("DAEBAK_MAX_BREAD", &lookup, defaults.max_bread)?,
            max_wine: parse_count("DAEBAK_MAX_WINE", &lookup, defaults.max_wine)?,
            ..defaults
        };

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            limits,
            sentry_dsn: non_empty(lookup("SENTRY_DSN")),
            sentry_environment: non_empty(lookup("SENTRY_ENVIRONMENT")),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Treat an empty variable as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Parse a per-order maximum; zero is rejected.
fn parse_count(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: u32,
) -> Result<u32, ConfigError> {
    let value = parse_or(key, lookup, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert!(config.data_dir.is_none());
        assert_eq!(config.limits, DraftLimits::default());
        assert!(config.sentry_dsn.is_none());
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DAEBAK_HOST", "0.0.0.0"),
            ("DAEBAK_PORT", "8080"),
            ("DAEBAK_BASE_URL", "https://daebak.example"),
            ("DAEBAK_DATA_DIR", "/var/lib/daebak"),
            ("DAEBAK_MAX_BREAD", "10"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.secure_cookies());
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/daebak")));
        assert_eq!(config.limits.max_bread, 10);
        assert_eq!(config.limits.max_wine, 20);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = load(&[("DAEBAK_DATA_DIR", ""), ("SENTRY_DSN", " ")]).unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("DAEBAK_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "DAEBAK_PORT"));

        let err = load(&[("DAEBAK_MAX_WINE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "DAEBAK_MAX_WINE"));

        assert!(load(&[("DAEBAK_HOST", "localhost")]).is_err());
    }
}
