//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FRESHLY_API_URL` - Store backend base URL (default: `http://localhost:5000`)
//! - `FRESHLY_API_TIMEOUT_SECS` - Per-request timeout for backend calls (default: 10)
//! - `DASHBOARD_ORDERS_LIMIT` - Number of latest orders fetched for the dashboard (default: 5)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the admin panel (default: `http://localhost:3001`)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ORDERS_LIMIT: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Store backend configuration
    pub store_api: StoreApiConfig,
    /// Dashboard loading configuration
    pub dashboard: DashboardConfig,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Store backend API configuration.
#[derive(Debug, Clone)]
pub struct StoreApiConfig {
    /// Base URL, e.g. `http://localhost:5000`
    pub base_url: Url,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl StoreApiConfig {
    /// Create a configuration for the given base URL with the default timeout.
    ///
    /// The base path gets a trailing slash so endpoint paths join under it.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        }
    }

    fn from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = get_or_default(vars, "FRESHLY_API_URL", DEFAULT_API_URL);
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("FRESHLY_API_URL".to_string(), e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "FRESHLY_API_URL".to_string(),
                "must be an absolute http(s) URL".to_string(),
            ));
        }

        let timeout_secs = parse_or_default(
            vars,
            "FRESHLY_API_TIMEOUT_SECS",
            DEFAULT_API_TIMEOUT_SECS,
        )?;

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(base_url)
        })
    }
}

/// Dashboard loading configuration.
#[derive(Debug, Clone, Copy)]
pub struct DashboardConfig {
    /// `limit` passed to the orders endpoint for the latest-orders table
    pub orders_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            orders_limit: DEFAULT_ORDERS_LIMIT,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(&vars, "ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = parse_or_default(&vars, "ADMIN_PORT", 3001_u16)?;
        let base_url = get_or_default(&vars, "ADMIN_BASE_URL", "http://localhost:3001");

        let store_api = StoreApiConfig::from_vars(&vars)?;

        let orders_limit = parse_or_default(&vars, "DASHBOARD_ORDERS_LIMIT", DEFAULT_ORDERS_LIMIT)?;
        if orders_limit == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "DASHBOARD_ORDERS_LIMIT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let json_logs = vars("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let sentry_dsn = vars("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = vars("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = vars("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = vars("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            store_api,
            dashboard: DashboardConfig { orders_limit },
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the panel is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// `https://host/freshly` -> `https://host/freshly/`
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Get a variable with a default value.
fn get_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    vars: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    vars(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdminConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.store_api.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.store_api.timeout, Duration::from_secs(10));
        assert_eq!(config.dashboard.orders_limit, 5);
        assert!(!config.json_logs);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[("ADMIN_HOST", "0.0.0.0"), ("ADMIN_PORT", "8080")]).unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("ADMIN_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ADMIN_PORT"));
    }

    #[test]
    fn test_invalid_api_url() {
        let err = load(&[("FRESHLY_API_URL", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "FRESHLY_API_URL"));

        let err = load(&[("FRESHLY_API_URL", "mailto:shop@example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "FRESHLY_API_URL"));
    }

    #[test]
    fn test_zero_orders_limit_rejected() {
        let err = load(&[("DASHBOARD_ORDERS_LIMIT", "0")]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "DASHBOARD_ORDERS_LIMIT")
        );
    }

    #[test]
    fn test_api_url_path_gets_trailing_slash() {
        let config = load(&[("FRESHLY_API_URL", "https://example.com/freshly")]).unwrap();
        assert_eq!(config.store_api.base_url.as_str(), "https://example.com/freshly/");

        let config = load(&[("FRESHLY_API_URL", "https://example.com/freshly/")]).unwrap();
        assert_eq!(config.store_api.base_url.as_str(), "https://example.com/freshly/");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FRESHLY_API_URL", "https://api.freshly.example"),
            ("FRESHLY_API_TIMEOUT_SECS", "3"),
            ("DASHBOARD_ORDERS_LIMIT", "10"),
            ("ADMIN_BASE_URL", "https://admin.freshly.example"),
            ("LOG_FORMAT", "JSON"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.store_api.base_url.host_str(), Some("api.freshly.example"));
        assert_eq!(config.store_api.timeout, Duration::from_secs(3));
        assert_eq!(config.dashboard.orders_limit, 10);
        assert!(config.is_secure());
        assert!(config.json_logs);
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_sentry_dsn_is_unset() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
