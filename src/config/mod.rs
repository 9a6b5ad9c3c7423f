//! Environment-sourced runtime settings.
//!
//! Everything the server needs at startup comes from the process environment
//! (optionally seeded from a `.env` file): the API token, an optional base-URL
//! override, the request timeout, and the transport selection.

pub mod error;

pub use error::ConfigError;

use std::env;
use std::sync::Once;
use std::time::Duration;

/// Production API host, used unless `SITEBAY_API_URL` overrides it.
pub const DEFAULT_API_URL: &str = "https://my.sitebay.org";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "SITEBAY_API_TOKEN";

/// Optional base-URL override.
pub const API_URL_ENV: &str = "SITEBAY_API_URL";

/// Optional request timeout override, in whole seconds.
pub const TIMEOUT_ENV: &str = "SITEBAY_TIMEOUT_SECS";

/// Transport selection: `stdio` (default) or `http`.
pub const TRANSPORT_ENV: &str = "MCP_TRANSPORT";

/// HTTP transport bind host (default 127.0.0.1).
pub const HTTP_HOST_ENV: &str = "MCP_HTTP_HOST";

/// HTTP transport bind port (default 7823).
pub const HTTP_PORT_ENV: &str = "MCP_HTTP_PORT";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 7823;

static ENV_LOADER: Once = Once::new();

/// Ensures environment variables are loaded from a `.env` file, once.
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

/// Resolved client settings: where to reach the API and how long to wait.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Build settings from the environment, applying defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        ensure_env_loaded();

        let api_url = non_empty_var(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match non_empty_var(TIMEOUT_ENV) {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidTimeout {
                        variable: TIMEOUT_ENV,
                        value: raw,
                        source,
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { api_url, timeout })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP transport bind address resolved from the environment.
pub fn http_bind_from_env() -> Result<(String, u16), ConfigError> {
    ensure_env_loaded();

    let host = non_empty_var(HTTP_HOST_ENV).unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());
    let port = match non_empty_var(HTTP_PORT_ENV).or_else(|| non_empty_var("PORT")) {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort {
                variable: HTTP_PORT_ENV,
                value: raw,
                source,
            })?,
        None => DEFAULT_HTTP_PORT,
    };

    Ok((host, port))
}

/// Transport name from the environment, if set.
pub fn transport_from_env() -> Option<String> {
    ensure_env_loaded();
    non_empty_var(TRANSPORT_ENV).map(|value| value.to_ascii_lowercase())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
