//! Bearer-token authentication for the SiteBay API.

use crate::config::{self, ConfigError, TOKEN_ENV};
use crate::infrastructure::api::ApiError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::env;

/// Tokens shorter than this are almost certainly truncated or misconfigured.
const MIN_TOKEN_LEN: usize = 20;

/// Holds the API credential for the lifetime of the process.
///
/// The token is resolved once at construction, either from an explicit value
/// or from the `SITEBAY_API_TOKEN` environment variable, and never mutated.
#[derive(Clone)]
pub struct TokenAuth {
    token: String,
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the credential itself.
        f.debug_struct("TokenAuth")
            .field("token_len", &self.token.chars().count())
            .finish()
    }
}

impl TokenAuth {
    /// Resolve the credential: an explicit token wins, otherwise the
    /// environment variable. Neither being set is a startup failure.
    pub fn new(explicit: Option<String>) -> Result<Self, ConfigError> {
        config::ensure_env_loaded();

        let token = explicit
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(token_from_env)
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self { token })
    }

    /// Header set attached to every outbound API request.
    pub fn headers(&self) -> Result<HeaderMap, ApiError> {
        if self.token.is_empty() {
            // Unreachable given the construction contract.
            return Err(ApiError::authentication("No API token available"));
        }

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            ApiError::authentication("API token contains characters not allowed in headers")
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Cheap pre-flight sanity check. The real verification happens
    /// server-side on first use.
    pub fn is_well_formed(&self) -> bool {
        let token = self.token.trim();
        !token.is_empty() && token.chars().count() >= MIN_TOKEN_LEN
    }
}

fn token_from_env() -> Option<String> {
    env::var(TOKEN_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
