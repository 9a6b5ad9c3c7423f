use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur when resolving startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "SiteBay API token is required. Set the SITEBAY_API_TOKEN environment variable or pass --api-token."
    )]
    MissingToken,

    #[error("invalid value '{value}' for {variable}: {source}")]
    InvalidTimeout {
        variable: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid port '{value}' for {variable}: {source}")]
    InvalidPort {
        variable: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },
}
