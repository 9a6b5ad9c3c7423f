//! Error taxonomy for SiteBay API calls.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Everything a SiteBay API call can fail with, classified by response status.
///
/// The client always raises exactly one of these kinds; retrying is the
/// middleware's responsibility, layered above.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the API.
    #[error("{message}")]
    Authentication { message: String },

    /// 404 from the API.
    #[error("{message}")]
    NotFound { message: String },

    /// 422 from the API, with field-level detail where the body allows it.
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    /// Any other non-2xx response.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        body: Option<Value>,
    },

    /// Transport-level failure: connect, DNS, timeout before a response.
    #[error("{message}")]
    Network { message: String },
}

impl ApiError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: BTreeMap<String, String>) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors,
        }
    }

    pub fn api(message: impl Into<String>, status: Option<u16>, body: Option<Value>) -> Self {
        Self::Api {
            message: message.into(),
            status,
            body,
        }
    }

    pub fn network(source: reqwest::Error) -> Self {
        Self::Network {
            message: format!("Network error: {source}"),
        }
    }

    /// Raised when a response parses but does not match the documented shape.
    pub fn unexpected_shape(endpoint: &str, body: Value) -> Self {
        Self::Api {
            message: format!("API Error: unexpected response shape from {endpoint}"),
            status: None,
            body: Some(body),
        }
    }

    /// HTTP status associated with this error kind, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::Api { status, .. } => *status,
            Self::Network { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Field-level validation detail, empty for every other kind.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }
}
