//! HTTP client for the SiteBay REST API.
//!
//! One `SiteBayClient` is constructed at startup and shared for the process
//! lifetime; reqwest handles connection pooling underneath. Every call funnels
//! through [`SiteBayClient::request`], which owns URL construction, header
//! attachment, and response classification. The client never retries —
//! that policy lives in `application::middleware`.

pub mod error;
pub mod validation;

pub use error::ApiError;
pub use validation::{extract_field_errors, format_validation_message};

use crate::config::{ConfigError, Settings};
use crate::domain::types::{
    BackupCommit, CheckoutSession, ExternalPath, ReferredUser, Region, Restore, Site, SiteEvent,
    Team, Template,
};
use crate::infrastructure::auth::TokenAuth;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::debug;

/// Fixed versioned prefix in front of every endpoint path.
pub const API_PREFIX: &str = "/f/api/v1";

/// Prefix an endpoint with the API version segment, normalizing to exactly
/// one `/` separator.
pub fn api_path(endpoint: &str) -> String {
    let trimmed = endpoint.trim_start_matches('/');
    format!("{API_PREFIX}/{trimmed}")
}

/// A successful response body: parsed JSON, or raw text for the endpoints
/// that legitimately return plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Collapse into a JSON value; raw text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Client for the SiteBay API.
#[derive(Debug, Clone)]
pub struct SiteBayClient {
    http: Client,
    base_url: String,
    auth: TokenAuth,
}

impl SiteBayClient {
    pub fn new(auth: TokenAuth, settings: &Settings) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|source| ConfigError::HttpClient { source })?;

        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, api_path(endpoint))
    }

    /// Perform one API request and classify the response.
    ///
    /// Headers are attached per call rather than baked into the connection,
    /// so a retried call re-attaches them from the held credential.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
    ) -> Result<ApiBody, ApiError> {
        let url = self.url(endpoint);
        debug!(%method, endpoint, "Sending SiteBay API request");

        let mut builder = self.http.request(method, &url).headers(self.auth.headers()?);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::network)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::network)?;

        classify(status, text)
    }

    pub async fn get(
        &self,
        endpoint: &str,
        query: Option<&[(&str, String)]>,
    ) -> Result<ApiBody, ApiError> {
        self.request(Method::GET, endpoint, query, None).await
    }

    pub async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<ApiBody, ApiError> {
        self.request(Method::POST, endpoint, None, body).await
    }

    pub async fn patch(&self, endpoint: &str, body: Option<&Value>) -> Result<ApiBody, ApiError> {
        self.request(Method::PATCH, endpoint, None, body).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<ApiBody, ApiError> {
        self.request(Method::DELETE, endpoint, None, None).await
    }

    // Site management

    pub async fn list_sites(&self, team_id: Option<&str>) -> Result<Vec<Site>, ApiError> {
        let query = team_id.map(|id| [("team_id", id.to_string())]);
        let body = self.get("/site", query.as_ref().map(|q| q.as_slice())).await?;
        collection("/site", body)
    }

    pub async fn get_site(&self, fqdn: &str) -> Result<Site, ApiError> {
        let body = self.get(&format!("/site/{fqdn}"), None).await?;
        single("/site/{fqdn}", body)
    }

    pub async fn create_site(&self, site_data: &Value) -> Result<Site, ApiError> {
        let body = self.post("/site", Some(site_data)).await?;
        single("/site", body)
    }

    pub async fn update_site(&self, fqdn: &str, site_data: &Value) -> Result<Site, ApiError> {
        let body = self.patch(&format!("/site/{fqdn}"), Some(site_data)).await?;
        single("/site/{fqdn}", body)
    }

    pub async fn delete_site(&self, fqdn: &str) -> Result<Value, ApiError> {
        Ok(self.delete(&format!("/site/{fqdn}")).await?.into_value())
    }

    // Site operations

    pub async fn execute_shell_command(
        &self,
        fqdn: &str,
        command: &str,
        cwd: Option<&str>,
        auto_track_dir: Option<bool>,
    ) -> Result<Value, ApiError> {
        let mut payload = json!({ "cmd": command });
        if let Some(cwd) = cwd {
            payload["cwd"] = Value::String(cwd.to_string());
        }
        if let Some(auto_track_dir) = auto_track_dir {
            payload["auto_track_dir"] = Value::Bool(auto_track_dir);
        }
        let body = self
            .post(&format!("/site/{fqdn}/cmd"), Some(&payload))
            .await?;
        Ok(body.into_value())
    }

    pub async fn edit_file(
        &self,
        fqdn: &str,
        path: &str,
        content: &str,
    ) -> Result<Value, ApiError> {
        let payload = json!({ "path": path, "content": content });
        let body = self
            .post(&format!("/site/{fqdn}/wpfile_diff_edit"), Some(&payload))
            .await?;
        Ok(body.into_value())
    }

    pub async fn site_events(
        &self,
        fqdn: &str,
        after_datetime: Option<&str>,
    ) -> Result<Vec<SiteEvent>, ApiError> {
        let query = after_datetime.map(|after| [("after_datetime", after.to_string())]);
        let body = self
            .get(
                &format!("/site/{fqdn}/event"),
                query.as_ref().map(|q| q.as_slice()),
            )
            .await?;
        collection("/site/{fqdn}/event", body)
    }

    // Staging

    pub async fn create_staging(&self, fqdn: &str) -> Result<Value, ApiError> {
        let body = self
            .post(&format!("/site/{fqdn}/stage"), Some(&json!({})))
            .await?;
        Ok(body.into_value())
    }

    pub async fn delete_staging(&self, fqdn: &str) -> Result<Value, ApiError> {
        Ok(self.delete(&format!("/site/{fqdn}/stage")).await?.into_value())
    }

    pub async fn commit_staging(&self, fqdn: &str) -> Result<Value, ApiError> {
        let body = self.post(&format!("/site/{fqdn}/stage/commit"), None).await?;
        Ok(body.into_value())
    }

    // Backups and point-in-time restores

    pub async fn backup_commits(
        &self,
        fqdn: &str,
        number_to_fetch: u32,
    ) -> Result<Vec<BackupCommit>, ApiError> {
        let query = [("number_to_fetch", number_to_fetch.to_string())];
        let body = self
            .get(&format!("/site/{fqdn}/pit_restore/commits"), Some(&query))
            .await?;
        collection("/site/{fqdn}/pit_restore/commits", body)
    }

    pub async fn create_restore(
        &self,
        fqdn: &str,
        restore_data: &Value,
    ) -> Result<Value, ApiError> {
        let body = self
            .post(&format!("/site/{fqdn}/pit_restore"), Some(restore_data))
            .await?;
        Ok(body.into_value())
    }

    pub async fn list_restores(&self, fqdn: &str) -> Result<Vec<Restore>, ApiError> {
        let body = self.get(&format!("/site/{fqdn}/pit_restore"), None).await?;
        collection("/site/{fqdn}/pit_restore", body)
    }

    // External paths

    pub async fn list_external_paths(&self, fqdn: &str) -> Result<Vec<ExternalPath>, ApiError> {
        let body = self.get(&format!("/site/{fqdn}/external_path"), None).await?;
        collection("/site/{fqdn}/external_path", body)
    }

    pub async fn create_external_path(
        &self,
        fqdn: &str,
        path_data: &Value,
    ) -> Result<ExternalPath, ApiError> {
        let body = self
            .post(&format!("/site/{fqdn}/external_path"), Some(path_data))
            .await?;
        single("/site/{fqdn}/external_path", body)
    }

    pub async fn update_external_path(
        &self,
        fqdn: &str,
        path_id: &str,
        path_data: &Value,
    ) -> Result<ExternalPath, ApiError> {
        let body = self
            .patch(
                &format!("/site/{fqdn}/external_path/{path_id}"),
                Some(path_data),
            )
            .await?;
        single("/site/{fqdn}/external_path/{id}", body)
    }

    pub async fn delete_external_path(
        &self,
        fqdn: &str,
        path_id: &str,
    ) -> Result<Value, ApiError> {
        Ok(self
            .delete(&format!("/site/{fqdn}/external_path/{path_id}"))
            .await?
            .into_value())
    }

    // Proxies — open-ended payloads in both directions.

    pub async fn wordpress_proxy(&self, proxy_data: &Value) -> Result<Value, ApiError> {
        Ok(self.post("/wp-proxy", Some(proxy_data)).await?.into_value())
    }

    pub async fn shopify_proxy(&self, proxy_data: &Value) -> Result<Value, ApiError> {
        Ok(self
            .post("/shopify-proxy", Some(proxy_data))
            .await?
            .into_value())
    }

    pub async fn posthog_proxy(&self, proxy_data: &Value) -> Result<Value, ApiError> {
        Ok(self
            .post("/posthog-proxy", Some(proxy_data))
            .await?
            .into_value())
    }

    // Teams, catalogue, account

    pub async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        let body = self.get("/team", None).await?;
        collection("/team", body)
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        let body = self.get("/template", None).await?;
        collection("/template", body)
    }

    pub async fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        let body = self.get("/region", None).await?;
        collection("/region", body)
    }

    pub async fn affiliate_referrals(&self) -> Result<Vec<ReferredUser>, ApiError> {
        let body = self.get("/account/referred_user", None).await?;
        collection("/account/referred_user", body)
    }

    pub async fn create_checkout_session(
        &self,
        checkout_data: &Value,
    ) -> Result<CheckoutSession, ApiError> {
        let body = self.post("/create_checkout_session", Some(checkout_data)).await?;
        single("/create_checkout_session", body)
    }
}

/// Map a response status onto the error taxonomy, or hand back the payload.
fn classify(status: StatusCode, text: String) -> Result<ApiBody, ApiError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::authentication("Invalid or expired API token")),
        StatusCode::NOT_FOUND => Err(ApiError::not_found("Requested resource not found")),
        StatusCode::UNPROCESSABLE_ENTITY => match serde_json::from_str::<Value>(&text) {
            Ok(body) => Err(ApiError::validation(
                format_validation_message(&body),
                extract_field_errors(&body),
            )),
            Err(_) => Err(ApiError::validation(
                format!("Validation Error: {text}"),
                BTreeMap::new(),
            )),
        },
        status if status.as_u16() >= 400 => match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                let message = body
                    .get("detail")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));
                Err(ApiError::api(message, Some(status.as_u16()), Some(body)))
            }
            Err(_) => Err(ApiError::api(
                format!("API Error: {} - {text}", status.as_u16()),
                Some(status.as_u16()),
                None,
            )),
        },
        _ => Ok(match serde_json::from_str::<Value>(&text) {
            Ok(value) => ApiBody::Json(value),
            Err(_) => ApiBody::Text(text),
        }),
    }
}

/// Deserialize a single object payload.
fn single<T: DeserializeOwned>(endpoint: &str, body: ApiBody) -> Result<T, ApiError> {
    let value = body.into_value();
    serde_json::from_value(value.clone()).map_err(|_| ApiError::unexpected_shape(endpoint, value))
}

/// Deserialize a collection, accepting either a bare array or the API's
/// `{"results": [...]}` envelope. An envelope without `results` is an empty
/// collection, matching how list endpoints behave for new accounts.
fn collection<T: DeserializeOwned>(endpoint: &str, body: ApiBody) -> Result<Vec<T>, ApiError> {
    let value = body.into_value();
    let items = match &value {
        Value::Array(_) => value.clone(),
        Value::Object(map) => match map.get("results") {
            Some(results @ Value::Array(_)) => results.clone(),
            _ => return Ok(Vec::new()),
        },
        _ => return Err(ApiError::unexpected_shape(endpoint, value)),
    };
    serde_json::from_value(items).map_err(|_| ApiError::unexpected_shape(endpoint, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_path_normalizes_leading_slash() {
        assert_eq!(api_path("foo"), "/f/api/v1/foo");
        assert_eq!(api_path("/foo"), "/f/api/v1/foo");
        assert_eq!(api_path("/site/x.example.com"), "/f/api/v1/site/x.example.com");
    }

    #[test]
    fn classify_maps_statuses_onto_kinds() {
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, String::new()),
            Err(ApiError::Authentication { .. })
        ));
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, String::new()),
            Err(ApiError::NotFound { .. })
        ));
        assert!(matches!(
            classify(StatusCode::UNPROCESSABLE_ENTITY, "not json".to_string()),
            Err(ApiError::Validation { .. })
        ));
        assert!(matches!(
            classify(StatusCode::BAD_GATEWAY, "upstream".to_string()),
            Err(ApiError::Api { status: Some(502), .. })
        ));
    }

    #[test]
    fn classify_returns_text_for_non_json_success() {
        match classify(StatusCode::OK, "plain output".to_string()) {
            Ok(ApiBody::Text(text)) => assert_eq!(text, "plain output"),
            other => panic!("expected raw text, got {other:?}"),
        }
    }

    #[test]
    fn generic_error_prefers_detail_field() {
        let err = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "database offline"}"#.to_string(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "database offline");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn collection_unwraps_results_envelope() {
        let body = ApiBody::Json(serde_json::json!({"results": [{"name": "alpha"}]}));
        let teams: Vec<Team> = collection("/team", body).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name.as_deref(), Some("alpha"));
    }

    #[test]
    fn collection_without_results_is_empty() {
        let body = ApiBody::Json(serde_json::json!({"count": 0}));
        let teams: Vec<Team> = collection("/team", body).unwrap();
        assert!(teams.is_empty());
    }
}
