//! Typed views over SiteBay API payloads.
//!
//! The API returns superset objects; these structs capture the fields the
//! server renders or inspects. Every field is optional and unknown fields are
//! ignored, so a shape drift upstream degrades display instead of failing the
//! call. Identifiers are kept as raw JSON values because the API mixes UUID
//! strings and numeric ids across resources.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A hosted WordPress site, keyed by its fully qualified domain name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Site {
    pub fqdn: Option<String>,
    pub active: Option<bool>,
    pub http_auth_enabled: Option<bool>,
    pub is_free: Option<bool>,
    pub git_url: Option<String>,
    pub git_enabled: Option<bool>,
    pub git_repo: Option<String>,
    pub status: Option<String>,
    pub region_name: Option<String>,
    pub wp_title: Option<String>,
    pub wp_version: Option<String>,
    pub php_version: Option<String>,
    pub mysql_version: Option<String>,
    pub site_url: Option<String>,
    pub admin_url: Option<String>,
    pub staging_site: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub plan_type_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub created_at: Option<String>,
}

/// A ready-made site template available for new launches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: Option<Value>,
    pub name: Option<String>,
}

/// A deployment/update/restore event recorded against a site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteEvent {
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub created_at: Option<String>,
}

/// A backup snapshot eligible for point-in-time restore.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackupCommit {
    pub id: Option<Value>,
    pub commit_hash: Option<String>,
    pub tables_saved: Option<Vec<Value>>,
    pub created_at: Option<String>,
    pub finished_at: Option<String>,
}

/// A point-in-time restore operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Restore {
    pub id: Option<Value>,
    pub restore_point: Option<String>,
    pub status: Option<String>,
    pub for_stage_site: Option<bool>,
    pub created_at: Option<String>,
    pub finished_at: Option<String>,
}

/// A reverse-proxy path mapping a site path to an external URL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExternalPath {
    pub id: Option<Value>,
    pub path: Option<String>,
    pub target_url: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

/// A user who signed up through an affiliate link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferredUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutSession {
    pub url: Option<String>,
}
