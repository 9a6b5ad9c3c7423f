//! Tool handlers: argument binding, client invocation, display formatting.
//!
//! Each handler binds its arguments from the raw JSON-RPC payload, issues
//! exactly one API call through the [`ToolGuard`], and renders the result as
//! display text. All failures come back as `Err(text)` so the transport can
//! flag them without ever surfacing a protocol error.

pub mod account;
pub mod backups;
pub mod operations;
pub mod proxy;
pub mod sites;
pub mod staging;

use crate::application::middleware::{ToolCallError, ToolGuard};
use crate::infrastructure::api::SiteBayClient;
use crate::infrastructure::api::validation::display_value;
use serde_json::Value;
use std::sync::Arc;

/// Shared state handed to every tool handler.
#[derive(Clone)]
pub struct ToolContext {
    pub client: Arc<SiteBayClient>,
    pub guard: ToolGuard,
}

impl ToolContext {
    pub fn new(client: Arc<SiteBayClient>, guard: ToolGuard) -> Self {
        Self { client, guard }
    }
}

/// `Ok` carries success text, `Err` carries a user-visible failure string.
pub type ToolOutput = Result<String, String>;

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("Validation Error: '{key}' must be a non-empty string"))
}

pub(crate) fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn optional_bool(args: &Value, key: &str) -> Option<bool> {
    args.get(key).and_then(Value::as_bool)
}

pub(crate) fn optional_u64(args: &Value, key: &str) -> Option<u64> {
    args.get(key).and_then(Value::as_u64)
}

/// Display helper: missing strings render as "Unknown".
pub(crate) fn show(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

pub(crate) fn show_bool(value: &Option<bool>) -> String {
    value
        .map(|flag| flag.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub(crate) fn show_id(value: &Option<Value>) -> String {
    value
        .as_ref()
        .map(display_value)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Render a terminal tool failure, appending field-level validation detail
/// when the upstream provided it.
pub(crate) fn render_failure(error: &ToolCallError) -> String {
    let mut message = error.to_string();
    if let Some(fields) = error.api_error().field_errors() {
        message.push_str("\n\nSpecific field errors:\n");
        for (field, detail) in fields {
            message.push_str(&format!("  \u{2022} {field}: {detail}\n"));
        }
        message.push_str("\nPlease adjust your parameters and try again.");
    }
    message
}

/// Neutral producer for soft-404 operations that report "no result".
pub(crate) fn null_value() -> Value {
    Value::Null
}
