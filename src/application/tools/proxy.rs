//! Proxy tools: pass-through requests to WordPress, Shopify, and PostHog APIs.

use super::{ToolContext, ToolOutput, optional_str, render_failure, required_str};
use serde_json::{Value, json};

const DEFAULT_WP_PATH: &str = "/wp-json/wp/v2/";
const DEFAULT_SHOPIFY_PATH: &str = "/admin/api/2024-04";

/// Validate the optional `query_params_json` argument before forwarding it.
fn query_params(args: &Value) -> Result<Option<String>, String> {
    match optional_str(args, "query_params_json") {
        Some(raw) => {
            if serde_json::from_str::<Value>(&raw).is_err() {
                return Err(
                    "Validation Error: 'query_params_json' must be a valid JSON string".to_string(),
                );
            }
            Ok(Some(raw))
        }
        None => Ok(None),
    }
}

fn method(args: &Value) -> String {
    optional_str(args, "method").unwrap_or_else(|| "get".to_string())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub async fn wordpress(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let path = optional_str(args, "path").unwrap_or_else(|| DEFAULT_WP_PATH.to_string());
    let method = method(args);
    let query_params_json = query_params(args)?;

    let mut proxy_data = json!({ "fqdn": fqdn, "method": method, "path": path });
    if let Some(params) = &query_params_json {
        proxy_data["query_params_json"] = Value::String(params.clone());
    }

    let response = ctx
        .guard
        .run("sitebay_wordpress_proxy", None, || {
            ctx.client.wordpress_proxy(&proxy_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**WordPress API Response:**\n```json\n{}\n```",
        pretty(&response)
    ))
}

pub async fn shopify(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let shop_name = required_str(args, "shop_name")?;
    let path = optional_str(args, "path").unwrap_or_else(|| DEFAULT_SHOPIFY_PATH.to_string());
    let method = method(args);
    let query_params_json = query_params(args)?;

    let mut proxy_data = json!({ "shop_name": shop_name, "method": method, "path": path });
    if let Some(params) = &query_params_json {
        proxy_data["query_params_json"] = Value::String(params.clone());
    }

    let response = ctx
        .guard
        .run("sitebay_shopify_proxy", None, || {
            ctx.client.shopify_proxy(&proxy_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**Shopify API Response:**\n```json\n{}\n```",
        pretty(&response)
    ))
}

pub async fn posthog(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let path = required_str(args, "path")?;
    let method = method(args);
    let query_params_json = query_params(args)?;

    let mut proxy_data = json!({ "path": path, "method": method });
    if let Some(params) = &query_params_json {
        proxy_data["query_params_json"] = Value::String(params.clone());
    }

    let response = ctx
        .guard
        .run("sitebay_posthog_proxy", None, || {
            ctx.client.posthog_proxy(&proxy_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**PostHog API Response:**\n```json\n{}\n```",
        pretty(&response)
    ))
}
