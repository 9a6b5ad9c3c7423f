//! Readable MCP resources: site configuration and account summary.

use super::tools::ToolContext;
use serde_json::{Map, Value, json};
use tracing::debug;

pub const ACCOUNT_SUMMARY_URI: &str = "sitebay://account/summary";
pub const SITE_CONFIG_TEMPLATE: &str = "sitebay://site/{fqdn}/config";

const RECENT_SITES_SHOWN: usize = 5;

/// Concrete resources advertised by `resources/list`.
pub fn list() -> Value {
    json!({
        "resources": [
            {
                "uri": ACCOUNT_SUMMARY_URI,
                "name": "Account summary",
                "description": "Account overview: site counts, teams, regions, templates, and recent activity.",
                "mimeType": "application/json"
            }
        ]
    })
}

/// Parameterized resources advertised by `resources/templates/list`.
pub fn templates() -> Value {
    json!({
        "resourceTemplates": [
            {
                "uriTemplate": SITE_CONFIG_TEMPLATE,
                "name": "Site configuration",
                "description": "Technical specs, URLs, and feature flags for one site.",
                "mimeType": "application/json"
            }
        ]
    })
}

/// Read a resource by URI. `Err` carries a user-visible failure string.
pub async fn read(ctx: &ToolContext, uri: &str) -> Result<String, String> {
    debug!(uri, "Reading resource");

    if uri == ACCOUNT_SUMMARY_URI {
        return account_summary(ctx).await;
    }

    if let Some(fqdn) = uri
        .strip_prefix("sitebay://site/")
        .and_then(|rest| rest.strip_suffix("/config"))
        .filter(|fqdn| !fqdn.is_empty())
    {
        return site_config(ctx, fqdn).await;
    }

    Err(format!("Unknown resource URI: {uri}"))
}

async fn site_config(ctx: &ToolContext, fqdn: &str) -> Result<String, String> {
    let site = ctx
        .guard
        .run("site_config_resource", None, || ctx.client.get_site(fqdn))
        .await
        .map_err(|error| error.to_string())?;

    let config = json!({
        "site_info": {
            "domain": site.fqdn,
            "title": site.wp_title,
            "status": site.status,
            "region": site.region_name,
            "created": site.created_at,
            "updated": site.updated_at
        },
        "technical_specs": {
            "php_version": site.php_version,
            "mysql_version": site.mysql_version,
            "wordpress_version": site.wp_version,
            "git_enabled": site.git_enabled.unwrap_or(false)
        },
        "urls": {
            "site_url": site.site_url,
            "admin_url": site.admin_url
        },
        "features": {
            "staging_available": site.staging_site.as_ref().is_some_and(|value| !value.is_null()),
            "git_integration": site.git_enabled.unwrap_or(false),
            "backup_enabled": true
        }
    });

    serde_json::to_string_pretty(&config).map_err(|error| error.to_string())
}

async fn account_summary(ctx: &ToolContext) -> Result<String, String> {
    let sites = ctx
        .guard
        .run("account_summary_resource", Some(Vec::new), || {
            ctx.client.list_sites(None)
        })
        .await
        .map_err(|error| error.to_string())?;
    let teams = ctx
        .guard
        .run("account_summary_resource", Some(Vec::new), || {
            ctx.client.list_teams()
        })
        .await
        .map_err(|error| error.to_string())?;
    let regions = ctx
        .guard
        .run("account_summary_resource", Some(Vec::new), || {
            ctx.client.list_regions()
        })
        .await
        .map_err(|error| error.to_string())?;
    let templates = ctx
        .guard
        .run("account_summary_resource", Some(Vec::new), || {
            ctx.client.list_templates()
        })
        .await
        .map_err(|error| error.to_string())?;

    let mut by_status: Map<String, Value> = Map::new();
    let mut by_region: Map<String, Value> = Map::new();
    for site in &sites {
        let status = site.status.clone().unwrap_or_else(|| "unknown".to_string());
        let count = by_status.get(&status).and_then(Value::as_u64).unwrap_or(0);
        by_status.insert(status, Value::from(count + 1));

        let region = site
            .region_name
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        let count = by_region.get(&region).and_then(Value::as_u64).unwrap_or(0);
        by_region.insert(region, Value::from(count + 1));
    }

    let mut sorted = sites.clone();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent: Vec<Value> = sorted
        .iter()
        .take(RECENT_SITES_SHOWN)
        .map(|site| {
            json!({
                "domain": site.fqdn,
                "status": site.status,
                "created": site.created_at,
                "region": site.region_name
            })
        })
        .collect();

    let summary = json!({
        "account_overview": {
            "total_sites": sites.len(),
            "total_teams": teams.len(),
            "available_regions": regions.len(),
            "available_templates": templates.len()
        },
        "sites_by_status": by_status,
        "sites_by_region": by_region,
        "recent_sites": recent
    });

    serde_json::to_string_pretty(&summary).map_err(|error| error.to_string())
}
