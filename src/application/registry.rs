//! Tool catalogue and dispatch.
//!
//! The catalogue is static: names, descriptions, JSON Schemas for input, and
//! the soft-404 policy per tool. Dispatch routes a `tools/call` to its
//! handler; anything not in the catalogue is a protocol-level error handled
//! by the transport, not a tool failure.

use super::middleware::SoftFallback;
use super::tools::{ToolContext, ToolOutput, account, backups, operations, proxy, sites, staging};
use serde_json::{Value, json};

/// One registered tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Entry in the soft-404 table: `Some` means a 404 from the API is
    /// treated as expected absence. New operations default to `None`
    /// (propagate).
    pub soft_404: Option<SoftFallback>,
}

/// The full tool catalogue, in display order.
pub const CATALOGUE: &[ToolSpec] = &[
    ToolSpec {
        name: "sitebay_list_sites",
        description: "List all WordPress sites for the authenticated user, optionally filtered by team.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_get_site",
        description: "Get detailed information about a specific WordPress site.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_create_site",
        description: "Create a new WordPress site with the given admin account details.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_update_site",
        description: "Update an existing site's configuration (domain, git URL, HTTP auth, team, plan).",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_delete_site",
        description: "Delete a WordPress site permanently. This action cannot be undone.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_site_shell_command",
        description: "Execute a shell command on a site, including WP-CLI commands.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_site_edit_file",
        description: "Edit a file in the site's wp-content directory.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_site_events",
        description: "Get recent events for a site: deployments, updates, restores.",
        soft_404: Some(SoftFallback::EmptyList),
    },
    ToolSpec {
        name: "sitebay_create_staging",
        description: "Create a staging copy of a live site for testing changes.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_delete_staging",
        description: "Delete a site's staging copy, if one exists.",
        soft_404: Some(SoftFallback::NoResult),
    },
    ToolSpec {
        name: "sitebay_commit_staging",
        description: "Promote staged changes to the live site.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_backup_list_commits",
        description: "List available backup commits for point-in-time restore.",
        soft_404: Some(SoftFallback::EmptyList),
    },
    ToolSpec {
        name: "sitebay_backup_restore",
        description: "Restore a site to a previous point in time.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_list_restores",
        description: "List point-in-time restore operations for a site.",
        soft_404: Some(SoftFallback::EmptyList),
    },
    ToolSpec {
        name: "sitebay_external_path_list",
        description: "List external path configurations for a site.",
        soft_404: Some(SoftFallback::EmptyList),
    },
    ToolSpec {
        name: "sitebay_external_path_create",
        description: "Create an external path that proxies a site path to an external URL.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_external_path_update",
        description: "Update an external path configuration.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_external_path_delete",
        description: "Delete an external path configuration.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_wordpress_proxy",
        description: "Proxy a request to a WordPress site's REST API.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_shopify_proxy",
        description: "Proxy a request to a Shopify Admin API.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_posthog_proxy",
        description: "Proxy a request to the PostHog analytics API.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_list_teams",
        description: "List all teams for the authenticated user.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_list_templates",
        description: "List ready-made site templates available for quick launches.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_list_regions",
        description: "List available hosting regions.",
        soft_404: None,
    },
    ToolSpec {
        name: "sitebay_account_affiliates",
        description: "List users who signed up through your affiliate links.",
        soft_404: Some(SoftFallback::EmptyList),
    },
    ToolSpec {
        name: "sitebay_account_create_checkout",
        description: "Create a Stripe checkout session for team billing.",
        soft_404: None,
    },
];

/// Look up a tool by name.
pub fn spec(name: &str) -> Option<&'static ToolSpec> {
    CATALOGUE.iter().find(|tool| tool.name == name)
}

/// JSON Schema for a tool's input, for `tools/list`.
pub fn input_schema(name: &str) -> Value {
    match name {
        "sitebay_list_sites" => schema(
            json!({
                "team_id": { "type": "string", "description": "Optional team UUID to filter sites by team" }
            }),
            &[],
        ),
        "sitebay_get_site" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Fully qualified domain name of the site" }
            }),
            &["fqdn"],
        ),
        "sitebay_create_site" => schema(
            json!({
                "team_id": { "type": "string", "description": "Team UUID that owns the site" },
                "fqdn": { "type": "string", "description": "Domain for the new site, e.g. www.example.org" },
                "wordpress_blog_name": { "type": "string", "description": "Blog/site title" },
                "wordpress_first_name": { "type": "string", "description": "Admin first name" },
                "wordpress_last_name": { "type": "string", "description": "Admin last name" },
                "wordpress_email": { "type": "string", "description": "Admin email address" },
                "wordpress_username": { "type": "string", "description": "Admin username" },
                "wordpress_password": { "type": "string", "description": "Admin password" },
                "git_url": { "type": "string", "description": "Optional Git repository URL" },
                "ready_made_site_name": { "type": "string", "description": "Optional ready-made template name" },
                "is_free": { "type": "boolean", "description": "Optional free plan flag" }
            }),
            &[
                "team_id",
                "fqdn",
                "wordpress_blog_name",
                "wordpress_first_name",
                "wordpress_last_name",
                "wordpress_email",
                "wordpress_username",
                "wordpress_password",
            ],
        ),
        "sitebay_update_site" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain to update" },
                "cf_dev_mode_enabled": { "type": "boolean", "description": "Enable or disable Cloudflare dev mode" },
                "new_fqdn": { "type": "string", "description": "Change the site domain" },
                "git_url": { "type": "string", "description": "Repository URL for deployments" },
                "http_auth_enabled": { "type": "boolean", "description": "Enable or disable HTTP basic auth" },
                "team_id": { "type": "string", "description": "Move the site to a different team" },
                "is_free": { "type": "boolean", "description": "Toggle the free plan flag" }
            }),
            &["fqdn"],
        ),
        "sitebay_delete_site" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Domain of the site to delete" }
            }),
            &["fqdn"],
        ),
        "sitebay_site_shell_command" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "command": { "type": "string", "description": "Shell command to execute, e.g. 'wp plugin list'" },
                "cwd": { "type": "string", "description": "Optional working directory" },
                "auto_track_dir": { "type": "boolean", "description": "Track the working directory across commands" }
            }),
            &["fqdn", "command"],
        ),
        "sitebay_site_edit_file" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "file_path": { "type": "string", "description": "Path relative to wp-content, e.g. themes/mytheme/style.css" },
                "content": { "type": "string", "description": "New file content" }
            }),
            &["fqdn", "file_path", "content"],
        ),
        "sitebay_site_events" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "after_datetime": { "type": "string", "description": "Only events after this RFC 3339 timestamp" },
                "limit": { "type": "integer", "description": "Maximum number of events to show (default 20)" }
            }),
            &["fqdn"],
        ),
        "sitebay_create_staging" | "sitebay_delete_staging" | "sitebay_commit_staging" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Domain of the live site" }
            }),
            &["fqdn"],
        ),
        "sitebay_backup_list_commits" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "number_to_fetch": { "type": "integer", "description": "Number of backup entries to fetch (default 1)" }
            }),
            &["fqdn"],
        ),
        "sitebay_backup_restore" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "restore_point": { "type": "string", "description": "RFC 3339 timestamp to restore to; omit for latest" },
                "for_stage_site": { "type": "boolean", "description": "Restore the staging site instead of the live site" },
                "restore_db": { "type": "boolean", "description": "Restore the database (default true)" },
                "restore_wp_content": { "type": "boolean", "description": "Restore wp-content (default true)" },
                "delete_extra_files": { "type": "boolean", "description": "Delete files not present in the backup" },
                "dolt_restore_hash": { "type": "string", "description": "Optional Dolt commit hash for the database" },
                "is_dry_run": { "type": "boolean", "description": "Simulate without applying changes" }
            }),
            &["fqdn"],
        ),
        "sitebay_list_restores" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" }
            }),
            &["fqdn"],
        ),
        "sitebay_external_path_list" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" }
            }),
            &["fqdn"],
        ),
        "sitebay_external_path_create" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "path": { "type": "string", "description": "Path on the site, e.g. /api" },
                "target_url": { "type": "string", "description": "External URL to proxy to" },
                "description": { "type": "string", "description": "Optional description" }
            }),
            &["fqdn", "path", "target_url"],
        ),
        "sitebay_external_path_update" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "path_id": { "type": "string", "description": "ID of the external path" },
                "path": { "type": "string", "description": "New path value" },
                "target_url": { "type": "string", "description": "New target URL" },
                "description": { "type": "string", "description": "New description" }
            }),
            &["fqdn", "path_id"],
        ),
        "sitebay_external_path_delete" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "path_id": { "type": "string", "description": "ID of the external path to delete" }
            }),
            &["fqdn", "path_id"],
        ),
        "sitebay_wordpress_proxy" => schema(
            json!({
                "fqdn": { "type": "string", "description": "Site domain" },
                "path": { "type": "string", "description": "WordPress API path (default /wp-json/wp/v2/)" },
                "method": { "type": "string", "description": "HTTP method: get, post, put, delete (default get)" },
                "query_params_json": { "type": "string", "description": "Optional JSON string for payload or query params" }
            }),
            &["fqdn"],
        ),
        "sitebay_shopify_proxy" => schema(
            json!({
                "shop_name": { "type": "string", "description": "Shopify shop name" },
                "path": { "type": "string", "description": "Shopify API path (default /admin/api/2024-04)" },
                "method": { "type": "string", "description": "HTTP method: get, post, put, delete (default get)" },
                "query_params_json": { "type": "string", "description": "Optional JSON string for payload or query params" }
            }),
            &["shop_name"],
        ),
        "sitebay_posthog_proxy" => schema(
            json!({
                "path": { "type": "string", "description": "PostHog API path" },
                "method": { "type": "string", "description": "HTTP method: get, post, put, delete (default get)" },
                "query_params_json": { "type": "string", "description": "Optional JSON string for payload or query params" }
            }),
            &["path"],
        ),
        "sitebay_account_create_checkout" => schema(
            json!({
                "plan_name": { "type": "string", "description": "Plan type: starter, business, micro (default starter)" },
                "interval": { "type": "string", "description": "Billing interval: month or year (default month)" },
                "team_id": { "type": "string", "description": "Optional team to purchase for" }
            }),
            &[],
        ),
        // Parameterless listings.
        _ => schema(json!({}), &[]),
    }
}

fn schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Route a `tools/call` to its handler. `None` means the tool is unknown.
pub async fn dispatch(ctx: &ToolContext, name: &str, args: &Value) -> Option<ToolOutput> {
    let output = match name {
        "sitebay_list_sites" => sites::list_sites(ctx, args).await,
        "sitebay_get_site" => sites::get_site(ctx, args).await,
        "sitebay_create_site" => sites::create_site(ctx, args).await,
        "sitebay_update_site" => sites::update_site(ctx, args).await,
        "sitebay_delete_site" => sites::delete_site(ctx, args).await,
        "sitebay_site_shell_command" => operations::shell_command(ctx, args).await,
        "sitebay_site_edit_file" => operations::edit_file(ctx, args).await,
        "sitebay_site_events" => operations::site_events(ctx, args).await,
        "sitebay_create_staging" => staging::create_staging(ctx, args).await,
        "sitebay_delete_staging" => staging::delete_staging(ctx, args).await,
        "sitebay_commit_staging" => staging::commit_staging(ctx, args).await,
        "sitebay_backup_list_commits" => backups::list_commits(ctx, args).await,
        "sitebay_backup_restore" => backups::restore(ctx, args).await,
        "sitebay_list_restores" => backups::list_restores(ctx, args).await,
        "sitebay_external_path_list" => operations::external_path_list(ctx, args).await,
        "sitebay_external_path_create" => operations::external_path_create(ctx, args).await,
        "sitebay_external_path_update" => operations::external_path_update(ctx, args).await,
        "sitebay_external_path_delete" => operations::external_path_delete(ctx, args).await,
        "sitebay_wordpress_proxy" => proxy::wordpress(ctx, args).await,
        "sitebay_shopify_proxy" => proxy::shopify(ctx, args).await,
        "sitebay_posthog_proxy" => proxy::posthog(ctx, args).await,
        "sitebay_list_teams" => account::list_teams(ctx, args).await,
        "sitebay_list_templates" => account::list_templates(ctx, args).await,
        "sitebay_list_regions" => account::list_regions(ctx, args).await,
        "sitebay_account_affiliates" => account::affiliates(ctx, args).await,
        "sitebay_account_create_checkout" => account::create_checkout(ctx, args).await,
        _ => return None,
    };
    Some(output)
}
