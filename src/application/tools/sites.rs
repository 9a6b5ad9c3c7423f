//! Site management tools: list, inspect, create, update, delete.

use super::{ToolContext, ToolOutput, optional_bool, optional_str, render_failure, required_str,
            show, show_bool};
use serde_json::{Value, json};

pub async fn list_sites(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let team_id = optional_str(args, "team_id");

    let sites = ctx
        .guard
        .run("sitebay_list_sites", None, || {
            ctx.client.list_sites(team_id.as_deref())
        })
        .await
        .map_err(|error| render_failure(&error))?;

    if sites.is_empty() {
        return Ok("No sites found for your account.".to_string());
    }

    let mut result = format!("Found {} site(s):\n\n", sites.len());
    for site in &sites {
        result.push_str(&format!("\u{2022} **{}**\n", show(&site.fqdn)));
        result.push_str(&format!("  - Active: {}\n", show_bool(&site.active)));
        result.push_str(&format!(
            "  - HTTP Auth Enabled: {}\n",
            show_bool(&site.http_auth_enabled)
        ));
        result.push_str(&format!("  - Is Free: {}\n", show_bool(&site.is_free)));
        result.push_str(&format!("  - Created: {}\n\n", show(&site.created_at)));
    }
    Ok(result)
}

pub async fn get_site(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    let site = ctx
        .guard
        .run("sitebay_get_site", None, || ctx.client.get_site(fqdn))
        .await
        .map_err(|error| render_failure(&error))?;

    let mut result = format!("**Site Details for {fqdn}**\n\n");
    result.push_str(&format!("\u{2022} **Active**: {}\n", show_bool(&site.active)));
    result.push_str(&format!(
        "\u{2022} **HTTP Auth Enabled**: {}\n",
        show_bool(&site.http_auth_enabled)
    ));
    result.push_str(&format!("\u{2022} **Is Free**: {}\n", show_bool(&site.is_free)));
    result.push_str(&format!(
        "\u{2022} **Git URL**: {}\n",
        site.git_url.as_deref().unwrap_or("\u{2014}")
    ));
    result.push_str(&format!("\u{2022} **Created**: {}\n", show(&site.created_at)));
    result.push_str(&format!("\u{2022} **Updated**: {}\n", show(&site.updated_at)));

    if site.git_enabled.unwrap_or(false) {
        result.push_str("\u{2022} **Git Integration**: Enabled\n");
        if let Some(repo) = &site.git_repo {
            result.push_str(&format!("\u{2022} **Git Repository**: {repo}\n"));
        }
    }

    Ok(result)
}

pub async fn create_site(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let team_id = required_str(args, "team_id")?;
    let fqdn = required_str(args, "fqdn")?;
    let blog_name = required_str(args, "wordpress_blog_name")?;
    let first_name = required_str(args, "wordpress_first_name")?;
    let last_name = required_str(args, "wordpress_last_name")?;
    let email = required_str(args, "wordpress_email")?;
    let username = required_str(args, "wordpress_username")?;
    let password = required_str(args, "wordpress_password")?;

    if !fqdn.contains('.') {
        return Err("Validation Error: 'fqdn' must be a valid domain name".to_string());
    }

    let git_url = optional_str(args, "git_url");
    let ready_made_site_name = optional_str(args, "ready_made_site_name");
    let is_free = optional_bool(args, "is_free");

    let mut site_data = json!({
        "team_id": team_id,
        "fqdn": fqdn,
        "wordpress_blog_name": blog_name,
        "wordpress_first_name": first_name,
        "wordpress_last_name": last_name,
        "wordpress_email": email,
        "wordpress_username": username,
        "wordpress_password": password,
    });
    if let Some(git_url) = &git_url {
        site_data["git_url"] = Value::String(git_url.clone());
    }
    if let Some(name) = &ready_made_site_name {
        site_data["ready_made_site_name"] = Value::String(name.clone());
    }
    if let Some(is_free) = is_free {
        site_data["is_free"] = Value::Bool(is_free);
    }

    let site = ctx
        .guard
        .run("sitebay_create_site", None, || {
            ctx.client.create_site(&site_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    let mut result = String::from("**Site Created Successfully**\n\n");
    result.push_str(&format!(
        "\u{2022} **Domain**: {}\n",
        site.fqdn.as_deref().unwrap_or(fqdn)
    ));
    result.push_str(&format!("\u{2022} **Active**: {}\n", show_bool(&site.active)));
    result.push_str(&format!(
        "\u{2022} **HTTP Auth Enabled**: {}\n",
        show_bool(&site.http_auth_enabled)
    ));
    result.push_str(&format!("\u{2022} **Admin Username**: {username}\n"));
    result.push_str(&format!("\u{2022} **Admin Email**: {email}\n"));
    if let Some(git_url) = &git_url {
        result.push_str(&format!("\u{2022} **Git URL**: {git_url}\n"));
    }
    if let Some(name) = &ready_made_site_name {
        result.push_str(&format!("\u{2022} **Ready-made**: {name}\n"));
    }
    if let Some(is_free) = is_free {
        result.push_str(&format!(
            "\u{2022} **Plan**: {}\n",
            if is_free { "Free" } else { "Paid" }
        ));
    }
    result.push_str("\nYour WordPress site is being deployed and will be ready shortly.");

    Ok(result)
}

pub async fn update_site(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    let cf_dev_mode_enabled = optional_bool(args, "cf_dev_mode_enabled");
    let new_fqdn = optional_str(args, "new_fqdn");
    let git_url = optional_str(args, "git_url");
    let http_auth_enabled = optional_bool(args, "http_auth_enabled");
    let team_id = optional_str(args, "team_id");
    let is_free = optional_bool(args, "is_free");

    let mut site_data = json!({});
    if let Some(flag) = cf_dev_mode_enabled {
        site_data["cf_dev_mode_enabled"] = Value::Bool(flag);
    }
    if let Some(new_fqdn) = &new_fqdn {
        site_data["new_fqdn"] = Value::String(new_fqdn.clone());
    }
    if let Some(git_url) = &git_url {
        site_data["git_url"] = Value::String(git_url.clone());
    }
    if let Some(flag) = http_auth_enabled {
        site_data["http_auth_enabled"] = Value::Bool(flag);
    }
    if let Some(team_id) = &team_id {
        site_data["team_id"] = Value::String(team_id.clone());
    }
    if let Some(is_free) = is_free {
        site_data["is_free"] = Value::Bool(is_free);
    }

    if site_data.as_object().is_some_and(|map| map.is_empty()) {
        return Ok("No updates specified. Provide at least one supported field.".to_string());
    }

    let site = ctx
        .guard
        .run("sitebay_update_site", None, || {
            ctx.client.update_site(fqdn, &site_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    let mut result = String::from("**Site Updated Successfully**\n\n");
    result.push_str(&format!(
        "\u{2022} **Domain**: {}\n",
        site.fqdn.as_deref().unwrap_or(fqdn)
    ));
    result.push_str(&format!("\u{2022} **Status**: {}\n", show(&site.status)));

    if let Some(flag) = cf_dev_mode_enabled {
        result.push_str(&format!(
            "\u{2022} **Cloudflare Dev Mode**: {}\n",
            if flag { "Enabled" } else { "Disabled" }
        ));
    }
    if let Some(new_fqdn) = &new_fqdn {
        result.push_str(&format!("\u{2022} **New Domain**: {new_fqdn}\n"));
    }
    if let Some(git_url) = &git_url {
        result.push_str(&format!("\u{2022} **Git URL**: {git_url}\n"));
    }
    if let Some(flag) = http_auth_enabled {
        result.push_str(&format!(
            "\u{2022} **HTTP Auth**: {}\n",
            if flag { "Enabled" } else { "Disabled" }
        ));
    }
    if let Some(team_id) = &team_id {
        result.push_str(&format!("\u{2022} **Team ID**: Moved to {team_id}\n"));
    }
    if let Some(is_free) = is_free {
        result.push_str(&format!(
            "\u{2022} **Plan**: {}\n",
            if is_free { "Free" } else { "Paid" }
        ));
    }

    Ok(result)
}

pub async fn delete_site(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    ctx.guard
        .run("sitebay_delete_site", None, || ctx.client.delete_site(fqdn))
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**Site Deleted Successfully**\n\nThe site {fqdn} has been permanently deleted."
    ))
}
