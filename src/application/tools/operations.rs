//! Site operation tools: shell commands, file edits, events, external paths.

use super::{ToolContext, ToolOutput, optional_bool, optional_str, optional_u64, render_failure,
            required_str, show, show_id};
use crate::infrastructure::api::validation::display_value;
use chrono::DateTime;
use serde_json::{Value, json};

const DEFAULT_EVENT_LIMIT: usize = 20;

pub async fn shell_command(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let command = required_str(args, "command")?;
    let cwd = optional_str(args, "cwd");
    let auto_track_dir = optional_bool(args, "auto_track_dir");

    let result = ctx
        .guard
        .run("sitebay_site_shell_command", None, || {
            ctx.client
                .execute_shell_command(fqdn, command, cwd.as_deref(), auto_track_dir)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    let output = match &result {
        Value::Object(map) => map
            .get("output")
            .or_else(|| map.get("result"))
            .map(display_value)
            .unwrap_or_else(|| result.to_string()),
        other => display_value(other),
    };

    Ok(format!(
        "**Command executed on {fqdn}:**\n```bash\n{command}\n```\n\n**Output:**\n```\n{output}\n```"
    ))
}

pub async fn edit_file(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let file_path = required_str(args, "file_path")?;
    let content = required_str(args, "content")?;

    let result = ctx
        .guard
        .run("sitebay_site_edit_file", None, || {
            ctx.client.edit_file(fqdn, file_path, content)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    let mut response = String::from("**File Updated Successfully**\n\n");
    response.push_str(&format!("\u{2022} **Site**: {fqdn}\n"));
    response.push_str(&format!("\u{2022} **File**: wp-content/{file_path}\n"));
    response.push_str(&format!(
        "\u{2022} **Content Length**: {} characters\n",
        content.chars().count()
    ));

    if let Value::String(server_response) = &result {
        if !server_response.is_empty() {
            response.push_str(&format!("\n**Server Response:**\n```\n{server_response}\n```"));
        }
    }

    Ok(response)
}

pub async fn site_events(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let after_datetime = optional_str(args, "after_datetime");
    let limit = optional_u64(args, "limit").unwrap_or(DEFAULT_EVENT_LIMIT as u64) as usize;

    if let Some(after) = &after_datetime {
        if DateTime::parse_from_rfc3339(after).is_err() {
            return Err(
                "Validation Error: 'after_datetime' must be an RFC 3339 timestamp".to_string(),
            );
        }
    }

    let events = ctx
        .guard
        .run("sitebay_site_events", Some(Vec::new), || {
            ctx.client.site_events(fqdn, after_datetime.as_deref())
        })
        .await
        .map_err(|error| render_failure(&error))?;

    if events.is_empty() {
        return Ok(format!("No events found for {fqdn}."));
    }

    let events = &events[..events.len().min(limit)];
    let mut result = format!(
        "**Recent Events for {fqdn}** (showing {} events):\n\n",
        events.len()
    );
    for event in events {
        result.push_str(&format!(
            "\u{2022} **{}**\n",
            event.event_type.as_deref().unwrap_or("Unknown Event")
        ));
        result.push_str(&format!("  - Time: {}\n", show(&event.created_at)));
        result.push_str(&format!("  - Status: {}\n", show(&event.status)));
        if let Some(description) = &event.description {
            result.push_str(&format!("  - Description: {description}\n"));
        }
        if let Some(metadata) = &event.metadata {
            for (key, value) in metadata {
                result.push_str(&format!("  - {key}: {}\n", display_value(value)));
            }
        }
        result.push('\n');
    }

    Ok(result)
}

pub async fn external_path_list(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    let paths = ctx
        .guard
        .run("sitebay_external_path_list", Some(Vec::new), || {
            ctx.client.list_external_paths(fqdn)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    if paths.is_empty() {
        return Ok(format!("No external paths configured for {fqdn}."));
    }

    let mut result = format!("**External Paths for {fqdn}**:\n\n");
    for path in &paths {
        result.push_str(&format!("\u{2022} **Path**: {}\n", show(&path.path)));
        result.push_str(&format!("  - Target URL: {}\n", show(&path.target_url)));
        result.push_str(&format!("  - Status: {}\n", show(&path.status)));
        result.push_str(&format!("  - Created: {}\n", show(&path.created_at)));
        result.push_str(&format!("  - ID: {}\n\n", show_id(&path.id)));
    }

    Ok(result)
}

pub async fn external_path_create(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let path = required_str(args, "path")?;
    let target_url = required_str(args, "target_url")?;
    let description = optional_str(args, "description");

    let mut path_data = json!({ "path": path, "target_url": target_url });
    if let Some(description) = &description {
        path_data["description"] = Value::String(description.clone());
    }

    let created = ctx
        .guard
        .run("sitebay_external_path_create", None, || {
            ctx.client.create_external_path(fqdn, &path_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    let mut result = String::from("**External Path Created Successfully**\n\n");
    result.push_str(&format!("\u{2022} **Site**: {fqdn}\n"));
    result.push_str(&format!("\u{2022} **Path**: {}\n", show(&created.path)));
    result.push_str(&format!("\u{2022} **Target URL**: {}\n", show(&created.target_url)));
    result.push_str(&format!("\u{2022} **Status**: {}\n", show(&created.status)));
    result.push_str(&format!("\u{2022} **ID**: {}\n", show_id(&created.id)));
    if let Some(description) = &description {
        result.push_str(&format!("\u{2022} **Description**: {description}\n"));
    }
    result.push_str(&format!(
        "\nYour site path {fqdn}{path} now proxies to {target_url}"
    ));

    Ok(result)
}

pub async fn external_path_update(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let path_id = required_str(args, "path_id")?;
    let path = optional_str(args, "path");
    let target_url = optional_str(args, "target_url");
    let description = optional_str(args, "description");

    let mut path_data = json!({});
    if let Some(path) = &path {
        path_data["path"] = Value::String(path.clone());
    }
    if let Some(target_url) = &target_url {
        path_data["target_url"] = Value::String(target_url.clone());
    }
    if let Some(description) = &description {
        path_data["description"] = Value::String(description.clone());
    }

    if path_data.as_object().is_some_and(|map| map.is_empty()) {
        return Ok("No updates specified. Please provide at least one field to update.".to_string());
    }

    let updated = ctx
        .guard
        .run("sitebay_external_path_update", None, || {
            ctx.client.update_external_path(fqdn, path_id, &path_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    let mut result = String::from("**External Path Updated Successfully**\n\n");
    result.push_str(&format!("\u{2022} **Site**: {fqdn}\n"));
    result.push_str(&format!("\u{2022} **Path**: {}\n", show(&updated.path)));
    result.push_str(&format!("\u{2022} **Target URL**: {}\n", show(&updated.target_url)));
    result.push_str(&format!("\u{2022} **Status**: {}\n", show(&updated.status)));
    result.push_str(&format!("\u{2022} **ID**: {}\n", show_id(&updated.id)));

    Ok(result)
}

pub async fn external_path_delete(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let path_id = required_str(args, "path_id")?;

    ctx.guard
        .run("sitebay_external_path_delete", None, || {
            ctx.client.delete_external_path(fqdn, path_id)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**External Path Deleted Successfully**\n\nExternal path {path_id} has been removed from {fqdn}."
    ))
}
