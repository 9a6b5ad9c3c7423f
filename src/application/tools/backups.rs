//! Backup and point-in-time restore tools.

use super::{ToolContext, ToolOutput, optional_bool, optional_str, optional_u64, render_failure,
            required_str, show, show_id};
use chrono::DateTime;
use serde_json::{Value, json};

const DEFAULT_COMMITS_TO_FETCH: u32 = 1;

pub async fn list_commits(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let number_to_fetch = optional_u64(args, "number_to_fetch")
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(DEFAULT_COMMITS_TO_FETCH);

    let commits = ctx
        .guard
        .run("sitebay_backup_list_commits", Some(Vec::new), || {
            ctx.client.backup_commits(fqdn, number_to_fetch)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    if commits.is_empty() {
        return Ok(format!("No backup commits found for {fqdn}."));
    }

    let mut result = format!(
        "**Available Backup Commits for {fqdn}** ({} entries):\n\n",
        commits.len()
    );
    for commit in &commits {
        result.push_str(&format!(
            "\u{2022} **{}**\n",
            commit.created_at.as_deref().unwrap_or("Unknown time")
        ));
        result.push_str(&format!("  - ID: {}\n", show_id(&commit.id)));
        result.push_str(&format!("  - Commit Hash: {}\n", show(&commit.commit_hash)));
        result.push_str(&format!(
            "  - Tables Saved: {} tables\n",
            commit.tables_saved.as_ref().map(Vec::len).unwrap_or(0)
        ));
        result.push_str(&format!(
            "  - Status: {}\n\n",
            if commit.finished_at.is_some() {
                "Completed"
            } else {
                "In Progress"
            }
        ));
    }

    Ok(result)
}

pub async fn restore(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;
    let restore_point = optional_str(args, "restore_point");

    if let Some(point) = &restore_point {
        if DateTime::parse_from_rfc3339(point).is_err() {
            return Err(
                "Validation Error: 'restore_point' must be an RFC 3339 timestamp".to_string(),
            );
        }
    }

    let mut restore_data = json!({});
    if let Some(point) = &restore_point {
        restore_data["restore_point"] = Value::String(point.clone());
    }
    for flag in [
        "for_stage_site",
        "restore_db",
        "restore_wp_content",
        "delete_extra_files",
        "is_dry_run",
    ] {
        if let Some(value) = optional_bool(args, flag) {
            restore_data[flag] = Value::Bool(value);
        }
    }
    if let Some(hash) = optional_str(args, "dolt_restore_hash") {
        restore_data["dolt_restore_hash"] = Value::String(hash);
    }

    ctx.guard
        .run("sitebay_backup_restore", None, || {
            ctx.client.create_restore(fqdn, &restore_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**Point-in-Time Restore Initiated**\n\nRestore operation for {fqdn} has been started."
    ))
}

pub async fn list_restores(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    let restores = ctx
        .guard
        .run("sitebay_list_restores", Some(Vec::new), || {
            ctx.client.list_restores(fqdn)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    if restores.is_empty() {
        return Ok(format!("No restores found for {fqdn}."));
    }

    let mut result = format!("**Restores for {fqdn}** ({} entries):\n\n", restores.len());
    for entry in &restores {
        result.push_str(&format!("\u{2022} **ID**: {}\n", show_id(&entry.id)));
        result.push_str(&format!(
            "  - Restore Point: {}\n",
            show(&entry.restore_point)
        ));
        result.push_str(&format!("  - Status: {}\n", show(&entry.status)));
        result.push_str(&format!("  - Created: {}\n", show(&entry.created_at)));
        result.push_str(&format!(
            "  - Finished: {}\n\n",
            entry.finished_at.as_deref().unwrap_or("In Progress")
        ));
    }

    Ok(result)
}
