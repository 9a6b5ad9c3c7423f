//! Staging site tools: create, delete, promote.

use super::{ToolContext, ToolOutput, null_value, render_failure, required_str};
use serde_json::Value;

pub async fn create_staging(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    ctx.guard
        .run("sitebay_create_staging", None, || {
            ctx.client.create_staging(fqdn)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**Staging Site Created**\n\nA staging copy of {fqdn} is being prepared. \
         Test your changes there, then commit staging to promote them to the live site."
    ))
}

pub async fn delete_staging(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    let outcome = ctx
        .guard
        .run("sitebay_delete_staging", Some(null_value), || {
            ctx.client.delete_staging(fqdn)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    // Null only comes from the soft-404 fallback: no staging site exists yet.
    if outcome.is_null() {
        return Ok(format!("No staging site exists for {fqdn}; nothing to delete."));
    }

    Ok(format!(
        "**Staging Site Deleted**\n\nThe staging copy of {fqdn} has been removed."
    ))
}

pub async fn commit_staging(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let fqdn = required_str(args, "fqdn")?;

    ctx.guard
        .run("sitebay_commit_staging", None, || {
            ctx.client.commit_staging(fqdn)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**Staging Committed**\n\nChanges from staging have been promoted to the live site {fqdn}."
    ))
}
