//! Account-level tools: teams, catalogue listings, affiliates, billing.

use super::{ToolContext, ToolOutput, optional_str, render_failure, show, show_bool, show_id};
use serde_json::{Value, json};

pub async fn list_teams(ctx: &ToolContext, _args: &Value) -> ToolOutput {
    let teams = ctx
        .guard
        .run("sitebay_list_teams", None, || ctx.client.list_teams())
        .await
        .map_err(|error| render_failure(&error))?;

    if teams.is_empty() {
        return Ok("No teams found for your account.".to_string());
    }

    let mut result = format!("**Your Teams** ({} teams):\n\n", teams.len());
    for team in &teams {
        result.push_str(&format!("\u{2022} **{}**\n", show(&team.name)));
        result.push_str(&format!("  - ID: {}\n", show_id(&team.id)));
        result.push_str(&format!("  - Plan: {}\n", show(&team.plan_type_name)));
        result.push_str(&format!("  - Active: {}\n", show_bool(&team.is_active)));
        result.push_str(&format!("  - Default: {}\n", show_bool(&team.is_default)));
        result.push_str(&format!("  - Created: {}\n\n", show(&team.created_at)));
    }

    Ok(result)
}

pub async fn list_templates(ctx: &ToolContext, _args: &Value) -> ToolOutput {
    let templates = ctx
        .guard
        .run("sitebay_list_templates", None, || ctx.client.list_templates())
        .await
        .map_err(|error| render_failure(&error))?;

    if templates.is_empty() {
        return Ok("No ready-made templates available.".to_string());
    }

    let mut result = format!("**Available Ready-made Templates** ({}):\n\n", templates.len());
    for template in &templates {
        result.push_str(&format!("\u{2022} **{}**\n", show(&template.name)));
        result.push_str(&format!("  - ID: {}\n", show_id(&template.id)));
        if let Some(description) = &template.description {
            result.push_str(&format!("  - Description: {description}\n"));
        }
        if let Some(category) = &template.category {
            result.push_str(&format!("  - Category: {category}\n"));
        }
        result.push('\n');
    }

    Ok(result)
}

pub async fn list_regions(ctx: &ToolContext, _args: &Value) -> ToolOutput {
    let regions = ctx
        .guard
        .run("sitebay_list_regions", None, || ctx.client.list_regions())
        .await
        .map_err(|error| render_failure(&error))?;

    if regions.is_empty() {
        return Ok("No regions available.".to_string());
    }

    let mut result = format!("**Available Regions** ({}):\n\n", regions.len());
    for region in &regions {
        result.push_str(&format!(
            "\u{2022} **{}** (ID: {})\n",
            show(&region.name),
            show_id(&region.id)
        ));
    }

    Ok(result)
}

pub async fn affiliates(ctx: &ToolContext, _args: &Value) -> ToolOutput {
    let referrals = ctx
        .guard
        .run("sitebay_account_affiliates", Some(Vec::new), || {
            ctx.client.affiliate_referrals()
        })
        .await
        .map_err(|error| render_failure(&error))?;

    if referrals.is_empty() {
        return Ok("No affiliate referrals found.".to_string());
    }

    let mut result = format!("**Your Affiliate Referrals** ({} referrals):\n\n", referrals.len());
    for referral in &referrals {
        result.push_str(&format!("\u{2022} **Email**: {}\n", show(&referral.email)));
        result.push_str(&format!("  - Name: {}\n", show(&referral.full_name)));
        result.push_str(&format!("  - Signed up: {}\n", show(&referral.created_at)));
        result.push_str(&format!("  - Active: {}\n\n", show_bool(&referral.is_active)));
    }

    Ok(result)
}

pub async fn create_checkout(ctx: &ToolContext, args: &Value) -> ToolOutput {
    let plan_name = optional_str(args, "plan_name").unwrap_or_else(|| "starter".to_string());
    let interval = optional_str(args, "interval").unwrap_or_else(|| "month".to_string());
    let team_id = optional_str(args, "team_id");

    if !matches!(interval.as_str(), "month" | "year") {
        return Err("Validation Error: 'interval' must be 'month' or 'year'".to_string());
    }

    let mut checkout_data = json!({ "plan_name": plan_name, "interval": interval });
    if let Some(team_id) = &team_id {
        checkout_data["for_team_id"] = Value::String(team_id.clone());
    }

    let session = ctx
        .guard
        .run("sitebay_account_create_checkout", None, || {
            ctx.client.create_checkout_session(&checkout_data)
        })
        .await
        .map_err(|error| render_failure(&error))?;

    Ok(format!(
        "**Checkout Session Created**\n\nPlan: {plan_name} ({interval}ly)\nCheckout URL: {}",
        session.url.as_deref().unwrap_or("URL not provided")
    ))
}
