//! Mitigation action commands

use colored::Colorize;

use crate::cli::args::{GlobalOptions, MitigationFilterArgs};
use crate::cli::{CommandContext, PaginationArgs, handlers};
use crate::client::models::{CreateMitigationActionRequest, MitigationActionSummary};
use crate::client::{DetectApi, drain_pages};
use crate::error::{Error, Result};
use crate::models::MitigationActionDisplay;
use crate::output;

/// Run the mitigation list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &MitigationFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params();

    handlers::run_list_command::<MitigationActionSummary, MitigationActionDisplay, _, _>(
        opts,
        pagination,
        "mitigation actions",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let filters = api_filters.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move {
                    client
                        .list_mitigation_actions(Some(&params), Some(&filters))
                        .await
                }
            })
            .await
        },
    )
    .await
}

/// Run the mitigation get command
pub async fn get(opts: &GlobalOptions, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let action = ctx.client.describe_mitigation_action(name).await?;
    output::print_detail(&action, ctx.format)
}

/// Run the mitigation create command
pub async fn create(opts: &GlobalOptions, file: &str) -> Result<()> {
    let definition = std::fs::read_to_string(file)?;
    let request: CreateMitigationActionRequest = serde_json::from_str(&definition)?;

    // Exactly one parameter block decides what the action does
    let action_type = request
        .action_params
        .as_ref()
        .and_then(|params| params.action_type())
        .ok_or_else(|| {
            Error::Other("Action definition must populate one actionParams block".to_string())
        })?;

    let ctx = CommandContext::new(opts).await?;
    let created = ctx.client.create_mitigation_action(&request).await?;

    println!(
        "{} Created {} action {} ({})",
        "✓".green(),
        action_type,
        request.action_name.bold(),
        created.action_id.as_deref().unwrap_or("-")
    );
    Ok(())
}

/// Run the mitigation delete command
pub async fn delete(opts: &GlobalOptions, name: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete mitigation action '{}'?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.delete_mitigation_action(name).await?;

    println!("{} Deleted mitigation action {}", "✓".green(), name.bold());
    Ok(())
}
