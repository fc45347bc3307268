//! Policy commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs, handlers};
use crate::client::models::{CreatePolicyRequest, PolicySummary};
use crate::client::{RegistryApi, drain_pages};
use crate::error::Result;
use crate::models::PolicyDisplay;
use crate::output;

/// Run the policy list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    handlers::run_list_command::<PolicySummary, PolicyDisplay, _, _>(
        opts,
        pagination,
        "policies",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move { client.list_policies(Some(&params)).await }
            })
            .await
        },
    )
    .await
}

/// Run the policy get command
pub async fn get(opts: &GlobalOptions, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let policy = ctx.client.get_policy(name).await?;
    output::print_detail(&policy, ctx.format)
}

/// Run the policy create command
pub async fn create(opts: &GlobalOptions, name: &str, file: &str) -> Result<()> {
    let document = std::fs::read_to_string(file)?;
    // Catch malformed documents before they hit the API
    serde_json::from_str::<serde_json::Value>(&document)?;

    let request = CreatePolicyRequest::new(name, document.trim());

    let ctx = CommandContext::new(opts).await?;
    let policy = ctx.client.create_policy(&request).await?;

    println!(
        "{} Created policy {} (default version {})",
        "✓".green(),
        policy.policy_name.bold(),
        policy.default_version_id.as_deref().unwrap_or("1")
    );
    Ok(())
}

/// Run the policy delete command
pub async fn delete(opts: &GlobalOptions, name: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete policy '{}'?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.delete_policy(name).await?;

    println!("{} Deleted policy {}", "✓".green(), name.bold());
    Ok(())
}
