//! Security profile commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs, handlers};
use crate::client::models::{
    CreateSecurityProfileRequest, SecurityProfileSummary, UpdateSecurityProfileRequest,
};
use crate::client::{DetectApi, drain_pages};
use crate::error::Result;
use crate::models::SecurityProfileDisplay;
use crate::output;

/// Run the profile list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    handlers::run_list_command::<SecurityProfileSummary, SecurityProfileDisplay, _, _>(
        opts,
        pagination,
        "security profiles",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move { client.list_security_profiles(Some(&params)).await }
            })
            .await
        },
    )
    .await
}

/// Run the profile get command
pub async fn get(opts: &GlobalOptions, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let profile = ctx.client.describe_security_profile(name).await?;
    output::print_detail(&profile, ctx.format)
}

/// Run the profile create command
pub async fn create(opts: &GlobalOptions, file: &str) -> Result<()> {
    let definition = std::fs::read_to_string(file)?;
    let request: CreateSecurityProfileRequest = serde_json::from_str(&definition)?;

    let ctx = CommandContext::new(opts).await?;
    let profile = ctx.client.create_security_profile(&request).await?;

    println!(
        "{} Created security profile {} with {} behavior(s)",
        "✓".green(),
        profile.security_profile_name.bold(),
        profile.behaviors.len()
    );
    Ok(())
}

/// Run the profile update command
pub async fn update(opts: &GlobalOptions, name: &str, file: &str) -> Result<()> {
    let definition = std::fs::read_to_string(file)?;
    let request: UpdateSecurityProfileRequest = serde_json::from_str(&definition)?;

    let ctx = CommandContext::new(opts).await?;
    let profile = ctx.client.update_security_profile(name, &request).await?;

    println!(
        "{} Updated security profile {} (version {})",
        "✓".green(),
        profile.security_profile_name.bold(),
        profile.version.unwrap_or(0)
    );
    Ok(())
}

/// Run the profile delete command
pub async fn delete(opts: &GlobalOptions, name: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete security profile '{}'?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.delete_security_profile(name).await?;

    println!("{} Deleted security profile {}", "✓".green(), name.bold());
    Ok(())
}
