//! Certificate commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs, handlers};
use crate::client::models::{CertificateStatus, CertificateSummary};
use crate::client::{RegistryApi, drain_pages};
use crate::error::Result;
use crate::models::{CertificateDisplay, ProviderDisplay};
use crate::output;

/// Run the cert list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    handlers::run_list_command::<CertificateSummary, CertificateDisplay, _, _>(
        opts,
        pagination,
        "certificates",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move { client.list_certificates(Some(&params)).await }
            })
            .await
        },
    )
    .await
}

/// Run the cert get command
pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let description = ctx.client.describe_certificate(id).await?;
    output::print_detail(&description, ctx.format)
}

/// Run the cert activate/deactivate/revoke commands
pub async fn set_status(opts: &GlobalOptions, id: &str, status: CertificateStatus) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    ctx.client
        .update_certificate_status(id, status.clone())
        .await?;

    println!("{} Certificate {} is now {}", "✓".green(), id.bold(), status);
    Ok(())
}

/// Run the cert revoke command, confirming first
pub async fn revoke(opts: &GlobalOptions, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Revoke certificate '{}'? This cannot be undone", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    set_status(opts, id, CertificateStatus::Revoked).await
}

/// Run the cert providers command
pub async fn providers(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let providers = ctx.client.list_certificate_providers().await?;

    let display: Vec<ProviderDisplay> = providers.into_iter().map(Into::into).collect();
    output::print(&display, ctx.format)
}

/// Run the cert provider command
pub async fn provider(opts: &GlobalOptions, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let provider = ctx.client.describe_certificate_provider(name).await?;
    output::print_detail(&provider, ctx.format)
}
