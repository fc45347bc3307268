//! Audit commands

use clap::Args;
use colored::Colorize;

use crate::cli::args::{
    AuditTaskFilterArgs, FindingFilterArgs, GlobalOptions, SuppressionFilterArgs, parse_time_arg,
};
use crate::cli::{CommandContext, PaginationArgs, handlers};
use crate::client::models::{
    AuditFinding, AuditSuppression, AuditTaskSummary, CreateAuditSuppressionRequest,
    ResourceIdentifier, StartAuditTaskRequest,
};
use crate::client::{AuditApi, drain_pages};
use crate::error::{Error, Result};
use crate::models::{AuditTaskDisplay, FindingDisplay, SuppressionDisplay};
use crate::output;

/// Resource identifier arguments shared by suppress/unsuppress.
///
/// Exactly one of these must be given.
#[derive(Args, Debug, Default, Clone)]
pub struct ResourceArgs {
    /// Device certificate ID
    #[arg(long = "cert-id")]
    pub cert_id: Option<String>,

    /// CA certificate ID
    #[arg(long = "ca-cert-id")]
    pub ca_cert_id: Option<String>,

    /// MQTT client ID
    #[arg(long = "client-id")]
    pub client_id: Option<String>,

    /// Policy version, as name@version
    #[arg(long = "policy-version", value_name = "NAME@VERSION")]
    pub policy_version: Option<String>,

    /// Account, for account-level checks
    #[arg(long)]
    pub account: Option<String>,
}

impl ResourceArgs {
    /// Convert to a wire resource identifier.
    pub fn to_identifier(&self) -> Result<ResourceIdentifier> {
        let given = [
            self.cert_id.is_some(),
            self.ca_cert_id.is_some(),
            self.client_id.is_some(),
            self.policy_version.is_some(),
            self.account.is_some(),
        ]
        .iter()
        .filter(|&&set| set)
        .count();

        if given != 1 {
            return Err(Error::Other(
                "Specify exactly one of --cert-id, --ca-cert-id, --client-id, \
                 --policy-version, --account"
                    .to_string(),
            ));
        }

        if let Some(ref id) = self.cert_id {
            Ok(ResourceIdentifier::device_certificate(id))
        } else if let Some(ref id) = self.ca_cert_id {
            Ok(ResourceIdentifier::ca_certificate(id))
        } else if let Some(ref id) = self.client_id {
            Ok(ResourceIdentifier::client(id))
        } else if let Some(ref policy_version) = self.policy_version {
            let (name, version) = policy_version.split_once('@').ok_or_else(|| {
                Error::Other(format!(
                    "Invalid policy version '{}': use name@version",
                    policy_version
                ))
            })?;
            Ok(ResourceIdentifier::policy_version(name, version))
        } else {
            Ok(ResourceIdentifier {
                account: self.account.clone(),
                ..ResourceIdentifier::default()
            })
        }
    }
}

/// Run the audit start command
pub async fn start(opts: &GlobalOptions, checks: &[String]) -> Result<()> {
    let request = StartAuditTaskRequest::new().checks(checks.to_vec());

    let ctx = CommandContext::new(opts).await?;
    let started = ctx.client.start_audit_task(&request).await?;

    println!(
        "{} Started audit task {} over {} check(s)",
        "✓".green(),
        started.task_id.bold(),
        checks.len()
    );
    Ok(())
}

/// Run the audit tasks command
pub async fn tasks(
    opts: &GlobalOptions,
    filters: &AuditTaskFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params()?;

    handlers::run_list_command::<AuditTaskSummary, AuditTaskDisplay, _, _>(
        opts,
        pagination,
        "audit tasks",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let filters = api_filters.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move { client.list_audit_tasks(Some(&params), Some(&filters)).await }
            })
            .await
        },
    )
    .await
}

/// Run the audit task command
pub async fn task(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let description = ctx.client.describe_audit_task(id).await?;
    output::print_detail(&description, ctx.format)
}

/// Run the audit cancel command
pub async fn cancel(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    ctx.client.cancel_audit_task(id).await?;

    println!("{} Canceled audit task {}", "✓".green(), id.bold());
    Ok(())
}

/// Run the audit findings command
pub async fn findings(
    opts: &GlobalOptions,
    filters: &FindingFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params()?;

    handlers::run_list_command::<AuditFinding, FindingDisplay, _, _>(
        opts,
        pagination,
        "audit findings",
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
                        .list_audit_findings(Some(&params), Some(&filters))
                        .await
                }
            })
            .await
        },
    )
    .await
}

/// Run the audit suppressions command
pub async fn suppressions(
    opts: &GlobalOptions,
    filters: &SuppressionFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params();

    handlers::run_list_command::<AuditSuppression, SuppressionDisplay, _, _>(
        opts,
        pagination,
        "audit suppressions",
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
                        .list_audit_suppressions(Some(&params), Some(&filters))
                        .await
                }
            })
            .await
        },
    )
    .await
}

/// Run the audit suppress command
pub async fn suppress(
    opts: &GlobalOptions,
    check: &str,
    resource: &ResourceArgs,
    expires: Option<&str>,
    indefinitely: bool,
    description: Option<&str>,
) -> Result<()> {
    let identifier = resource.to_identifier()?;

    let mut request = CreateAuditSuppressionRequest::new(check, identifier);
    if let Some(expires) = expires {
        request = request.expiration_date(parse_time_arg(expires)?);
    }
    if indefinitely {
        request = request.suppress_indefinitely(true);
    }
    if let Some(description) = description {
        request = request.description(description);
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.create_audit_suppression(&request).await?;

    println!("{} Suppressed {} findings", "✓".green(), check.bold());
    Ok(())
}

/// Run the audit unsuppress command
pub async fn unsuppress(opts: &GlobalOptions, check: &str, resource: &ResourceArgs) -> Result<()> {
    let identifier = resource.to_identifier()?;

    let ctx = CommandContext::new(opts).await?;
    ctx.client
        .delete_audit_suppression(check, &identifier)
        .await?;

    println!("{} Removed suppression for {}", "✓".green(), check.bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_args_require_exactly_one() {
        let none = ResourceArgs::default();
        assert!(none.to_identifier().is_err());

        let two = ResourceArgs {
            cert_id: Some("ab12".to_string()),
            account: Some("123456".to_string()),
            ..ResourceArgs::default()
        };
        assert!(two.to_identifier().is_err());
    }

    #[test]
    fn test_resource_args_cert_id() {
        let args = ResourceArgs {
            cert_id: Some("ab12".to_string()),
            ..ResourceArgs::default()
        };
        let identifier = args.to_identifier().unwrap();
        assert_eq!(identifier.device_certificate_id.as_deref(), Some("ab12"));
    }

    #[test]
    fn test_resource_args_policy_version() {
        let args = ResourceArgs {
            policy_version: Some("allow-telemetry@2".to_string()),
            ..ResourceArgs::default()
        };
        let identifier = args.to_identifier().unwrap();
        let policy = identifier.policy_version_identifier.unwrap();
        assert_eq!(policy.policy_name.as_deref(), Some("allow-telemetry"));
        assert_eq!(policy.policy_version_id.as_deref(), Some("2"));

        let bad = ResourceArgs {
            policy_version: Some("allow-telemetry".to_string()),
            ..ResourceArgs::default()
        };
        assert!(bad.to_identifier().is_err());
    }
}
