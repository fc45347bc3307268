//! Audit display models

use serde::Serialize;
use tabled::Tabled;

use super::common::display_opt;
use crate::client::models::{AuditFinding, AuditSuppression, AuditTaskSummary, ResourceIdentifier};
use crate::output::formatters::format_datetime;

/// Audit task display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AuditTaskDisplay {
    /// Task ID
    #[tabled(rename = "TASK ID")]
    pub id: String,

    /// Task status
    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Task type
    #[tabled(rename = "TYPE")]
    pub task_type: String,
}

impl From<AuditTaskSummary> for AuditTaskDisplay {
    fn from(task: AuditTaskSummary) -> Self {
        Self {
            id: task.task_id,
            status: task
                .task_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            task_type: task
                .task_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Audit finding display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FindingDisplay {
    /// Finding ID
    #[tabled(rename = "FINDING ID")]
    pub id: String,

    /// Check that produced the finding
    #[tabled(rename = "CHECK")]
    pub check: String,

    /// Severity
    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    /// When the finding was discovered
    #[tabled(rename = "FOUND")]
    pub found: String,

    /// Whether a suppression hides the finding
    #[tabled(rename = "SUPPRESSED")]
    pub suppressed: String,
}

impl From<AuditFinding> for FindingDisplay {
    fn from(finding: AuditFinding) -> Self {
        Self {
            id: display_opt(&finding.finding_id),
            check: display_opt(&finding.check_name),
            severity: finding
                .severity
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            found: format_datetime(finding.finding_time),
            suppressed: match finding.is_suppressed {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        }
    }
}

/// Render whichever identifying field a resource identifier carries
fn display_resource(resource: &Option<ResourceIdentifier>) -> String {
    let Some(resource) = resource else {
        return "-".to_string();
    };

    if let Some(ref id) = resource.device_certificate_id {
        format!("cert:{}", id)
    } else if let Some(ref id) = resource.ca_certificate_id {
        format!("ca:{}", id)
    } else if let Some(ref id) = resource.client_id {
        format!("client:{}", id)
    } else if let Some(ref policy) = resource.policy_version_identifier {
        format!(
            "policy:{}@{}",
            policy.policy_name.as_deref().unwrap_or("-"),
            policy.policy_version_id.as_deref().unwrap_or("-")
        )
    } else if let Some(ref account) = resource.account {
        format!("account:{}", account)
    } else {
        "-".to_string()
    }
}

/// Audit suppression display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SuppressionDisplay {
    /// Suppressed check
    #[tabled(rename = "CHECK")]
    pub check: String,

    /// Suppressed resource
    #[tabled(rename = "RESOURCE")]
    pub resource: String,

    /// Expiration date
    #[tabled(rename = "EXPIRES")]
    pub expires: String,
}

impl From<AuditSuppression> for SuppressionDisplay {
    fn from(suppression: AuditSuppression) -> Self {
        let expires = if suppression.suppress_indefinitely == Some(true) {
            "never".to_string()
        } else {
            format_datetime(suppression.expiration_date)
        };

        Self {
            check: suppression.check_name,
            resource: display_resource(&suppression.resource_identifier),
            expires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::AuditFindingBuilder;
    use crate::client::models::AuditFindingSeverity;

    #[test]
    fn test_finding_display() {
        let display = FindingDisplay::from(
            AuditFindingBuilder::new("f-1")
                .severity(AuditFindingSeverity::Critical)
                .build(),
        );

        assert_eq!(display.id, "f-1");
        assert_eq!(display.severity, "CRITICAL");
        assert_eq!(display.suppressed, "-");
    }

    #[test]
    fn test_suppression_display_indefinite() {
        let display = SuppressionDisplay::from(AuditSuppression {
            check_name: "DEVICE_CERTIFICATE_EXPIRING_CHECK".to_string(),
            resource_identifier: Some(ResourceIdentifier::device_certificate("ab12")),
            suppress_indefinitely: Some(true),
            ..AuditSuppression::default()
        });

        assert_eq!(display.resource, "cert:ab12");
        assert_eq!(display.expires, "never");
    }

    #[test]
    fn test_display_resource_policy_version() {
        let resource = Some(ResourceIdentifier::policy_version("allow-telemetry", "2"));
        assert_eq!(display_resource(&resource), "policy:allow-telemetry@2");
    }
}
