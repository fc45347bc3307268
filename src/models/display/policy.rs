//! Policy display model

use serde::Serialize;
use tabled::Tabled;

use super::common::display_opt;
use crate::client::models::PolicySummary;

/// Policy display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PolicyDisplay {
    /// Policy name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Policy ARN
    #[tabled(rename = "ARN")]
    pub arn: String,
}

impl From<PolicySummary> for PolicyDisplay {
    fn from(policy: PolicySummary) -> Self {
        Self {
            name: policy.policy_name,
            arn: display_opt(&policy.policy_arn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_display() {
        let display = PolicyDisplay::from(PolicySummary {
            policy_name: "allow-telemetry".to_string(),
            policy_arn: Some("arn:sentra:policy/allow-telemetry".to_string()),
        });

        assert_eq!(display.name, "allow-telemetry");
        assert!(display.arn.contains("allow-telemetry"));
    }
}
