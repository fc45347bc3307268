//! Access policy models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire_time;

/// Policy summary row returned by the policy listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    /// Policy name
    #[serde(default)]
    pub policy_name: String,

    /// Policy ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_arn: Option<String>,
}

/// Full policy description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Policy name
    #[serde(default)]
    pub policy_name: String,

    /// Policy ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_arn: Option<String>,

    /// JSON policy document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_document: Option<String>,

    /// Version served when no version is named explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version_id: Option<String>,

    /// When the policy was created
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Request body for creating a policy.
///
/// The document is a JSON string of at most 2048 characters excluding
/// whitespace; the service validates its grammar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    /// Policy name
    pub policy_name: String,

    /// JSON policy document
    pub policy_document: String,
}

impl CreatePolicyRequest {
    /// Create a request with the given name and document.
    pub fn new(policy_name: impl Into<String>, policy_document: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
            policy_document: policy_document.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_round_trip() {
        let policy: Policy = serde_json::from_str(
            r#"{
                "policyName": "allow-telemetry",
                "policyDocument": "{\"Statement\":[]}",
                "defaultVersionId": "2"
            }"#,
        )
        .unwrap();

        assert_eq!(policy.policy_name, "allow-telemetry");
        assert_eq!(policy.default_version_id.as_deref(), Some("2"));
        assert!(policy.policy_arn.is_none());
        assert!(policy.creation_date.is_none());
    }

    #[test]
    fn test_policy_equality_is_field_sensitive() {
        let a = PolicySummary {
            policy_name: "allow-telemetry".to_string(),
            policy_arn: None,
        };
        let mut b = a.clone();
        assert_eq!(a, b);

        b.policy_arn = Some("arn:sentra:policy/allow-telemetry".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn test_create_policy_serializes_both_fields() {
        let request = CreatePolicyRequest::new("allow-telemetry", "{}");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("policyName"));
        assert!(json.contains("policyDocument"));
    }
}
