//! Security profile and behavior models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ModelError, Tag, string_enum, wire_time};

string_enum! {
    /// How a behavior compares a metric against its threshold value
    ComparisonOperator {
        LessThan => "less-than",
        LessThanEquals => "less-than-equals",
        GreaterThan => "greater-than",
        GreaterThanEquals => "greater-than-equals",
        InCidrSet => "in-cidr-set",
        NotInCidrSet => "not-in-cidr-set",
        InPortSet => "in-port-set",
        NotInPortSet => "not-in-port-set",
    }
}

string_enum! {
    /// Delivery channel for behavior alarms
    AlertTargetType {
        Webhook => "WEBHOOK",
        Email => "EMAIL",
    }
}

/// A metric value: a count, a CIDR set, or a port set depending on the metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValue {
    /// Numeric value for count metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// CIDR ranges for IP metrics
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cidrs: Vec<String>,

    /// Port numbers for port metrics
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<i32>,
}

impl MetricValue {
    /// A plain count value.
    pub fn count(count: i64) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }
}

/// A percentile-based threshold computed from fleet history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalThreshold {
    /// Percentile statistic, e.g. `p50`, `p90`, `p99`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<String>,
}

/// Criteria by which a behavior decides whether a device is misbehaving
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorCriteria {
    /// How the metric is compared to the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_operator: Option<ComparisonOperator>,

    /// Threshold value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<MetricValue>,

    /// Measurement window in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i32>,

    /// Datapoints in violation before an alarm is raised
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_datapoints_to_alarm: Option<i32>,

    /// Compliant datapoints before an alarm clears
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_datapoints_to_clear: Option<i32>,

    /// Fleet-relative threshold instead of a fixed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistical_threshold: Option<StatisticalThreshold>,
}

/// A named expected-behavior rule within a security profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Behavior {
    /// Behavior name, unique within the profile
    #[serde(default)]
    pub name: String,

    /// Metric the behavior watches, e.g. `messagesSent`, `sourceIps`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,

    /// Criteria for raising an alarm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<BehaviorCriteria>,
}

/// Where behavior alarms are delivered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertTarget {
    /// ARN of the target endpoint
    #[serde(default)]
    pub alert_target_arn: String,

    /// Role the platform assumes to deliver alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
}

/// Security profile summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfileSummary {
    /// Profile name
    #[serde(default)]
    pub security_profile_name: String,

    /// Profile ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_arn: Option<String>,
}

/// Full security profile description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfileDescription {
    /// Profile name
    #[serde(default)]
    pub security_profile_name: String,

    /// Profile ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_arn: Option<String>,

    /// Profile description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_description: Option<String>,

    /// Expected-behavior rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<Behavior>,

    /// Alarm delivery targets, keyed by target type (unique keys)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub alert_targets: HashMap<AlertTargetType, AlertTarget>,

    /// Metrics retained for the fleet even without a matching behavior
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_metrics_to_retain: Vec<String>,

    /// Profile version, incremented on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    /// When the profile was created
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    /// Last profile update
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Request body for creating a security profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecurityProfileRequest {
    /// Profile name (1-128 characters of `[a-zA-Z0-9:_-]`)
    pub security_profile_name: String,

    /// Profile description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_description: Option<String>,

    /// Expected-behavior rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<Behavior>,

    /// Alarm delivery targets, keyed by target type (unique keys)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub alert_targets: HashMap<AlertTargetType, AlertTarget>,

    /// Metrics retained for the fleet even without a matching behavior
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_metrics_to_retain: Vec<String>,

    /// Metadata tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CreateSecurityProfileRequest {
    /// Create a request for the given profile name.
    pub fn new(security_profile_name: impl Into<String>) -> Self {
        Self {
            security_profile_name: security_profile_name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.security_profile_description = Some(description.into());
        self
    }

    /// Append one behavior.
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Replace the whole behavior list.
    pub fn behaviors(mut self, behaviors: Vec<Behavior>) -> Self {
        self.behaviors = behaviors;
        self
    }

    /// Insert a single alert target, rejecting duplicate target types.
    pub fn alert_target(
        mut self,
        target_type: impl Into<AlertTargetType>,
        target: AlertTarget,
    ) -> Result<Self, ModelError> {
        let target_type = target_type.into();
        if self.alert_targets.contains_key(&target_type) {
            return Err(ModelError::DuplicateKey(target_type.to_string()));
        }
        self.alert_targets.insert(target_type, target);
        Ok(self)
    }

    /// Replace the whole alert-target map.
    pub fn alert_targets(mut self, targets: HashMap<AlertTargetType, AlertTarget>) -> Self {
        self.alert_targets = targets;
        self
    }

    /// Replace the retained-metric list.
    pub fn additional_metrics_to_retain(mut self, metrics: Vec<String>) -> Self {
        self.additional_metrics_to_retain = metrics;
        self
    }
}

/// Request body for updating a security profile.
///
/// List and map fields are complete replacements; the expected version
/// guards against concurrent updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecurityProfileRequest {
    /// Profile description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_description: Option<String>,

    /// Expected-behavior rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<Behavior>,

    /// Alarm delivery targets, keyed by target type
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub alert_targets: HashMap<AlertTargetType, AlertTarget>,

    /// Metrics retained for the fleet even without a matching behavior
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_metrics_to_retain: Vec<String>,

    /// Fail the update unless the profile version matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_target() -> AlertTarget {
        AlertTarget {
            alert_target_arn: "arn:sentra:alerts/ops".to_string(),
            role_arn: Some("arn:sentra:role/alerting".to_string()),
        }
    }

    #[test]
    fn test_alert_target_duplicate_type_rejected() {
        let request = CreateSecurityProfileRequest::new("fleet-baseline")
            .alert_target(AlertTargetType::Webhook, sample_target())
            .unwrap();

        let err = request
            .alert_target(AlertTargetType::Webhook, sample_target())
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateKey("WEBHOOK".to_string()));
    }

    #[test]
    fn test_alert_target_enum_and_string_paths_converge() {
        let typed = CreateSecurityProfileRequest::new("p")
            .alert_target(AlertTargetType::Email, sample_target())
            .unwrap();
        let raw = CreateSecurityProfileRequest::new("p")
            .alert_target("EMAIL", sample_target())
            .unwrap();
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_alert_target_map_serializes_with_token_keys() {
        let request = CreateSecurityProfileRequest::new("fleet-baseline")
            .alert_target(AlertTargetType::Webhook, sample_target())
            .unwrap();

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"WEBHOOK\""));

        let back: CreateSecurityProfileRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_behavior_criteria_round_trip() {
        let behavior = Behavior {
            name: "excessive-messages".to_string(),
            metric: Some("messagesSent".to_string()),
            criteria: Some(BehaviorCriteria {
                comparison_operator: Some(ComparisonOperator::GreaterThan),
                value: Some(MetricValue::count(100)),
                duration_seconds: Some(300),
                consecutive_datapoints_to_alarm: Some(2),
                ..BehaviorCriteria::default()
            }),
        };

        let json = serde_json::to_value(&behavior).unwrap();
        assert_eq!(json["criteria"]["comparisonOperator"], "greater-than");
        assert_eq!(json["criteria"]["value"]["count"], 100);
        // port/cidr sets were never populated
        assert!(json["criteria"]["value"].get("ports").is_none());

        let back: Behavior = serde_json::from_value(json).unwrap();
        assert_eq!(back, behavior);
    }

    #[test]
    fn test_profile_description_defaults_are_absent() {
        let description: SecurityProfileDescription =
            serde_json::from_str(r#"{"securityProfileName": "fleet-baseline"}"#).unwrap();

        assert!(description.behaviors.is_empty());
        assert!(description.alert_targets.is_empty());
        assert!(description.version.is_none());
    }
}
