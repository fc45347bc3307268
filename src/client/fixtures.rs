//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::models::{
    ActiveViolation, AuditCheckDetails, AuditCheckRunStatus, AuditFinding, AuditFindingSeverity,
    AuditTaskDescription, AuditTaskStatus, AuditTaskSummary, AuditTaskType, Behavior,
    BehaviorCriteria, CertificateStatus, CertificateSummary, ComparisonOperator, MetricValue,
    MitigationAction, MitigationActionParams, SecurityProfileDescription, ThingDescription,
    ThingSummary, UpdateDeviceCertificateParams,
};

fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid fixture timestamp")
}

// ============================================================================
// ThingBuilder
// ============================================================================

/// Builder for creating test thing instances.
///
/// # Example
/// ```ignore
/// let thing = ThingBuilder::new("front-door-42")
///     .thing_type("door-sensor")
///     .attribute("building", "hq")
///     .build_summary();
/// ```
#[derive(Debug, Clone)]
pub struct ThingBuilder {
    name: String,
    thing_type: Option<String>,
    attributes: HashMap<String, String>,
    version: Option<i64>,
}

impl ThingBuilder {
    /// Create a new builder with the given thing name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thing_type: None,
            attributes: HashMap::new(),
            version: Some(1),
        }
    }

    /// Set the thing type.
    pub fn thing_type(mut self, thing_type: impl Into<String>) -> Self {
        self.thing_type = Some(thing_type.into());
        self
    }

    /// Add an attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the registry version.
    pub fn version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    /// Build a listing summary.
    pub fn build_summary(self) -> ThingSummary {
        ThingSummary {
            thing_arn: Some(format!("arn:sentra:thing/{}", self.name)),
            thing_name: self.name,
            thing_type_name: self.thing_type,
            attributes: self.attributes,
            version: self.version,
        }
    }

    /// Build a full description.
    pub fn build_description(self) -> ThingDescription {
        ThingDescription {
            thing_id: Some(format!("tid-{}", self.name)),
            thing_arn: Some(format!("arn:sentra:thing/{}", self.name)),
            default_client_id: Some(self.name.clone()),
            thing_name: self.name,
            thing_type_name: self.thing_type,
            attributes: self.attributes,
            version: self.version,
            billing_group_name: None,
        }
    }
}

// ============================================================================
// CertificateBuilder
// ============================================================================

/// Builder for creating test certificate summaries.
#[derive(Debug, Clone)]
pub struct CertificateBuilder {
    id: String,
    status: CertificateStatus,
}

impl CertificateBuilder {
    /// Create a new builder with the given certificate ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: CertificateStatus::Active,
        }
    }

    /// Set the lifecycle status.
    pub fn status(mut self, status: CertificateStatus) -> Self {
        self.status = status;
        self
    }

    /// Build a listing summary.
    pub fn build(self) -> CertificateSummary {
        CertificateSummary {
            certificate_arn: Some(format!("arn:sentra:cert/{}", self.id)),
            certificate_id: self.id,
            status: Some(self.status),
            creation_date: Some(fixed_time()),
        }
    }
}

// ============================================================================
// AuditTaskBuilder
// ============================================================================

/// Builder for creating test audit tasks.
#[derive(Debug, Clone)]
pub struct AuditTaskBuilder {
    id: String,
    status: AuditTaskStatus,
    task_type: AuditTaskType,
    details: HashMap<String, AuditCheckDetails>,
}

impl AuditTaskBuilder {
    /// Create a new builder with the given task ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: AuditTaskStatus::Completed,
            task_type: AuditTaskType::OnDemand,
            details: HashMap::new(),
        }
    }

    /// Set the task status.
    pub fn status(mut self, status: AuditTaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the task type.
    pub fn task_type(mut self, task_type: AuditTaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Add a compliant check result.
    pub fn compliant_check(mut self, name: impl Into<String>, total: i64) -> Self {
        self.details.insert(
            name.into(),
            AuditCheckDetails {
                check_run_status: Some(AuditCheckRunStatus::CompletedCompliant),
                check_compliant: Some(true),
                total_resources_count: Some(total),
                non_compliant_resources_count: Some(0),
                ..AuditCheckDetails::default()
            },
        );
        self
    }

    /// Add a non-compliant check result.
    pub fn non_compliant_check(
        mut self,
        name: impl Into<String>,
        total: i64,
        non_compliant: i64,
    ) -> Self {
        self.details.insert(
            name.into(),
            AuditCheckDetails {
                check_run_status: Some(AuditCheckRunStatus::CompletedNonCompliant),
                check_compliant: Some(false),
                total_resources_count: Some(total),
                non_compliant_resources_count: Some(non_compliant),
                ..AuditCheckDetails::default()
            },
        );
        self
    }

    /// Build a listing summary.
    pub fn build_summary(self) -> AuditTaskSummary {
        AuditTaskSummary {
            task_id: self.id,
            task_status: Some(self.status),
            task_type: Some(self.task_type),
        }
    }

    /// Build a full description.
    pub fn build_description(self) -> AuditTaskDescription {
        AuditTaskDescription {
            task_status: Some(self.status),
            task_type: Some(self.task_type),
            task_start_time: Some(fixed_time()),
            audit_details: self.details,
            ..AuditTaskDescription::default()
        }
    }
}

// ============================================================================
// AuditFindingBuilder
// ============================================================================

/// Builder for creating test audit findings.
#[derive(Debug, Clone)]
pub struct AuditFindingBuilder {
    id: String,
    check_name: String,
    severity: AuditFindingSeverity,
    task_id: Option<String>,
}

impl AuditFindingBuilder {
    /// Create a new builder with the given finding ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            check_name: "DEVICE_CERTIFICATE_EXPIRING_CHECK".to_string(),
            severity: AuditFindingSeverity::Medium,
            task_id: None,
        }
    }

    /// Set the check name.
    pub fn check_name(mut self, name: impl Into<String>) -> Self {
        self.check_name = name.into();
        self
    }

    /// Set the severity.
    pub fn severity(mut self, severity: AuditFindingSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Set the originating task ID.
    pub fn task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Build the finding.
    pub fn build(self) -> AuditFinding {
        AuditFinding {
            finding_id: Some(self.id),
            task_id: self.task_id,
            check_name: Some(self.check_name),
            finding_time: Some(fixed_time()),
            severity: Some(self.severity),
            ..AuditFinding::default()
        }
    }
}

// ============================================================================
// ActiveViolationBuilder
// ============================================================================

/// Builder for creating test active violations.
#[derive(Debug, Clone)]
pub struct ActiveViolationBuilder {
    id: String,
    thing_name: String,
    profile: String,
}

impl ActiveViolationBuilder {
    /// Create a new builder with the given violation ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thing_name: "front-door-42".to_string(),
            profile: "fleet-baseline".to_string(),
        }
    }

    /// Set the violating thing.
    pub fn thing_name(mut self, name: impl Into<String>) -> Self {
        self.thing_name = name.into();
        self
    }

    /// Set the violated profile.
    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = name.into();
        self
    }

    /// Build the violation.
    pub fn build(self) -> ActiveViolation {
        ActiveViolation {
            violation_id: Some(self.id),
            thing_name: Some(self.thing_name),
            security_profile_name: Some(self.profile),
            behavior: Some(Behavior {
                name: "excessive-messages".to_string(),
                metric: Some("messagesSent".to_string()),
                criteria: Some(BehaviorCriteria {
                    comparison_operator: Some(ComparisonOperator::GreaterThan),
                    value: Some(MetricValue::count(100)),
                    duration_seconds: Some(300),
                    ..BehaviorCriteria::default()
                }),
            }),
            last_violation_value: Some(MetricValue::count(250)),
            last_violation_time: Some(fixed_time()),
            violation_start_time: Some(fixed_time()),
        }
    }
}

// ============================================================================
// SecurityProfileBuilder
// ============================================================================

/// Builder for creating test security profiles.
#[derive(Debug, Clone)]
pub struct SecurityProfileBuilder {
    name: String,
    behaviors: Vec<Behavior>,
}

impl SecurityProfileBuilder {
    /// Create a new builder with the given profile name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behaviors: Vec::new(),
        }
    }

    /// Add a count-threshold behavior.
    pub fn count_behavior(mut self, name: impl Into<String>, metric: impl Into<String>, threshold: i64) -> Self {
        self.behaviors.push(Behavior {
            name: name.into(),
            metric: Some(metric.into()),
            criteria: Some(BehaviorCriteria {
                comparison_operator: Some(ComparisonOperator::GreaterThan),
                value: Some(MetricValue::count(threshold)),
                ..BehaviorCriteria::default()
            }),
        });
        self
    }

    /// Build the profile description.
    pub fn build(self) -> SecurityProfileDescription {
        SecurityProfileDescription {
            security_profile_arn: Some(format!("arn:sentra:profile/{}", self.name)),
            security_profile_name: self.name,
            behaviors: self.behaviors,
            version: Some(1),
            creation_date: Some(fixed_time()),
            ..SecurityProfileDescription::default()
        }
    }
}

// ============================================================================
// MitigationActionBuilder
// ============================================================================

/// Builder for creating test mitigation actions.
#[derive(Debug, Clone)]
pub struct MitigationActionBuilder {
    name: String,
    params: MitigationActionParams,
}

impl MitigationActionBuilder {
    /// Create a new builder with the given action name; defaults to a
    /// device-certificate deactivation action.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: MitigationActionParams {
                update_device_certificate_params: Some(UpdateDeviceCertificateParams {
                    action: Some("DEACTIVATE".into()),
                }),
                ..MitigationActionParams::default()
            },
        }
    }

    /// Replace the parameter block.
    pub fn params(mut self, params: MitigationActionParams) -> Self {
        self.params = params;
        self
    }

    /// Build the action description.
    pub fn build(self) -> MitigationAction {
        MitigationAction {
            action_id: Some(format!("ma-{}", self.name)),
            action_arn: Some(format!("arn:sentra:action/{}", self.name)),
            action_name: self.name,
            role_arn: Some("arn:sentra:role/mitigation".to_string()),
            action_params: Some(self.params),
            creation_date: Some(fixed_time()),
            last_modified_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thing_builder_defaults() {
        let summary = ThingBuilder::new("front-door-42").build_summary();
        assert_eq!(summary.thing_name, "front-door-42");
        assert_eq!(summary.version, Some(1));
        assert!(summary.thing_type_name.is_none());
    }

    #[test]
    fn test_audit_task_builder_check_details() {
        let description = AuditTaskBuilder::new("task-1")
            .compliant_check("LOGGING_ENABLED_CHECK", 1)
            .non_compliant_check("DEVICE_CERTIFICATE_EXPIRING_CHECK", 50, 3)
            .build_description();

        assert_eq!(description.audit_details.len(), 2);
        let failing = &description.audit_details["DEVICE_CERTIFICATE_EXPIRING_CHECK"];
        assert_eq!(failing.check_compliant, Some(false));
        assert_eq!(failing.non_compliant_resources_count, Some(3));
    }

    #[test]
    fn test_mitigation_builder_infers_action_type() {
        let action = MitigationActionBuilder::new("deactivate-cert").build();
        assert_eq!(
            action.action_params.unwrap().action_type().unwrap().as_str(),
            "UPDATE_DEVICE_CERTIFICATE"
        );
    }
}
