//! Audit task, finding, and suppression models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ModelError, string_enum, wire_time};

string_enum! {
    /// Overall status of an audit task
    AuditTaskStatus {
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Failed => "FAILED",
        Canceled => "CANCELED",
    }
}

string_enum! {
    /// How an audit task was launched
    AuditTaskType {
        OnDemand => "ON_DEMAND_AUDIT_TASK",
        Scheduled => "SCHEDULED_AUDIT_TASK",
    }
}

string_enum! {
    /// Status of a single check within an audit task
    AuditCheckRunStatus {
        InProgress => "IN_PROGRESS",
        WaitingForDataCollection => "WAITING_FOR_DATA_COLLECTION",
        Canceled => "CANCELED",
        CompletedCompliant => "COMPLETED_COMPLIANT",
        CompletedNonCompliant => "COMPLETED_NON_COMPLIANT",
        Failed => "FAILED",
    }
}

string_enum! {
    /// Severity assigned to an audit finding
    AuditFindingSeverity {
        Critical => "CRITICAL",
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
}

string_enum! {
    /// Kind of resource an identifier points at
    ResourceType {
        DeviceCertificate => "DEVICE_CERTIFICATE",
        CaCertificate => "CA_CERTIFICATE",
        ClientId => "CLIENT_ID",
        Policy => "POLICY",
        AccountSettings => "ACCOUNT_SETTINGS",
    }
}

/// Outcome details for one check within an audit task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditCheckDetails {
    /// Run status of the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_run_status: Option<AuditCheckRunStatus>,

    /// Whether every audited resource passed the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_compliant: Option<bool>,

    /// Number of resources the check examined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_resources_count: Option<i64>,

    /// Number of resources that failed the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliant_resources_count: Option<i64>,

    /// Non-compliant resources hidden by active suppressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppressed_non_compliant_resources_count: Option<i64>,

    /// Error code when the check could not run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Human-readable detail accompanying `error_code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregate counts across all checks of an audit task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTaskStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_checks: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_progress_checks: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_for_data_collection_checks: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliant_checks: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliant_checks: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_checks: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_checks: Option<i64>,
}

/// Audit task summary row returned by the task listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTaskSummary {
    /// Task ID
    #[serde(default)]
    pub task_id: String,

    /// Task status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_status: Option<AuditTaskStatus>,

    /// Task type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<AuditTaskType>,
}

/// Full audit task description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTaskDescription {
    /// Task status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_status: Option<AuditTaskStatus>,

    /// Task type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<AuditTaskType>,

    /// When the task started
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub task_start_time: Option<DateTime<Utc>>,

    /// Aggregate check counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_statistics: Option<AuditTaskStatistics>,

    /// Name of the schedule that launched the task, for scheduled tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_audit_name: Option<String>,

    /// Per-check details, keyed by check name (unique keys)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub audit_details: HashMap<String, AuditCheckDetails>,
}

impl AuditTaskDescription {
    /// Insert details for a single check, rejecting duplicate check names.
    pub fn audit_detail(
        mut self,
        check_name: impl Into<String>,
        details: AuditCheckDetails,
    ) -> Result<Self, ModelError> {
        let check_name = check_name.into();
        if self.audit_details.contains_key(&check_name) {
            return Err(ModelError::DuplicateKey(check_name));
        }
        self.audit_details.insert(check_name, details);
        Ok(self)
    }

    /// Replace the whole per-check detail map.
    pub fn audit_details(mut self, details: HashMap<String, AuditCheckDetails>) -> Self {
        self.audit_details = details;
        self
    }
}

/// Request body for starting an on-demand audit task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAuditTaskRequest {
    /// Checks to run; each must be enabled in the account audit configuration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_check_names: Vec<String>,
}

impl StartAuditTaskRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one check name.
    pub fn check(mut self, name: impl Into<String>) -> Self {
        self.target_check_names.push(name.into());
        self
    }

    /// Replace the whole check list.
    pub fn checks(mut self, names: Vec<String>) -> Self {
        self.target_check_names = names;
        self
    }
}

/// Response from starting an audit task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedAuditTask {
    /// ID of the launched task
    #[serde(default)]
    pub task_id: String,
}

/// Names a policy version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVersionIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_version_id: Option<String>,
}

/// Identifies the resource a finding or suppression applies to.
///
/// Exactly one of the identifying fields is set for any given resource type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIdentifier {
    /// Device certificate ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_certificate_id: Option<String>,

    /// CA certificate ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate_id: Option<String>,

    /// MQTT client ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Policy version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_version_identifier: Option<PolicyVersionIdentifier>,

    /// Account the finding applies to, for account-level checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl ResourceIdentifier {
    /// Identifier for a device certificate.
    pub fn device_certificate(id: impl Into<String>) -> Self {
        Self {
            device_certificate_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Identifier for a CA certificate.
    pub fn ca_certificate(id: impl Into<String>) -> Self {
        Self {
            ca_certificate_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Identifier for an MQTT client.
    pub fn client(id: impl Into<String>) -> Self {
        Self {
            client_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Identifier for a policy version.
    pub fn policy_version(name: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            policy_version_identifier: Some(PolicyVersionIdentifier {
                policy_name: Some(name.into()),
                policy_version_id: Some(version_id.into()),
            }),
            ..Self::default()
        }
    }
}

/// An active audit suppression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSuppression {
    /// Check the suppression applies to
    #[serde(default)]
    pub check_name: String,

    /// Resource the suppression applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_identifier: Option<ResourceIdentifier>,

    /// When the suppression lapses
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Suppress with no expiration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_indefinitely: Option<bool>,

    /// Why the suppression exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating an audit suppression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuditSuppressionRequest {
    /// Check to suppress findings for
    pub check_name: String,

    /// Resource to suppress findings for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_identifier: Option<ResourceIdentifier>,

    /// When the suppression lapses
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Suppress with no expiration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_indefinitely: Option<bool>,

    /// Why the suppression exists (up to 1000 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Idempotency token; retries with the same token are deduplicated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
}

impl CreateAuditSuppressionRequest {
    /// Create a request for the given check and resource.
    pub fn new(check_name: impl Into<String>, resource: ResourceIdentifier) -> Self {
        Self {
            check_name: check_name.into(),
            resource_identifier: Some(resource),
            ..Self::default()
        }
    }

    /// Set the expiration date.
    pub fn expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Suppress with no expiration.
    pub fn suppress_indefinitely(mut self, indefinitely: bool) -> Self {
        self.suppress_indefinitely = Some(indefinitely);
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the idempotency token.
    pub fn client_request_token(mut self, token: impl Into<String>) -> Self {
        self.client_request_token = Some(token.into());
        self
    }
}

/// The non-compliant resource a finding points at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonCompliantResource {
    /// Kind of resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,

    /// Identifier of the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_identifier: Option<ResourceIdentifier>,

    /// Check-specific context for the finding
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_info: HashMap<String, String>,
}

/// A resource related to a finding but not itself non-compliant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedResource {
    /// Kind of resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,

    /// Identifier of the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_identifier: Option<ResourceIdentifier>,

    /// Check-specific context
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_info: HashMap<String, String>,
}

/// A single audit finding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    /// Finding ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding_id: Option<String>,

    /// Task that produced the finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Check that produced the finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_name: Option<String>,

    /// When the task started
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub task_start_time: Option<DateTime<Utc>>,

    /// When the finding was discovered
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub finding_time: Option<DateTime<Utc>>,

    /// Severity of the finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<AuditFindingSeverity>,

    /// The resource that failed the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliant_resource: Option<NonCompliantResource>,

    /// Resources related to the finding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResource>,

    /// Why the resource is non-compliant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_non_compliance: Option<String>,

    /// Machine-readable reason code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_non_compliance_code: Option<String>,

    /// Whether an active suppression hides this finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_suppressed: Option<bool>,
}

/// Filter parameters for audit task listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditTaskFilterParams {
    /// Only tasks starting at or after this time
    pub start_time: Option<DateTime<Utc>>,
    /// Only tasks starting at or before this time
    pub end_time: Option<DateTime<Utc>>,
    /// Only tasks of this type
    pub task_type: Option<AuditTaskType>,
    /// Only tasks in this status
    pub task_status: Option<AuditTaskStatus>,
}

impl AuditTaskFilterParams {
    /// Create empty filter params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(start) = self.start_time {
            params.push(("startTime", start.timestamp().to_string()));
        }
        if let Some(end) = self.end_time {
            params.push(("endTime", end.timestamp().to_string()));
        }
        if let Some(ref task_type) = self.task_type {
            params.push(("taskType", task_type.to_string()));
        }
        if let Some(ref status) = self.task_status {
            params.push(("taskStatus", status.to_string()));
        }

        params
    }
}

/// Filter parameters for audit finding listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFindingFilterParams {
    /// Only findings from this task
    pub task_id: Option<String>,
    /// Only findings from this check
    pub check_name: Option<String>,
    /// Only findings discovered at or after this time
    pub start_time: Option<DateTime<Utc>>,
    /// Only findings discovered at or before this time
    pub end_time: Option<DateTime<Utc>>,
    /// Include findings hidden by suppressions
    pub list_suppressed_findings: Option<bool>,
}

impl AuditFindingFilterParams {
    /// Create empty filter params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(ref task_id) = self.task_id {
            params.push(("taskId", task_id.clone()));
        }
        if let Some(ref check) = self.check_name {
            params.push(("checkName", check.clone()));
        }
        if let Some(start) = self.start_time {
            params.push(("startTime", start.timestamp().to_string()));
        }
        if let Some(end) = self.end_time {
            params.push(("endTime", end.timestamp().to_string()));
        }
        if let Some(suppressed) = self.list_suppressed_findings {
            params.push(("listSuppressedFindings", suppressed.to_string()));
        }

        params
    }
}

/// Filter parameters for audit suppression listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditSuppressionFilterParams {
    /// Only suppressions for this check
    pub check_name: Option<String>,
}

impl AuditSuppressionFilterParams {
    /// Create empty filter params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref check) = self.check_name {
            params.push(("checkName", check.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_details_partial_population() {
        let details = AuditCheckDetails {
            check_run_status: Some(AuditCheckRunStatus::CompletedCompliant),
            total_resources_count: Some(100),
            non_compliant_resources_count: Some(0),
            ..AuditCheckDetails::default()
        };

        // never set independently, so it reads as absent
        assert!(details.check_compliant.is_none());

        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("checkRunStatus"));
        assert!(json.contains("totalResourcesCount"));
        assert!(json.contains("nonCompliantResourcesCount"));
        assert!(!json.contains("checkCompliant"));
        assert!(!json.contains("errorCode"));
        assert!(!json.contains("message"));
    }

    #[test]
    fn test_check_details_zero_distinct_from_absent() {
        let zeroed: AuditCheckDetails =
            serde_json::from_str(r#"{"nonCompliantResourcesCount": 0}"#).unwrap();
        let absent = AuditCheckDetails::default();

        assert_eq!(zeroed.non_compliant_resources_count, Some(0));
        assert_ne!(zeroed, absent);
    }

    #[test]
    fn test_audit_details_rejects_duplicate_check_name() {
        let description = AuditTaskDescription::default()
            .audit_detail("CA_CERTIFICATE_EXPIRING_CHECK", AuditCheckDetails::default())
            .unwrap();

        let err = description
            .audit_detail("CA_CERTIFICATE_EXPIRING_CHECK", AuditCheckDetails::default())
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateKey("CA_CERTIFICATE_EXPIRING_CHECK".to_string())
        );
    }

    #[test]
    fn test_task_description_deserializes_details_map() {
        let description: AuditTaskDescription = serde_json::from_str(
            r#"{
                "taskStatus": "COMPLETED",
                "taskType": "ON_DEMAND_AUDIT_TASK",
                "taskStartTime": 1700000000,
                "taskStatistics": {"totalChecks": 2, "compliantChecks": 1, "nonCompliantChecks": 1},
                "auditDetails": {
                    "DEVICE_CERTIFICATE_EXPIRING_CHECK": {
                        "checkRunStatus": "COMPLETED_NON_COMPLIANT",
                        "checkCompliant": false,
                        "totalResourcesCount": 50,
                        "nonCompliantResourcesCount": 3
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(description.task_status, Some(AuditTaskStatus::Completed));
        assert_eq!(description.task_type, Some(AuditTaskType::OnDemand));
        let details = &description.audit_details["DEVICE_CERTIFICATE_EXPIRING_CHECK"];
        assert_eq!(
            details.check_run_status,
            Some(AuditCheckRunStatus::CompletedNonCompliant)
        );
        assert_eq!(details.check_compliant, Some(false));
        assert_eq!(details.non_compliant_resources_count, Some(3));
    }

    #[test]
    fn test_suppression_request_enum_and_string_severity_paths() {
        // the same logical token through both construction paths
        let typed = AuditFinding {
            severity: Some(AuditFindingSeverity::High),
            ..AuditFinding::default()
        };
        let raw = AuditFinding {
            severity: Some("HIGH".into()),
            ..AuditFinding::default()
        };
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_suppression_request_serialization() {
        let request = CreateAuditSuppressionRequest::new(
            "DEVICE_CERTIFICATE_EXPIRING_CHECK",
            ResourceIdentifier::device_certificate("ab12"),
        )
        .suppress_indefinitely(true)
        .description("waived for lab devices");

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("checkName"));
        assert!(json.contains("deviceCertificateId"));
        assert!(json.contains("suppressIndefinitely"));
        assert!(!json.contains("expirationDate"));
        assert!(!json.contains("clientRequestToken"));
    }

    #[test]
    fn test_task_filter_params_query() {
        let params = AuditTaskFilterParams {
            start_time: DateTime::from_timestamp(1_700_000_000, 0),
            end_time: None,
            task_type: Some(AuditTaskType::OnDemand),
            task_status: Some(AuditTaskStatus::Failed),
        };

        let query = params.to_query_params();
        assert!(query.contains(&("startTime", "1700000000".to_string())));
        assert!(query.contains(&("taskType", "ON_DEMAND_AUDIT_TASK".to_string())));
        assert!(query.contains(&("taskStatus", "FAILED".to_string())));
        assert_eq!(query.len(), 3);
    }
}
