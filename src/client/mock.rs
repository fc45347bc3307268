//! Mock Sentra API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::api::{AuditApi, AuthApi, DetectApi, RegistryApi};
use super::models::{
    ActiveViolation, AuditFinding, AuditFindingFilterParams, AuditSuppression,
    AuditSuppressionFilterParams, AuditTaskDescription, AuditTaskFilterParams, AuditTaskSummary,
    CertificateDescription, CertificateProvider, CertificateProviderSummary, CertificateStatus,
    CertificateSummary, CreateAuditSuppressionRequest, CreateMitigationActionRequest,
    CreatePolicyRequest, CreateSecurityProfileRequest, CreateThingRequest, CreatedMitigationAction,
    CreatedThing, LoggingOptions, MitigationAction, MitigationActionFilterParams,
    MitigationActionSummary, Policy, PolicySummary, ResourceIdentifier, SecurityProfileDescription,
    SecurityProfileSummary, SessionToken, StartAuditTaskRequest, StartedAuditTask,
    ThingDescription, ThingFilterParams, ThingSummary, UpdateSecurityProfileRequest,
    UpdateThingRequest, ViolationEvent, ViolationEventFilterParams, ViolationFilterParams,
};
use super::pagination::{PagedResponse, PaginationParams};
use crate::error::{ApiError, Result};

/// A mutation observed by the mock, for test assertions
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Operation name, e.g. `create_thing`
    pub operation: String,
    /// Serialized request body
    pub body: serde_json::Value,
}

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSentraClient::new()
///     .with_things(vec![ThingBuilder::new("front-door-42").build_summary()]);
///
/// let page = mock.list_things(None, None).await?;
/// assert_eq!(page.items.len(), 1);
/// ```
#[derive(Default)]
pub struct MockSentraClient {
    things: Arc<Mutex<Vec<ThingSummary>>>,
    thing_descriptions: Arc<Mutex<Vec<ThingDescription>>>,
    certificates: Arc<Mutex<Vec<CertificateSummary>>>,
    certificate_descriptions: Arc<Mutex<Vec<CertificateDescription>>>,
    certificate_providers: Arc<Mutex<Vec<CertificateProviderSummary>>>,
    provider_descriptions: Arc<Mutex<Vec<CertificateProvider>>>,
    policies: Arc<Mutex<Vec<Policy>>>,
    logging_options: Arc<Mutex<Option<LoggingOptions>>>,
    audit_tasks: Arc<Mutex<Vec<AuditTaskSummary>>>,
    audit_task_descriptions: Arc<Mutex<HashMap<String, AuditTaskDescription>>>,
    audit_findings: Arc<Mutex<Vec<AuditFinding>>>,
    audit_suppressions: Arc<Mutex<Vec<AuditSuppression>>>,
    active_violations: Arc<Mutex<Vec<ActiveViolation>>>,
    violation_events: Arc<Mutex<Vec<ViolationEvent>>>,
    security_profiles: Arc<Mutex<Vec<SecurityProfileDescription>>>,
    mitigation_actions: Arc<Mutex<Vec<MitigationAction>>>,
    /// Session token to return from authenticate
    session: Arc<Mutex<Option<SessionToken>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Mutations observed, for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockSentraClient {
    /// Create an empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thing summaries returned by `list_things`.
    pub fn with_things(self, things: Vec<ThingSummary>) -> Self {
        *self.things.lock().unwrap() = things;
        self
    }

    /// Set the thing descriptions returned by `describe_thing`.
    pub fn with_thing_descriptions(self, descriptions: Vec<ThingDescription>) -> Self {
        *self.thing_descriptions.lock().unwrap() = descriptions;
        self
    }

    /// Set the certificate summaries returned by `list_certificates`.
    pub fn with_certificates(self, certificates: Vec<CertificateSummary>) -> Self {
        *self.certificates.lock().unwrap() = certificates;
        self
    }

    /// Set the certificate descriptions returned by `describe_certificate`.
    pub fn with_certificate_descriptions(
        self,
        descriptions: Vec<CertificateDescription>,
    ) -> Self {
        *self.certificate_descriptions.lock().unwrap() = descriptions;
        self
    }

    /// Set the certificate providers returned by the provider endpoints.
    pub fn with_certificate_providers(self, providers: Vec<CertificateProvider>) -> Self {
        *self.certificate_providers.lock().unwrap() = providers
            .iter()
            .map(|p| CertificateProviderSummary {
                certificate_provider_name: p.certificate_provider_name.clone(),
                certificate_provider_arn: p.certificate_provider_arn.clone(),
            })
            .collect();
        *self.provider_descriptions.lock().unwrap() = providers;
        self
    }

    /// Set the policies returned by `list_policies`/`get_policy`.
    pub fn with_policies(self, policies: Vec<Policy>) -> Self {
        *self.policies.lock().unwrap() = policies;
        self
    }

    /// Set the logging options returned by `get_logging_options`.
    pub fn with_logging_options(self, options: LoggingOptions) -> Self {
        *self.logging_options.lock().unwrap() = Some(options);
        self
    }

    /// Set the audit task summaries returned by `list_audit_tasks`.
    pub fn with_audit_tasks(self, tasks: Vec<AuditTaskSummary>) -> Self {
        *self.audit_tasks.lock().unwrap() = tasks;
        self
    }

    /// Set the description returned by `describe_audit_task` for a task ID.
    pub fn with_audit_task_description(
        self,
        task_id: impl Into<String>,
        description: AuditTaskDescription,
    ) -> Self {
        self.audit_task_descriptions
            .lock().unwrap()
            .insert(task_id.into(), description);
        self
    }

    /// Set the findings returned by `list_audit_findings`.
    pub fn with_audit_findings(self, findings: Vec<AuditFinding>) -> Self {
        *self.audit_findings.lock().unwrap() = findings;
        self
    }

    /// Set the suppressions returned by `list_audit_suppressions`.
    pub fn with_audit_suppressions(self, suppressions: Vec<AuditSuppression>) -> Self {
        *self.audit_suppressions.lock().unwrap() = suppressions;
        self
    }

    /// Set the violations returned by `list_active_violations`.
    pub fn with_active_violations(self, violations: Vec<ActiveViolation>) -> Self {
        *self.active_violations.lock().unwrap() = violations;
        self
    }

    /// Set the events returned by `list_violation_events`.
    pub fn with_violation_events(self, events: Vec<ViolationEvent>) -> Self {
        *self.violation_events.lock().unwrap() = events;
        self
    }

    /// Set the profiles returned by the security-profile endpoints.
    pub fn with_security_profiles(self, profiles: Vec<SecurityProfileDescription>) -> Self {
        *self.security_profiles.lock().unwrap() = profiles;
        self
    }

    /// Set the actions returned by the mitigation-action endpoints.
    pub fn with_mitigation_actions(self, actions: Vec<MitigationAction>) -> Self {
        *self.mitigation_actions.lock().unwrap() = actions;
        self
    }

    /// Set the session token returned by `authenticate`.
    pub fn with_session(self, session: SessionToken) -> Self {
        *self.session.lock().unwrap() = Some(session);
        self
    }

    /// Make the next API call fail with the given error.
    pub fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    /// Mutations the mock has observed, in call order.
    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    /// Return the queued error, if one is set.
    async fn take_error(&self) -> Result<()> {
        if let Some(err) = self.error.lock().unwrap().take() {
            return Err(err.into());
        }
        Ok(())
    }

    async fn capture(&self, operation: &str, body: serde_json::Value) {
        self.captured_requests.lock().unwrap().push(CapturedRequest {
            operation: operation.to_string(),
            body,
        });
    }
}

#[async_trait]
impl AuthApi for MockSentraClient {
    async fn authenticate(&self, _api_key: &str) -> Result<SessionToken> {
        self.take_error().await?;
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::Unauthorized.into())
    }
}

#[async_trait]
impl RegistryApi for MockSentraClient {
    async fn list_things(
        &self,
        _pagination: Option<&PaginationParams>,
        filters: Option<&ThingFilterParams>,
    ) -> Result<PagedResponse<ThingSummary>> {
        self.take_error().await?;
        let mut things = self.things.lock().unwrap().clone();

        if let Some(filters) = filters
            && let Some(ref thing_type) = filters.thing_type_name
        {
            things.retain(|t| t.thing_type_name.as_deref() == Some(thing_type));
        }

        Ok(PagedResponse::new(things))
    }

    async fn describe_thing(&self, thing_name: &str) -> Result<ThingDescription> {
        self.take_error().await?;
        self.thing_descriptions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.thing_name == thing_name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(thing_name.to_string()).into())
    }

    async fn create_thing(&self, request: &CreateThingRequest) -> Result<CreatedThing> {
        self.take_error().await?;
        self.capture("create_thing", serde_json::to_value(request)?)
            .await;
        Ok(CreatedThing {
            thing_name: request.thing_name.clone(),
            thing_arn: Some(format!("arn:sentra:thing/{}", request.thing_name)),
            thing_id: Some(format!("tid-{}", request.thing_name)),
        })
    }

    async fn update_thing(&self, thing_name: &str, request: &UpdateThingRequest) -> Result<()> {
        self.take_error().await?;
        let mut body = serde_json::to_value(request)?;
        body["thingName"] = serde_json::Value::String(thing_name.to_string());
        self.capture("update_thing", body).await;
        Ok(())
    }

    async fn delete_thing(&self, thing_name: &str) -> Result<()> {
        self.take_error().await?;
        self.capture("delete_thing", serde_json::json!({"thingName": thing_name}))
            .await;
        Ok(())
    }

    async fn list_thing_principals(&self, thing_name: &str) -> Result<Vec<String>> {
        self.take_error().await?;
        Ok(vec![format!("arn:sentra:cert/{}", thing_name)])
    }

    async fn list_certificates(
        &self,
        _pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<CertificateSummary>> {
        self.take_error().await?;
        Ok(PagedResponse::new(self.certificates.lock().unwrap().clone()))
    }

    async fn describe_certificate(
        &self,
        certificate_id: &str,
    ) -> Result<CertificateDescription> {
        self.take_error().await?;
        self.certificate_descriptions
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.certificate_id == certificate_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(certificate_id.to_string()).into())
    }

    async fn update_certificate_status(
        &self,
        certificate_id: &str,
        status: CertificateStatus,
    ) -> Result<()> {
        self.take_error().await?;
        self.capture(
            "update_certificate_status",
            serde_json::json!({"certificateId": certificate_id, "status": status.as_str()}),
        )
        .await;
        Ok(())
    }

    async fn list_certificate_providers(&self) -> Result<Vec<CertificateProviderSummary>> {
        self.take_error().await?;
        Ok(self.certificate_providers.lock().unwrap().clone())
    }

    async fn describe_certificate_provider(&self, name: &str) -> Result<CertificateProvider> {
        self.take_error().await?;
        self.provider_descriptions
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.certificate_provider_name == name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(name.to_string()).into())
    }

    async fn list_policies(
        &self,
        _pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<PolicySummary>> {
        self.take_error().await?;
        let summaries = self
            .policies
            .lock()
            .unwrap()
            .iter()
            .map(|p| PolicySummary {
                policy_name: p.policy_name.clone(),
                policy_arn: p.policy_arn.clone(),
            })
            .collect();
        Ok(PagedResponse::new(summaries))
    }

    async fn get_policy(&self, policy_name: &str) -> Result<Policy> {
        self.take_error().await?;
        self.policies
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.policy_name == policy_name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(policy_name.to_string()).into())
    }

    async fn create_policy(&self, request: &CreatePolicyRequest) -> Result<Policy> {
        self.take_error().await?;
        self.capture("create_policy", serde_json::to_value(request)?)
            .await;
        Ok(Policy {
            policy_name: request.policy_name.clone(),
            policy_arn: Some(format!("arn:sentra:policy/{}", request.policy_name)),
            policy_document: Some(request.policy_document.clone()),
            default_version_id: Some("1".to_string()),
            creation_date: None,
        })
    }

    async fn delete_policy(&self, policy_name: &str) -> Result<()> {
        self.take_error().await?;
        self.capture("delete_policy", serde_json::json!({"policyName": policy_name}))
            .await;
        Ok(())
    }

    async fn get_logging_options(&self) -> Result<LoggingOptions> {
        self.take_error().await?;
        Ok(self.logging_options.lock().unwrap().clone().unwrap_or_default())
    }

    async fn set_logging_options(&self, options: &LoggingOptions) -> Result<()> {
        self.take_error().await?;
        self.capture("set_logging_options", serde_json::to_value(options)?)
            .await;
        *self.logging_options.lock().unwrap() = Some(options.clone());
        Ok(())
    }
}

#[async_trait]
impl AuditApi for MockSentraClient {
    async fn start_audit_task(&self, request: &StartAuditTaskRequest) -> Result<StartedAuditTask> {
        self.take_error().await?;
        self.capture("start_audit_task", serde_json::to_value(request)?)
            .await;
        Ok(StartedAuditTask {
            task_id: "task-mock-1".to_string(),
        })
    }

    async fn describe_audit_task(&self, task_id: &str) -> Result<AuditTaskDescription> {
        self.take_error().await?;
        self.audit_task_descriptions
            .lock()
            .unwrap()
            .get(task_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(task_id.to_string()).into())
    }

    async fn list_audit_tasks(
        &self,
        _pagination: Option<&PaginationParams>,
        filters: Option<&AuditTaskFilterParams>,
    ) -> Result<PagedResponse<AuditTaskSummary>> {
        self.take_error().await?;
        let mut tasks = self.audit_tasks.lock().unwrap().clone();

        if let Some(filters) = filters
            && let Some(ref status) = filters.task_status
        {
            tasks.retain(|t| t.task_status.as_ref() == Some(status));
        }

        Ok(PagedResponse::new(tasks))
    }

    async fn cancel_audit_task(&self, task_id: &str) -> Result<()> {
        self.take_error().await?;
        self.capture("cancel_audit_task", serde_json::json!({"taskId": task_id}))
            .await;
        Ok(())
    }

    async fn list_audit_findings(
        &self,
        _pagination: Option<&PaginationParams>,
        filters: Option<&AuditFindingFilterParams>,
    ) -> Result<PagedResponse<AuditFinding>> {
        self.take_error().await?;
        let mut findings = self.audit_findings.lock().unwrap().clone();

        if let Some(filters) = filters {
            if let Some(ref check) = filters.check_name {
                findings.retain(|f| f.check_name.as_deref() == Some(check));
            }
            if let Some(ref task_id) = filters.task_id {
                findings.retain(|f| f.task_id.as_deref() == Some(task_id));
            }
        }

        Ok(PagedResponse::new(findings))
    }

    async fn create_audit_suppression(
        &self,
        request: &CreateAuditSuppressionRequest,
    ) -> Result<()> {
        self.take_error().await?;
        self.capture("create_audit_suppression", serde_json::to_value(request)?)
            .await;
        Ok(())
    }

    async fn list_audit_suppressions(
        &self,
        _pagination: Option<&PaginationParams>,
        filters: Option<&AuditSuppressionFilterParams>,
    ) -> Result<PagedResponse<AuditSuppression>> {
        self.take_error().await?;
        let mut suppressions = self.audit_suppressions.lock().unwrap().clone();

        if let Some(filters) = filters
            && let Some(ref check) = filters.check_name
        {
            suppressions.retain(|s| s.check_name == *check);
        }

        Ok(PagedResponse::new(suppressions))
    }

    async fn delete_audit_suppression(
        &self,
        check_name: &str,
        resource: &ResourceIdentifier,
    ) -> Result<()> {
        self.take_error().await?;
        self.capture(
            "delete_audit_suppression",
            serde_json::json!({
                "checkName": check_name,
                "resourceIdentifier": serde_json::to_value(resource)?,
            }),
        )
        .await;
        Ok(())
    }
}

#[async_trait]
impl DetectApi for MockSentraClient {
    async fn list_active_violations(
        &self,
        _pagination: Option<&PaginationParams>,
        filters: Option<&ViolationFilterParams>,
    ) -> Result<PagedResponse<ActiveViolation>> {
        self.take_error().await?;
        let mut violations = self.active_violations.lock().unwrap().clone();

        if let Some(filters) = filters {
            if let Some(ref thing) = filters.thing_name {
                violations.retain(|v| v.thing_name.as_deref() == Some(thing));
            }
            if let Some(ref profile) = filters.security_profile_name {
                violations.retain(|v| v.security_profile_name.as_deref() == Some(profile));
            }
        }

        Ok(PagedResponse::new(violations))
    }

    async fn list_violation_events(
        &self,
        filters: &ViolationEventFilterParams,
        _pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<ViolationEvent>> {
        self.take_error().await?;
        let mut events = self.violation_events.lock().unwrap().clone();

        events.retain(|e| match e.violation_event_time {
            Some(time) => time >= filters.start_time && time <= filters.end_time,
            None => true,
        });
        if let Some(ref thing) = filters.thing_name {
            events.retain(|e| e.thing_name.as_deref() == Some(thing));
        }

        Ok(PagedResponse::new(events))
    }

    async fn list_security_profiles(
        &self,
        _pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<SecurityProfileSummary>> {
        self.take_error().await?;
        let summaries = self
            .security_profiles
            .lock()
            .unwrap()
            .iter()
            .map(|p| SecurityProfileSummary {
                security_profile_name: p.security_profile_name.clone(),
                security_profile_arn: p.security_profile_arn.clone(),
            })
            .collect();
        Ok(PagedResponse::new(summaries))
    }

    async fn describe_security_profile(&self, name: &str) -> Result<SecurityProfileDescription> {
        self.take_error().await?;
        self.security_profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.security_profile_name == name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(name.to_string()).into())
    }

    async fn create_security_profile(
        &self,
        request: &CreateSecurityProfileRequest,
    ) -> Result<SecurityProfileDescription> {
        self.take_error().await?;
        self.capture("create_security_profile", serde_json::to_value(request)?)
            .await;
        Ok(SecurityProfileDescription {
            security_profile_name: request.security_profile_name.clone(),
            security_profile_arn: Some(format!(
                "arn:sentra:profile/{}",
                request.security_profile_name
            )),
            security_profile_description: request.security_profile_description.clone(),
            behaviors: request.behaviors.clone(),
            alert_targets: request.alert_targets.clone(),
            additional_metrics_to_retain: request.additional_metrics_to_retain.clone(),
            version: Some(1),
            ..SecurityProfileDescription::default()
        })
    }

    async fn update_security_profile(
        &self,
        name: &str,
        request: &UpdateSecurityProfileRequest,
    ) -> Result<SecurityProfileDescription> {
        self.take_error().await?;
        let mut body = serde_json::to_value(request)?;
        body["securityProfileName"] = serde_json::Value::String(name.to_string());
        self.capture("update_security_profile", body).await;
        self.describe_security_profile(name).await
    }

    async fn delete_security_profile(&self, name: &str) -> Result<()> {
        self.take_error().await?;
        self.capture(
            "delete_security_profile",
            serde_json::json!({"securityProfileName": name}),
        )
        .await;
        Ok(())
    }

    async fn list_mitigation_actions(
        &self,
        _pagination: Option<&PaginationParams>,
        filters: Option<&MitigationActionFilterParams>,
    ) -> Result<PagedResponse<MitigationActionSummary>> {
        self.take_error().await?;
        let mut actions = self.mitigation_actions.lock().unwrap().clone();

        if let Some(filters) = filters
            && let Some(ref action_type) = filters.action_type
        {
            actions.retain(|a| {
                a.action_params
                    .as_ref()
                    .and_then(|p| p.action_type())
                    .as_ref()
                    == Some(action_type)
            });
        }

        let summaries = actions
            .iter()
            .map(|a| MitigationActionSummary {
                action_name: a.action_name.clone(),
                action_arn: a.action_arn.clone(),
                creation_date: a.creation_date,
            })
            .collect();
        Ok(PagedResponse::new(summaries))
    }

    async fn describe_mitigation_action(&self, name: &str) -> Result<MitigationAction> {
        self.take_error().await?;
        self.mitigation_actions
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.action_name == name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(name.to_string()).into())
    }

    async fn create_mitigation_action(
        &self,
        request: &CreateMitigationActionRequest,
    ) -> Result<CreatedMitigationAction> {
        self.take_error().await?;
        self.capture("create_mitigation_action", serde_json::to_value(request)?)
            .await;
        Ok(CreatedMitigationAction {
            action_arn: Some(format!("arn:sentra:action/{}", request.action_name)),
            action_id: Some("ma-mock-1".to_string()),
        })
    }

    async fn delete_mitigation_action(&self, name: &str) -> Result<()> {
        self.take_error().await?;
        self.capture(
            "delete_mitigation_action",
            serde_json::json!({"actionName": name}),
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::*;

    #[tokio::test]
    async fn test_mock_lists_configured_things() {
        let mock = MockSentraClient::new().with_things(vec![
            ThingBuilder::new("front-door-42").build_summary(),
            ThingBuilder::new("hallway-7")
                .thing_type("camera")
                .build_summary(),
        ]);

        let page = mock.list_things(None, None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_next_page());

        let filters = ThingFilterParams {
            thing_type_name: Some("camera".to_string()),
            ..ThingFilterParams::default()
        };
        let page = mock.list_things(None, Some(&filters)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].thing_name, "hallway-7");
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockSentraClient::new().with_error(ApiError::Forbidden);

        assert!(mock.list_things(None, None).await.is_err());
        assert!(mock.list_things(None, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_captures_mutations() {
        let mock = MockSentraClient::new();
        let request = CreateThingRequest::new("front-door-42")
            .attribute("building", "hq")
            .unwrap();

        mock.create_thing(&request).await.unwrap();
        mock.delete_thing("front-door-42").await.unwrap();

        let captured = mock.captured_requests();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].operation, "create_thing");
        assert_eq!(captured[0].body["thingName"], "front-door-42");
        assert_eq!(captured[1].operation, "delete_thing");
    }

    #[tokio::test]
    async fn test_mock_describe_unknown_thing_is_not_found() {
        let mock = MockSentraClient::new();
        let err = mock.describe_thing("missing").await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
