//! Sentra API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

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
use super::rate_limit::{EndpointCategory, RateLimiterSet};
use crate::error::{ApiError, Result};

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");

    // Add padding if needed
    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

/// Sentra API base URL
const API_BASE_URL: &str = "https://api.sentra.io/api/v1";

/// Sentra API client
pub struct SentraClient {
    http: HttpClient,
    base_url: String,
    limiters: Arc<RateLimiterSet>,
    auth_state: Arc<RwLock<AuthState>>,
}

/// Internal authentication state
#[derive(Debug, Clone)]
struct AuthState {
    api_key: Option<String>,
    token: Option<String>,
    token_expires_at: Option<chrono::DateTime<Utc>>,
}

impl SentraClient {
    /// Create a new Sentra API client against the production API.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_host(api_key, None)
    }

    /// Create a client against a custom API host (development/testing).
    pub fn with_host(api_key: Option<String>, api_host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = match api_host {
            Some(host) => format!("{}/api/v1", host.trim_end_matches('/')),
            None => API_BASE_URL.to_string(),
        };

        Ok(Self {
            http,
            base_url,
            limiters: Arc::new(RateLimiterSet::new()),
            auth_state: Arc::new(RwLock::new(AuthState {
                api_key,
                token: None,
                token_expires_at: None,
            })),
        })
    }

    /// Set the session token and expiry
    pub async fn set_token(&self, token: SessionToken) {
        let mut state = self.auth_state.write().await;
        state.token = Some(token.token);
        state.token_expires_at = Some(token.expires_at);
    }

    /// Check if the session token is expired or will expire soon (within 5 minutes)
    async fn is_token_expired(&self) -> bool {
        let state = self.auth_state.read().await;
        match state.token_expires_at {
            None => true,
            Some(expires_at) => {
                let now = Utc::now();
                let buffer = chrono::Duration::minutes(5);
                expires_at - buffer < now
            }
        }
    }

    /// Get the current session token, refreshing if necessary
    async fn get_valid_token(&self) -> Result<String> {
        if self.is_token_expired().await {
            let api_key = {
                let state = self.auth_state.read().await;
                state.api_key.clone().ok_or(ApiError::Unauthorized)?
            };

            let token = self.authenticate(&api_key).await?;
            self.set_token(token).await;
        }

        let state = self.auth_state.read().await;
        state.token.clone().ok_or(ApiError::Unauthorized.into())
    }

    /// GET a JSON response from an authenticated endpoint
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.request_inner(Method::GET, path, query, None).await
    }

    /// Send a body and parse a JSON response
    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request_inner(method, path, &[], Some(body)).await
    }

    /// Send a request whose successful response body is ignored
    async fn send_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let body = match body {
            Some(b) => Some(serde_json::to_value(b)?),
            None => None,
        };
        let _: Option<serde_json::Value> = self.request_inner(method, path, &[], body).await?;
        Ok(())
    }

    /// Internal request implementation
    async fn request_inner<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let category = EndpointCategory::from_request(path, &method);
        self.limiters.wait_for(category).await;

        let token = self.get_valid_token().await?;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", format!("Bearer {}", token));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            status if status.is_success() => {
                let text = response.text().await.map_err(ApiError::from)?;
                if text.is_empty() {
                    // DELETE and cancel endpoints respond with no body
                    serde_json::from_str("null").map_err(|e| {
                        ApiError::InvalidResponse(format!("Empty response: {}", e)).into()
                    })
                } else {
                    serde_json::from_str(&text).map_err(|e| {
                        ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                            .into()
                    })
                }
            }
            StatusCode::UNAUTHORIZED => {
                // Try to refresh the token once
                let api_key = {
                    let state = self.auth_state.read().await;
                    state.api_key.clone()
                };

                if let Some(api_key) = api_key {
                    let token = self.authenticate(&api_key).await?;
                    self.set_token(token).await;

                    // Retry request - box the recursive call
                    return Box::pin(self.request_inner(method, path, query, body)).await;
                }
                Err(ApiError::Unauthorized.into())
            }
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                // Future requests in this category are throttled client-side
                self.limiters.activate(category).await;

                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

/// Merge pagination and filter query parameters into one list
fn merged_query(
    pagination: Option<&PaginationParams>,
    filters: Vec<(&'static str, String)>,
) -> Vec<(&'static str, String)> {
    let mut query = pagination
        .cloned()
        .unwrap_or_default()
        .to_query_params();
    query.extend(filters);
    query
}

#[async_trait]
impl AuthApi for SentraClient {
    async fn authenticate(&self, api_key: &str) -> Result<SessionToken> {
        self.limiters.wait_for(EndpointCategory::Default).await;

        #[derive(Deserialize)]
        struct LoginResponse {
            token: String,
        }

        #[derive(Deserialize)]
        struct TokenPayload {
            exp: i64, // Unix timestamp
        }

        let url = format!("{}/auth/login", self.base_url);

        // Use GET with X-ApiKey header
        let response = self
            .http
            .get(&url)
            .header("X-ApiKey", api_key)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }

        // Get response text for debugging
        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        let login_response: LoginResponse = serde_json::from_str(&response_text).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "Failed to parse login response: {}. Body was: {}",
                e, response_text
            ))
        })?;

        // Session tokens are JWTs: header.payload.signature
        let parts: Vec<&str> = login_response.token.split('.').collect();
        if parts.len() != 3 {
            return Err(ApiError::InvalidToken.into());
        }

        // Decode the payload (base64url without padding)
        let payload_bytes = base64_decode_url(parts[1]).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to decode token payload: {}", e))
        })?;

        let payload: TokenPayload = serde_json::from_slice(&payload_bytes).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token payload: {}", e))
        })?;

        let expires_at = chrono::DateTime::from_timestamp(payload.exp, 0).ok_or_else(|| {
            ApiError::InvalidResponse("Invalid token expiration timestamp".to_string())
        })?;

        Ok(SessionToken {
            token: login_response.token,
            expires_at,
        })
    }
}

#[async_trait]
impl RegistryApi for SentraClient {
    async fn list_things(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&ThingFilterParams>,
    ) -> Result<PagedResponse<ThingSummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ThingsPage {
            #[serde(default)]
            things: Vec<ThingSummary>,
            next_token: Option<String>,
        }

        let filter_params = filters.map(|f| f.to_query_params()).unwrap_or_default();
        let query = merged_query(pagination, filter_params);
        let page: ThingsPage = self.get_json("/things", &query).await?;
        Ok(PagedResponse {
            items: page.things,
            next_token: page.next_token,
        })
    }

    async fn describe_thing(&self, thing_name: &str) -> Result<ThingDescription> {
        self.get_json(&format!("/things/{}", thing_name), &[]).await
    }

    async fn create_thing(&self, request: &CreateThingRequest) -> Result<CreatedThing> {
        self.send_json(Method::POST, "/things", request).await
    }

    async fn update_thing(&self, thing_name: &str, request: &UpdateThingRequest) -> Result<()> {
        self.send_empty(Method::PATCH, &format!("/things/{}", thing_name), Some(request))
            .await
    }

    async fn delete_thing(&self, thing_name: &str) -> Result<()> {
        self.send_empty::<()>(Method::DELETE, &format!("/things/{}", thing_name), None)
            .await
    }

    async fn list_thing_principals(&self, thing_name: &str) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct PrincipalsResponse {
            #[serde(default)]
            principals: Vec<String>,
        }

        let response: PrincipalsResponse = self
            .get_json(&format!("/things/{}/principals", thing_name), &[])
            .await?;
        Ok(response.principals)
    }

    async fn list_certificates(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<CertificateSummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CertificatesPage {
            #[serde(default)]
            certificates: Vec<CertificateSummary>,
            next_token: Option<String>,
        }

        let query = merged_query(pagination, Vec::new());
        let page: CertificatesPage = self.get_json("/certificates", &query).await?;
        Ok(PagedResponse {
            items: page.certificates,
            next_token: page.next_token,
        })
    }

    async fn describe_certificate(
        &self,
        certificate_id: &str,
    ) -> Result<CertificateDescription> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CertificateResponse {
            certificate_description: CertificateDescription,
        }

        let response: CertificateResponse = self
            .get_json(&format!("/certificates/{}", certificate_id), &[])
            .await?;
        Ok(response.certificate_description)
    }

    async fn update_certificate_status(
        &self,
        certificate_id: &str,
        status: CertificateStatus,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct UpdateStatusBody {
            status: CertificateStatus,
        }

        self.send_empty(
            Method::PATCH,
            &format!("/certificates/{}", certificate_id),
            Some(&UpdateStatusBody { status }),
        )
        .await
    }

    async fn list_certificate_providers(&self) -> Result<Vec<CertificateProviderSummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ProvidersResponse {
            #[serde(default)]
            certificate_providers: Vec<CertificateProviderSummary>,
        }

        let response: ProvidersResponse = self.get_json("/certificate-providers", &[]).await?;
        Ok(response.certificate_providers)
    }

    async fn describe_certificate_provider(&self, name: &str) -> Result<CertificateProvider> {
        self.get_json(&format!("/certificate-providers/{}", name), &[])
            .await
    }

    async fn list_policies(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<PolicySummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PoliciesPage {
            #[serde(default)]
            policies: Vec<PolicySummary>,
            next_token: Option<String>,
        }

        let query = merged_query(pagination, Vec::new());
        let page: PoliciesPage = self.get_json("/policies", &query).await?;
        Ok(PagedResponse {
            items: page.policies,
            next_token: page.next_token,
        })
    }

    async fn get_policy(&self, policy_name: &str) -> Result<Policy> {
        self.get_json(&format!("/policies/{}", policy_name), &[]).await
    }

    async fn create_policy(&self, request: &CreatePolicyRequest) -> Result<Policy> {
        self.send_json(Method::POST, "/policies", request).await
    }

    async fn delete_policy(&self, policy_name: &str) -> Result<()> {
        self.send_empty::<()>(Method::DELETE, &format!("/policies/{}", policy_name), None)
            .await
    }

    async fn get_logging_options(&self) -> Result<LoggingOptions> {
        self.get_json("/logging-options", &[]).await
    }

    async fn set_logging_options(&self, options: &LoggingOptions) -> Result<()> {
        self.send_empty(Method::PUT, "/logging-options", Some(options))
            .await
    }
}

#[async_trait]
impl AuditApi for SentraClient {
    async fn start_audit_task(&self, request: &StartAuditTaskRequest) -> Result<StartedAuditTask> {
        self.send_json(Method::POST, "/audit/tasks", request).await
    }

    async fn describe_audit_task(&self, task_id: &str) -> Result<AuditTaskDescription> {
        self.get_json(&format!("/audit/tasks/{}", task_id), &[]).await
    }

    async fn list_audit_tasks(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&AuditTaskFilterParams>,
    ) -> Result<PagedResponse<AuditTaskSummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct TasksPage {
            #[serde(default)]
            tasks: Vec<AuditTaskSummary>,
            next_token: Option<String>,
        }

        let filter_params = filters.map(|f| f.to_query_params()).unwrap_or_default();
        let query = merged_query(pagination, filter_params);
        let page: TasksPage = self.get_json("/audit/tasks", &query).await?;
        Ok(PagedResponse {
            items: page.tasks,
            next_token: page.next_token,
        })
    }

    async fn cancel_audit_task(&self, task_id: &str) -> Result<()> {
        self.send_empty::<()>(Method::PUT, &format!("/audit/tasks/{}/cancel", task_id), None)
            .await
    }

    async fn list_audit_findings(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&AuditFindingFilterParams>,
    ) -> Result<PagedResponse<AuditFinding>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct FindingsPage {
            #[serde(default)]
            findings: Vec<AuditFinding>,
            next_token: Option<String>,
        }

        let filter_params = filters.map(|f| f.to_query_params()).unwrap_or_default();
        let query = merged_query(pagination, filter_params);
        let page: FindingsPage = self.get_json("/audit/findings", &query).await?;
        Ok(PagedResponse {
            items: page.findings,
            next_token: page.next_token,
        })
    }

    async fn create_audit_suppression(
        &self,
        request: &CreateAuditSuppressionRequest,
    ) -> Result<()> {
        self.send_empty(Method::POST, "/audit/suppressions", Some(request))
            .await
    }

    async fn list_audit_suppressions(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&AuditSuppressionFilterParams>,
    ) -> Result<PagedResponse<AuditSuppression>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SuppressionsPage {
            #[serde(default)]
            suppressions: Vec<AuditSuppression>,
            next_token: Option<String>,
        }

        let filter_params = filters.map(|f| f.to_query_params()).unwrap_or_default();
        let query = merged_query(pagination, filter_params);
        let page: SuppressionsPage = self.get_json("/audit/suppressions", &query).await?;
        Ok(PagedResponse {
            items: page.suppressions,
            next_token: page.next_token,
        })
    }

    async fn delete_audit_suppression(
        &self,
        check_name: &str,
        resource: &ResourceIdentifier,
    ) -> Result<()> {
        // The resource identifier is structured, so deletion goes through a
        // POST body rather than path segments.
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DeleteSuppressionBody<'a> {
            check_name: &'a str,
            resource_identifier: &'a ResourceIdentifier,
        }

        self.send_empty(
            Method::POST,
            "/audit/suppressions/delete",
            Some(&DeleteSuppressionBody {
                check_name,
                resource_identifier: resource,
            }),
        )
        .await
    }
}

#[async_trait]
impl DetectApi for SentraClient {
    async fn list_active_violations(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&ViolationFilterParams>,
    ) -> Result<PagedResponse<ActiveViolation>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ViolationsPage {
            #[serde(default)]
            active_violations: Vec<ActiveViolation>,
            next_token: Option<String>,
        }

        let filter_params = filters.map(|f| f.to_query_params()).unwrap_or_default();
        let query = merged_query(pagination, filter_params);
        let page: ViolationsPage = self.get_json("/detect/violations/active", &query).await?;
        Ok(PagedResponse {
            items: page.active_violations,
            next_token: page.next_token,
        })
    }

    async fn list_violation_events(
        &self,
        filters: &ViolationEventFilterParams,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<ViolationEvent>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct EventsPage {
            #[serde(default)]
            violation_events: Vec<ViolationEvent>,
            next_token: Option<String>,
        }

        let query = merged_query(pagination, filters.to_query_params());
        let page: EventsPage = self.get_json("/detect/violations/events", &query).await?;
        Ok(PagedResponse {
            items: page.violation_events,
            next_token: page.next_token,
        })
    }

    async fn list_security_profiles(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<SecurityProfileSummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ProfilesPage {
            #[serde(default)]
            security_profiles: Vec<SecurityProfileSummary>,
            next_token: Option<String>,
        }

        let query = merged_query(pagination, Vec::new());
        let page: ProfilesPage = self.get_json("/detect/security-profiles", &query).await?;
        Ok(PagedResponse {
            items: page.security_profiles,
            next_token: page.next_token,
        })
    }

    async fn describe_security_profile(&self, name: &str) -> Result<SecurityProfileDescription> {
        self.get_json(&format!("/detect/security-profiles/{}", name), &[])
            .await
    }

    async fn create_security_profile(
        &self,
        request: &CreateSecurityProfileRequest,
    ) -> Result<SecurityProfileDescription> {
        self.send_json(Method::POST, "/detect/security-profiles", request)
            .await
    }

    async fn update_security_profile(
        &self,
        name: &str,
        request: &UpdateSecurityProfileRequest,
    ) -> Result<SecurityProfileDescription> {
        self.send_json(
            Method::PATCH,
            &format!("/detect/security-profiles/{}", name),
            request,
        )
        .await
    }

    async fn delete_security_profile(&self, name: &str) -> Result<()> {
        self.send_empty::<()>(
            Method::DELETE,
            &format!("/detect/security-profiles/{}", name),
            None,
        )
        .await
    }

    async fn list_mitigation_actions(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&MitigationActionFilterParams>,
    ) -> Result<PagedResponse<MitigationActionSummary>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ActionsPage {
            #[serde(default)]
            action_identifiers: Vec<MitigationActionSummary>,
            next_token: Option<String>,
        }

        let filter_params = filters.map(|f| f.to_query_params()).unwrap_or_default();
        let query = merged_query(pagination, filter_params);
        let page: ActionsPage = self.get_json("/detect/mitigation-actions", &query).await?;
        Ok(PagedResponse {
            items: page.action_identifiers,
            next_token: page.next_token,
        })
    }

    async fn describe_mitigation_action(&self, name: &str) -> Result<MitigationAction> {
        self.get_json(&format!("/detect/mitigation-actions/{}", name), &[])
            .await
    }

    async fn create_mitigation_action(
        &self,
        request: &CreateMitigationActionRequest,
    ) -> Result<CreatedMitigationAction> {
        self.send_json(Method::POST, "/detect/mitigation-actions", request)
            .await
    }

    async fn delete_mitigation_action(&self, name: &str) -> Result<()> {
        self.send_empty::<()>(
            Method::DELETE,
            &format!("/detect/mitigation-actions/{}", name),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SentraClient::new(Some("test_key".to_string()));
        assert!(client.is_ok());
    }

    #[test]
    fn test_with_host_strips_trailing_slash() {
        let client =
            SentraClient::with_host(None, Some("http://localhost:8080/".to_string())).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api/v1");
    }

    #[test]
    fn test_base64_decode_url() {
        // "eyJleHAiOjF9" is base64url for {"exp":1}
        let decoded = base64_decode_url("eyJleHAiOjF9").unwrap();
        assert_eq!(decoded, b"{\"exp\":1}");

        assert!(base64_decode_url("a").is_err());
    }

    #[test]
    fn test_merged_query_combines_sources() {
        let pagination = PaginationParams::new().max_results(10);
        let query = merged_query(
            Some(&pagination),
            vec![("thingTypeName", "door-sensor".to_string())],
        );

        assert!(query.contains(&("maxResults", "10".to_string())));
        assert!(query.contains(&("thingTypeName", "door-sensor".to_string())));
    }

    #[tokio::test]
    async fn test_token_expiry_check() {
        let client = SentraClient::new(None).unwrap();

        // No token should be expired
        assert!(client.is_token_expired().await);

        // Set expired token
        client
            .set_token(SessionToken {
                token: "test".to_string(),
                expires_at: Utc::now() - chrono::Duration::hours(1),
            })
            .await;
        assert!(client.is_token_expired().await);

        // Set valid token (expires in 1 hour)
        client
            .set_token(SessionToken {
                token: "test".to_string(),
                expires_at: Utc::now() + chrono::Duration::hours(1),
            })
            .await;
        assert!(!client.is_token_expired().await);

        // Set token expiring soon (2 minutes)
        client
            .set_token(SessionToken {
                token: "test".to_string(),
                expires_at: Utc::now() + chrono::Duration::minutes(2),
            })
            .await;
        assert!(client.is_token_expired().await);
    }
}
