//! Audit API trait: tasks, findings, suppressions

use async_trait::async_trait;

use crate::client::models::{
    AuditFinding, AuditFindingFilterParams, AuditSuppression, AuditSuppressionFilterParams,
    AuditTaskDescription, AuditTaskFilterParams, AuditTaskSummary, CreateAuditSuppressionRequest,
    ResourceIdentifier, StartAuditTaskRequest, StartedAuditTask,
};
use crate::client::pagination::{PagedResponse, PaginationParams};
use crate::error::Result;

/// Audit operations for the Sentra API
#[async_trait]
pub trait AuditApi: Send + Sync {
    /// Start an on-demand audit task over the given checks
    async fn start_audit_task(&self, request: &StartAuditTaskRequest) -> Result<StartedAuditTask>;

    /// Describe an audit task, including per-check details
    async fn describe_audit_task(&self, task_id: &str) -> Result<AuditTaskDescription>;

    /// List audit tasks with optional pagination and filters
    async fn list_audit_tasks(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&AuditTaskFilterParams>,
    ) -> Result<PagedResponse<AuditTaskSummary>>;

    /// Cancel a running audit task
    async fn cancel_audit_task(&self, task_id: &str) -> Result<()>;

    /// List audit findings with optional pagination and filters
    async fn list_audit_findings(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&AuditFindingFilterParams>,
    ) -> Result<PagedResponse<AuditFinding>>;

    /// Create an audit suppression for a check/resource pair
    async fn create_audit_suppression(
        &self,
        request: &CreateAuditSuppressionRequest,
    ) -> Result<()>;

    /// List audit suppressions with optional pagination and filters
    async fn list_audit_suppressions(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&AuditSuppressionFilterParams>,
    ) -> Result<PagedResponse<AuditSuppression>>;

    /// Delete the suppression for a check/resource pair
    async fn delete_audit_suppression(
        &self,
        check_name: &str,
        resource: &ResourceIdentifier,
    ) -> Result<()>;
}
