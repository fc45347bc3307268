//! Detect API trait: violations, security profiles, mitigation actions

use async_trait::async_trait;

use crate::client::models::{
    ActiveViolation, CreateMitigationActionRequest, CreateSecurityProfileRequest,
    CreatedMitigationAction, MitigationAction, MitigationActionFilterParams,
    MitigationActionSummary, SecurityProfileDescription, SecurityProfileSummary,
    UpdateSecurityProfileRequest, ViolationEvent, ViolationEventFilterParams,
    ViolationFilterParams,
};
use crate::client::pagination::{PagedResponse, PaginationParams};
use crate::error::Result;

/// Detect operations for the Sentra API
#[async_trait]
pub trait DetectApi: Send + Sync {
    // ========================================================================
    // Violations
    // ========================================================================

    /// List violations currently in alarm
    async fn list_active_violations(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&ViolationFilterParams>,
    ) -> Result<PagedResponse<ActiveViolation>>;

    /// List violation events within a time window
    async fn list_violation_events(
        &self,
        filters: &ViolationEventFilterParams,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<ViolationEvent>>;

    // ========================================================================
    // Security profiles
    // ========================================================================

    /// List security profiles with optional pagination
    async fn list_security_profiles(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<SecurityProfileSummary>>;

    /// Describe a security profile by name
    async fn describe_security_profile(&self, name: &str) -> Result<SecurityProfileDescription>;

    /// Create a security profile
    async fn create_security_profile(
        &self,
        request: &CreateSecurityProfileRequest,
    ) -> Result<SecurityProfileDescription>;

    /// Update a security profile; list and map fields are full replacements
    async fn update_security_profile(
        &self,
        name: &str,
        request: &UpdateSecurityProfileRequest,
    ) -> Result<SecurityProfileDescription>;

    /// Delete a security profile
    async fn delete_security_profile(&self, name: &str) -> Result<()>;

    // ========================================================================
    // Mitigation actions
    // ========================================================================

    /// List mitigation actions with optional pagination and filters
    async fn list_mitigation_actions(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&MitigationActionFilterParams>,
    ) -> Result<PagedResponse<MitigationActionSummary>>;

    /// Describe a mitigation action by name
    async fn describe_mitigation_action(&self, name: &str) -> Result<MitigationAction>;

    /// Create a mitigation action
    async fn create_mitigation_action(
        &self,
        request: &CreateMitigationActionRequest,
    ) -> Result<CreatedMitigationAction>;

    /// Delete a mitigation action
    async fn delete_mitigation_action(&self, name: &str) -> Result<()>;
}
