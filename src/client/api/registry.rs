//! Registry API trait: things, certificates, policies, logging

use async_trait::async_trait;

use crate::client::models::{
    CertificateDescription, CertificateProvider, CertificateProviderSummary, CertificateStatus,
    CertificateSummary, CreatePolicyRequest, CreateThingRequest, CreatedThing, LoggingOptions,
    Policy, PolicySummary, ThingDescription, ThingFilterParams, ThingSummary, UpdateThingRequest,
};
use crate::client::pagination::{PagedResponse, PaginationParams};
use crate::error::Result;

/// Thing registry, certificate, policy, and logging operations
#[async_trait]
pub trait RegistryApi: Send + Sync {
    // ========================================================================
    // Things
    // ========================================================================

    /// List things with optional pagination and filters
    async fn list_things(
        &self,
        pagination: Option<&PaginationParams>,
        filters: Option<&ThingFilterParams>,
    ) -> Result<PagedResponse<ThingSummary>>;

    /// Describe a single thing by name
    async fn describe_thing(&self, thing_name: &str) -> Result<ThingDescription>;

    /// Create a thing in the registry
    async fn create_thing(&self, request: &CreateThingRequest) -> Result<CreatedThing>;

    /// Update a thing's type and attributes
    async fn update_thing(&self, thing_name: &str, request: &UpdateThingRequest) -> Result<()>;

    /// Delete a thing from the registry
    async fn delete_thing(&self, thing_name: &str) -> Result<()>;

    /// List the principal ARNs attached to a thing
    async fn list_thing_principals(&self, thing_name: &str) -> Result<Vec<String>>;

    // ========================================================================
    // Certificates
    // ========================================================================

    /// List certificates with optional pagination
    async fn list_certificates(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<CertificateSummary>>;

    /// Describe a single certificate by ID
    async fn describe_certificate(&self, certificate_id: &str)
    -> Result<CertificateDescription>;

    /// Change a certificate's lifecycle status
    async fn update_certificate_status(
        &self,
        certificate_id: &str,
        status: CertificateStatus,
    ) -> Result<()>;

    /// List certificate providers
    async fn list_certificate_providers(&self) -> Result<Vec<CertificateProviderSummary>>;

    /// Describe a certificate provider by name
    async fn describe_certificate_provider(&self, name: &str) -> Result<CertificateProvider>;

    // ========================================================================
    // Policies
    // ========================================================================

    /// List policies with optional pagination
    async fn list_policies(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<PagedResponse<PolicySummary>>;

    /// Get a policy, including its default version document
    async fn get_policy(&self, policy_name: &str) -> Result<Policy>;

    /// Create a policy
    async fn create_policy(&self, request: &CreatePolicyRequest) -> Result<Policy>;

    /// Delete a policy; all non-default versions must be deleted first
    async fn delete_policy(&self, policy_name: &str) -> Result<()>;

    // ========================================================================
    // Logging
    // ========================================================================

    /// Get the account-wide logging options
    async fn get_logging_options(&self) -> Result<LoggingOptions>;

    /// Replace the account-wide logging options
    async fn set_logging_options(&self, options: &LoggingOptions) -> Result<()>;
}
