//! Per-resource display models

pub mod audit;
pub mod certificate;
pub mod common;
pub mod mitigation;
pub mod policy;
pub mod security_profile;
pub mod thing;
pub mod violation;

pub use audit::{AuditTaskDisplay, FindingDisplay, SuppressionDisplay};
pub use certificate::{CertificateDisplay, ProviderDisplay};
pub use mitigation::MitigationActionDisplay;
pub use policy::PolicyDisplay;
pub use security_profile::SecurityProfileDisplay;
pub use thing::ThingDisplay;
pub use violation::{ViolationDisplay, ViolationEventDisplay};
