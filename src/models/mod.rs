//! Display models for CLI output
//!
//! This module provides shared display model abstractions for converting
//! API response types into CLI-friendly display formats.

pub mod display;

pub use display::{
    AuditTaskDisplay, CertificateDisplay, FindingDisplay, MitigationActionDisplay, PolicyDisplay,
    ProviderDisplay, SecurityProfileDisplay, SuppressionDisplay, ThingDisplay,
    ViolationDisplay, ViolationEventDisplay,
};
