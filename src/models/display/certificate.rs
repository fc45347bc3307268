//! Certificate and provider display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{display_opt, truncate_string};
use crate::client::models::{CertificateProviderSummary, CertificateSummary};
use crate::output::formatters::format_datetime;

/// Certificate display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CertificateDisplay {
    /// Certificate ID, truncated for table width
    #[tabled(rename = "CERT ID")]
    pub id: String,

    /// Lifecycle status
    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Registration date
    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<CertificateSummary> for CertificateDisplay {
    fn from(cert: CertificateSummary) -> Self {
        Self {
            id: truncate_string(&cert.certificate_id, 20),
            status: cert
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            created: format_datetime(cert.creation_date),
        }
    }
}

/// Certificate provider display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProviderDisplay {
    /// Provider name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Provider ARN
    #[tabled(rename = "ARN")]
    pub arn: String,
}

impl From<CertificateProviderSummary> for ProviderDisplay {
    fn from(provider: CertificateProviderSummary) -> Self {
        Self {
            name: provider.certificate_provider_name,
            arn: display_opt(&provider.certificate_provider_arn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::CertificateBuilder;
    use crate::client::models::CertificateStatus;

    #[test]
    fn test_certificate_display() {
        let display = CertificateDisplay::from(
            CertificateBuilder::new("abcdef0123456789abcdef0123456789")
                .status(CertificateStatus::PendingTransfer)
                .build(),
        );

        assert_eq!(display.id.len(), 20);
        assert!(display.id.ends_with("..."));
        assert_eq!(display.status, "PENDING_TRANSFER");
        assert!(display.created.contains("2023"));
    }
}
