//! Certificate and certificate provider models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{string_enum, wire_time};

string_enum! {
    /// Lifecycle status of a device certificate
    CertificateStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Revoked => "REVOKED",
        PendingTransfer => "PENDING_TRANSFER",
        PendingActivation => "PENDING_ACTIVATION",
        RegisterInactive => "REGISTER_INACTIVE",
    }
}

/// Certificate summary row returned by the certificate listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    /// Certificate ID (64 hex characters)
    #[serde(default)]
    pub certificate_id: String,

    /// Certificate ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_arn: Option<String>,

    /// Lifecycle status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CertificateStatus>,

    /// When the certificate was registered
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Full certificate description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDescription {
    /// Certificate ID
    #[serde(default)]
    pub certificate_id: String,

    /// Certificate ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_arn: Option<String>,

    /// Lifecycle status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CertificateStatus>,

    /// PEM-encoded certificate body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_pem: Option<String>,

    /// Account that owns the certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,

    /// Previous owner, set while a transfer is pending or after acceptance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_owned_by: Option<String>,

    /// ID of the CA certificate that signed this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate_id: Option<String>,

    /// When the certificate was registered
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    /// Last status change
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,

    /// Transfer details when the certificate is mid-transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_data: Option<TransferData>,
}

/// Details of an in-flight or completed certificate transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferData {
    /// Message from the transferring account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_message: Option<String>,

    /// Reason the target account rejected the transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,

    /// When the transfer was initiated
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub transfer_date: Option<DateTime<Utc>>,

    /// When the transfer was accepted
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub accept_date: Option<DateTime<Utc>>,

    /// When the transfer was rejected
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub reject_date: Option<DateTime<Utc>>,
}

/// Certificate provider summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProviderSummary {
    /// Provider name
    #[serde(default)]
    pub certificate_provider_name: String,

    /// Provider ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_provider_arn: Option<String>,
}

/// Full certificate provider description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProvider {
    /// Provider name
    #[serde(default)]
    pub certificate_provider_name: String,

    /// Provider ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_provider_arn: Option<String>,

    /// ARN of the function invoked to issue certificates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_function_arn: Option<String>,

    /// Operations this provider is the account default for.
    /// Currently the only legal value is `CREATE_CERTIFICATE_FROM_CSR`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub account_default_for_operations: Vec<String>,

    /// When the provider was created
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    /// Last provider update
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_status_tokens() {
        assert_eq!(CertificateStatus::from("ACTIVE"), CertificateStatus::Active);
        assert_eq!(
            CertificateStatus::PendingTransfer.as_str(),
            "PENDING_TRANSFER"
        );
        assert_eq!(
            CertificateStatus::from("QUARANTINED"),
            CertificateStatus::Other("QUARANTINED".to_string())
        );
    }

    #[test]
    fn test_certificate_description_deserializes_epoch_dates() {
        let description: CertificateDescription = serde_json::from_str(
            r#"{
                "certificateId": "ab12",
                "status": "ACTIVE",
                "creationDate": 1700000000,
                "transferData": {"transferMessage": "handing over", "transferDate": 1700000100000}
            }"#,
        )
        .unwrap();

        assert_eq!(description.status, Some(CertificateStatus::Active));
        assert_eq!(description.creation_date.unwrap().timestamp(), 1_700_000_000);
        let transfer = description.transfer_data.unwrap();
        assert_eq!(transfer.transfer_message.as_deref(), Some("handing over"));
        assert_eq!(transfer.transfer_date.unwrap().timestamp(), 1_700_000_100);
        assert!(transfer.reject_reason.is_none());
    }

    #[test]
    fn test_certificate_summary_omits_absent_fields() {
        let summary = CertificateSummary {
            certificate_id: "ab12".to_string(),
            certificate_arn: None,
            status: Some(CertificateStatus::Inactive),
            creation_date: None,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("certificateId"));
        assert!(json.contains("INACTIVE"));
        assert!(!json.contains("certificateArn"));
        assert!(!json.contains("creationDate"));
    }
}
