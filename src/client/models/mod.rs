//! Wire models for the Sentra platform API
//!
//! Every type here maps one-to-one onto a JSON object in the wire protocol.
//! Fields are optional unless the service guarantees them; absent fields are
//! omitted from the serialized form rather than emitted as `null`, and
//! absence is distinct from a zero value throughout. Documented length and
//! pattern constraints are advisory only and enforced server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod audit;
pub mod certificate;
pub mod logging;
pub mod mitigation;
pub mod policy;
pub mod security_profile;
pub mod thing;
pub mod violation;

pub use audit::{
    AuditCheckDetails, AuditCheckRunStatus, AuditFinding, AuditFindingFilterParams,
    AuditFindingSeverity, AuditSuppression, AuditSuppressionFilterParams, AuditTaskDescription,
    AuditTaskFilterParams, AuditTaskStatistics, AuditTaskStatus, AuditTaskSummary, AuditTaskType,
    CreateAuditSuppressionRequest, NonCompliantResource, PolicyVersionIdentifier, RelatedResource,
    ResourceIdentifier, ResourceType, StartAuditTaskRequest, StartedAuditTask,
};
pub use certificate::{
    CertificateDescription, CertificateProvider, CertificateProviderSummary, CertificateStatus,
    CertificateSummary, TransferData,
};
pub use logging::{LogLevel, LoggingOptions};
pub use mitigation::{
    AddThingsToThingGroupParams, CertificateAction, CreateMitigationActionRequest,
    CreatedMitigationAction, EnableLoggingParams, MitigationAction, MitigationActionFilterParams,
    MitigationActionParams, MitigationActionSummary, MitigationActionType,
    PolicyTemplateName, PublishFindingToTopicParams, ReplaceDefaultPolicyVersionParams,
    UpdateCaCertificateParams, UpdateDeviceCertificateParams,
};
pub use policy::{CreatePolicyRequest, Policy, PolicySummary};
pub use security_profile::{
    AlertTarget, AlertTargetType, Behavior, BehaviorCriteria, ComparisonOperator,
    CreateSecurityProfileRequest, MetricValue, SecurityProfileDescription, SecurityProfileSummary,
    StatisticalThreshold, UpdateSecurityProfileRequest,
};
pub use thing::{
    CreateThingRequest, CreatedThing, ThingDescription, ThingFilterParams, ThingSummary,
    UpdateThingRequest,
};
pub use violation::{
    ActiveViolation, ViolationEvent, ViolationEventFilterParams, ViolationEventType,
    ViolationFilterParams,
};

/// Errors originating in the model layer itself.
///
/// The only client-side validation these types perform is unique-key
/// enforcement on map fields; everything else is left to the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A single-entry insert hit a key already present in the map field
    #[error("Duplicate key in map field: {0}")]
    DuplicateKey(String),
}

/// Session token returned by the auth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// The JWT token string
    pub token: String,

    /// Token expiration time
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

/// Key/value metadata pair attached to created resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag key
    pub key: String,

    /// Tag value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Serde helpers for wire timestamps.
///
/// The service emits timestamps as epoch seconds, epoch milliseconds, or an
/// RFC 3339 string depending on the endpoint generation. Deserialization
/// accepts all three; serialization always writes RFC 3339.
pub(crate) mod wire_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    // Epoch values past this point can only be milliseconds.
    const MILLIS_CUTOVER: i64 = 100_000_000_000;

    fn from_raw(raw: RawTimestamp) -> Option<DateTime<Utc>> {
        match raw {
            RawTimestamp::Integer(n) if n >= MILLIS_CUTOVER => DateTime::from_timestamp_millis(n),
            RawTimestamp::Integer(n) => DateTime::from_timestamp(n, 0),
            RawTimestamp::Float(f) => DateTime::from_timestamp_millis((f * 1000.0) as i64),
            RawTimestamp::Text(s) => s.parse::<DateTime<Utc>>().ok(),
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
        Ok(raw.and_then(from_raw))
    }
}

/// Defines an enum over a closed set of wire tokens.
///
/// Generates `as_str`, `Display`, and total conversions from raw strings so
/// that the typed and raw-string paths converge on the same representation.
/// Tokens the service adds after this client was built land in `Other` and
/// survive a round-trip verbatim.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Token not known to this client version, preserved verbatim
            Other(String),
        }

        impl $name {
            /// The exact wire token for this value
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Other(s) => s.as_str(),
                }
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $($token => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl ::std::convert::From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
pub(crate) use string_enum;

#[cfg(test)]
mod tests {
    use super::*;

    string_enum! {
        /// Test-only token set
        Flavor {
            Sweet => "SWEET",
            Sour => "SOUR",
        }
    }

    #[test]
    fn test_string_enum_round_trip() {
        assert_eq!(Flavor::from("SWEET"), Flavor::Sweet);
        assert_eq!(Flavor::Sour.as_str(), "SOUR");
        assert_eq!(Flavor::Sweet.to_string(), "SWEET");
    }

    #[test]
    fn test_string_enum_preserves_unknown_tokens() {
        let unknown = Flavor::from("UMAMI");
        assert_eq!(unknown, Flavor::Other("UMAMI".to_string()));
        assert_eq!(unknown.as_str(), "UMAMI");

        let json = serde_json::to_string(&unknown).unwrap();
        assert_eq!(json, "\"UMAMI\"");
        let back: Flavor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unknown);
    }

    #[test]
    fn test_string_enum_serializes_as_token() {
        let json = serde_json::to_string(&Flavor::Sweet).unwrap();
        assert_eq!(json, "\"SWEET\"");
        let back: Flavor = serde_json::from_str("\"SOUR\"").unwrap();
        assert_eq!(back, Flavor::Sour);
    }

    #[test]
    fn test_duplicate_key_error_names_key() {
        let err = ModelError::DuplicateKey("firmwareVersion".to_string());
        assert!(err.to_string().contains("firmwareVersion"));
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Stamped {
        #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
        at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[test]
    fn test_wire_time_accepts_epoch_seconds() {
        let stamped: Stamped = serde_json::from_str(r#"{"at": 1700000000}"#).unwrap();
        assert_eq!(stamped.at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_wire_time_accepts_epoch_millis() {
        let stamped: Stamped = serde_json::from_str(r#"{"at": 1700000000000}"#).unwrap();
        assert_eq!(stamped.at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_wire_time_accepts_rfc3339() {
        let stamped: Stamped = serde_json::from_str(r#"{"at": "2023-11-14T22:13:20Z"}"#).unwrap();
        assert_eq!(stamped.at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_wire_time_absent_is_omitted() {
        let stamped = Stamped { at: None };
        assert_eq!(serde_json::to_string(&stamped).unwrap(), "{}");
    }
}
