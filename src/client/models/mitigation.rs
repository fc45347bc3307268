//! Mitigation action models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::logging::LogLevel;
use super::{Tag, string_enum, wire_time};

string_enum! {
    /// Kind of remediation a mitigation action performs
    MitigationActionType {
        UpdateDeviceCertificate => "UPDATE_DEVICE_CERTIFICATE",
        UpdateCaCertificate => "UPDATE_CA_CERTIFICATE",
        AddThingsToThingGroup => "ADD_THINGS_TO_THING_GROUP",
        ReplaceDefaultPolicyVersion => "REPLACE_DEFAULT_POLICY_VERSION",
        EnableLogging => "ENABLE_LOGGING",
        PublishFindingToTopic => "PUBLISH_FINDING_TO_TOPIC",
    }
}

string_enum! {
    /// The only action applicable to a certificate
    CertificateAction {
        Deactivate => "DEACTIVATE",
    }
}

string_enum! {
    /// The only template usable when replacing a policy version
    PolicyTemplateName {
        BlankPolicy => "BLANK_POLICY",
    }
}

/// Parameters for deactivating a device certificate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceCertificateParams {
    /// Action to apply; only `DEACTIVATE` is supported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CertificateAction>,
}

/// Parameters for deactivating a CA certificate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaCertificateParams {
    /// Action to apply; only `DEACTIVATE` is supported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CertificateAction>,
}

/// Parameters for moving non-compliant things into quarantine groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddThingsToThingGroupParams {
    /// Groups to add the things to (at most 10)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thing_group_names: Vec<String>,

    /// Allow adding even when dynamic group membership would conflict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_dynamic_groups: Option<bool>,
}

/// Parameters for replacing a policy's default version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceDefaultPolicyVersionParams {
    /// Template for the replacement version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<PolicyTemplateName>,
}

/// Parameters for turning on platform logging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableLoggingParams {
    /// Role the platform assumes to write logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn_for_logging: Option<String>,

    /// Verbosity to enable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

/// Parameters for publishing findings to a notification topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishFindingToTopicParams {
    /// Topic the finding summary is published to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,
}

/// The parameter block of a mitigation action.
///
/// Exactly one sub-block is populated; it determines the action type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationActionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_device_certificate_params: Option<UpdateDeviceCertificateParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_ca_certificate_params: Option<UpdateCaCertificateParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_things_to_thing_group_params: Option<AddThingsToThingGroupParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_default_policy_version_params: Option<ReplaceDefaultPolicyVersionParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_logging_params: Option<EnableLoggingParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_finding_to_topic_params: Option<PublishFindingToTopicParams>,
}

impl MitigationActionParams {
    /// The action type implied by whichever sub-block is populated.
    pub fn action_type(&self) -> Option<MitigationActionType> {
        if self.update_device_certificate_params.is_some() {
            Some(MitigationActionType::UpdateDeviceCertificate)
        } else if self.update_ca_certificate_params.is_some() {
            Some(MitigationActionType::UpdateCaCertificate)
        } else if self.add_things_to_thing_group_params.is_some() {
            Some(MitigationActionType::AddThingsToThingGroup)
        } else if self.replace_default_policy_version_params.is_some() {
            Some(MitigationActionType::ReplaceDefaultPolicyVersion)
        } else if self.enable_logging_params.is_some() {
            Some(MitigationActionType::EnableLogging)
        } else if self.publish_finding_to_topic_params.is_some() {
            Some(MitigationActionType::PublishFindingToTopic)
        } else {
            None
        }
    }
}

/// Full mitigation action description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationAction {
    /// Action name
    #[serde(default)]
    pub action_name: String,

    /// Service-assigned action ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,

    /// Action ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_arn: Option<String>,

    /// Role the platform assumes to apply the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,

    /// The action's parameter block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_params: Option<MitigationActionParams>,

    /// When the action was created
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    /// Last action update
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Mitigation action summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationActionSummary {
    /// Action name
    #[serde(default)]
    pub action_name: String,

    /// Action ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_arn: Option<String>,

    /// When the action was created
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Response from creating a mitigation action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMitigationAction {
    /// Action ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_arn: Option<String>,

    /// Service-assigned action ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

/// Request body for creating a mitigation action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMitigationActionRequest {
    /// Action name, unique within the account
    pub action_name: String,

    /// Role the platform assumes to apply the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,

    /// The action's parameter block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_params: Option<MitigationActionParams>,

    /// Metadata tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CreateMitigationActionRequest {
    /// Create a request for the given action name.
    pub fn new(action_name: impl Into<String>) -> Self {
        Self {
            action_name: action_name.into(),
            ..Self::default()
        }
    }

    /// Set the execution role.
    pub fn role_arn(mut self, arn: impl Into<String>) -> Self {
        self.role_arn = Some(arn.into());
        self
    }

    /// Set the parameter block.
    pub fn action_params(mut self, params: MitigationActionParams) -> Self {
        self.action_params = Some(params);
        self
    }
}

/// Filter parameters for mitigation action listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MitigationActionFilterParams {
    /// Only actions of this type
    pub action_type: Option<MitigationActionType>,
}

impl MitigationActionFilterParams {
    /// Create empty filter params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref action_type) = self.action_type {
            params.push(("actionType", action_type.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_follows_populated_block() {
        let params = MitigationActionParams {
            add_things_to_thing_group_params: Some(AddThingsToThingGroupParams {
                thing_group_names: vec!["quarantine".to_string()],
                override_dynamic_groups: Some(true),
            }),
            ..MitigationActionParams::default()
        };

        assert_eq!(
            params.action_type(),
            Some(MitigationActionType::AddThingsToThingGroup)
        );
        assert_eq!(MitigationActionParams::default().action_type(), None);
    }

    #[test]
    fn test_create_request_serialization_omits_empty_blocks() {
        let request = CreateMitigationActionRequest::new("deactivate-cert")
            .role_arn("arn:sentra:role/mitigation")
            .action_params(MitigationActionParams {
                update_device_certificate_params: Some(UpdateDeviceCertificateParams {
                    action: Some(CertificateAction::Deactivate),
                }),
                ..MitigationActionParams::default()
            });

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("updateDeviceCertificateParams"));
        assert!(json.contains("DEACTIVATE"));
        assert!(!json.contains("enableLoggingParams"));
        assert!(!json.contains("tags"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_mitigation_action_round_trip() {
        let action: MitigationAction = serde_json::from_str(
            r#"{
                "actionName": "enable-audit-logging",
                "actionId": "ma-1",
                "roleArn": "arn:sentra:role/mitigation",
                "actionParams": {
                    "enableLoggingParams": {"roleArnForLogging": "arn:sentra:role/logs", "logLevel": "INFO"}
                },
                "creationDate": 1700000000
            }"#,
        )
        .unwrap();

        let params = action.action_params.as_ref().unwrap();
        assert_eq!(params.action_type(), Some(MitigationActionType::EnableLogging));
        assert_eq!(
            params.enable_logging_params.as_ref().unwrap().log_level,
            Some(LogLevel::Info)
        );
        assert_eq!(action.creation_date.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_filter_params_query() {
        let params = MitigationActionFilterParams {
            action_type: Some(MitigationActionType::EnableLogging),
        };
        assert_eq!(
            params.to_query_params(),
            vec![("actionType", "ENABLE_LOGGING".to_string())]
        );
    }
}
