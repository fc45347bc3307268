//! Device Defender violation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::security_profile::{Behavior, MetricValue};
use super::{string_enum, wire_time};

string_enum! {
    /// What happened to a behavior alarm
    ViolationEventType {
        InAlarm => "in-alarm",
        AlarmCleared => "alarm-cleared",
        AlarmInvalidated => "alarm-invalidated",
    }
}

/// A behavior violation that is still in alarm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveViolation {
    /// Violation ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_id: Option<String>,

    /// Device in violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_name: Option<String>,

    /// Profile whose behavior is violated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_name: Option<String>,

    /// The violated behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<Behavior>,

    /// Most recent metric value observed in violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_violation_value: Option<MetricValue>,

    /// When the most recent violating datapoint arrived
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub last_violation_time: Option<DateTime<Utc>>,

    /// When the violation entered alarm
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub violation_start_time: Option<DateTime<Utc>>,
}

/// A historical violation event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationEvent {
    /// Violation ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_id: Option<String>,

    /// Device in violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_name: Option<String>,

    /// Profile whose behavior was violated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profile_name: Option<String>,

    /// The violated behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<Behavior>,

    /// Metric value that triggered the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<MetricValue>,

    /// What happened to the alarm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_event_type: Option<ViolationEventType>,

    /// When the event occurred
    #[serde(default, with = "wire_time", skip_serializing_if = "Option::is_none")]
    pub violation_event_time: Option<DateTime<Utc>>,
}

/// Filter parameters for active violation listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolationFilterParams {
    /// Only violations for this device
    pub thing_name: Option<String>,
    /// Only violations for this profile
    pub security_profile_name: Option<String>,
}

impl ViolationFilterParams {
    /// Create empty filter params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(ref thing) = self.thing_name {
            params.push(("thingName", thing.clone()));
        }
        if let Some(ref profile) = self.security_profile_name {
            params.push(("securityProfileName", profile.clone()));
        }

        params
    }
}

/// Filter parameters for violation event listings.
///
/// The time window is required by the service; everything else narrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationEventFilterParams {
    /// Window start (inclusive)
    pub start_time: DateTime<Utc>,
    /// Window end (inclusive)
    pub end_time: DateTime<Utc>,
    /// Only events for this device
    pub thing_name: Option<String>,
    /// Only events for this profile
    pub security_profile_name: Option<String>,
}

impl ViolationEventFilterParams {
    /// Create params covering the given time window.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            thing_name: None,
            security_profile_name: None,
        }
    }

    /// Restrict to one device.
    pub fn thing_name(mut self, name: impl Into<String>) -> Self {
        self.thing_name = Some(name.into());
        self
    }

    /// Restrict to one profile.
    pub fn security_profile_name(mut self, name: impl Into<String>) -> Self {
        self.security_profile_name = Some(name.into());
        self
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("startTime", self.start_time.timestamp().to_string()),
            ("endTime", self.end_time.timestamp().to_string()),
        ];

        if let Some(ref thing) = self.thing_name {
            params.push(("thingName", thing.clone()));
        }
        if let Some(ref profile) = self.security_profile_name {
            params.push(("securityProfileName", profile.clone()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_event_round_trip() {
        let event: ViolationEvent = serde_json::from_str(
            r#"{
                "violationId": "v-123",
                "thingName": "front-door-42",
                "securityProfileName": "fleet-baseline",
                "violationEventType": "in-alarm",
                "metricValue": {"count": 250},
                "violationEventTime": 1700000000000
            }"#,
        )
        .unwrap();

        assert_eq!(event.violation_event_type, Some(ViolationEventType::InAlarm));
        assert_eq!(event.metric_value.as_ref().unwrap().count, Some(250));
        assert_eq!(
            event.violation_event_time.unwrap().timestamp(),
            1_700_000_000
        );
        assert!(event.behavior.is_none());
    }

    #[test]
    fn test_unknown_event_type_preserved() {
        let event: ViolationEvent =
            serde_json::from_str(r#"{"violationEventType": "alarm-acknowledged"}"#).unwrap();
        assert_eq!(
            event.violation_event_type,
            Some(ViolationEventType::Other("alarm-acknowledged".to_string()))
        );
    }

    #[test]
    fn test_event_filter_query_includes_window() {
        let params = ViolationEventFilterParams::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            DateTime::from_timestamp(1_700_086_400, 0).unwrap(),
        )
        .thing_name("front-door-42");

        let query = params.to_query_params();
        assert!(query.contains(&("startTime", "1700000000".to_string())));
        assert!(query.contains(&("endTime", "1700086400".to_string())));
        assert!(query.contains(&("thingName", "front-door-42".to_string())));
    }
}
