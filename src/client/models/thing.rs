//! Thing registry models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Thing summary row returned by the registry listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingSummary {
    /// Thing name
    #[serde(default)]
    pub thing_name: String,

    /// Thing type, if one is assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_type_name: Option<String>,

    /// Thing ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_arn: Option<String>,

    /// Attribute name/value pairs
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Registry version, incremented on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Full thing description from the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingDescription {
    /// Thing name
    #[serde(default)]
    pub thing_name: String,

    /// Service-assigned thing ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_id: Option<String>,

    /// Thing ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_arn: Option<String>,

    /// Thing type, if one is assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_type_name: Option<String>,

    /// Default MQTT client ID for the thing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_client_id: Option<String>,

    /// Attribute name/value pairs
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Registry version, incremented on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    /// Billing group the thing belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_group_name: Option<String>,
}

/// Response from creating a thing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedThing {
    /// Thing name
    #[serde(default)]
    pub thing_name: String,

    /// Thing ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_arn: Option<String>,

    /// Service-assigned thing ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_id: Option<String>,
}

/// Request body for creating a thing.
///
/// Thing names are 1-128 characters of `[a-zA-Z0-9:_-]`; attribute values
/// are limited to 800 bytes total per thing. Both limits are enforced by the
/// service, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThingRequest {
    /// Thing name
    pub thing_name: String,

    /// Thing type to assign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_type_name: Option<String>,

    /// Initial attribute name/value pairs (unique keys)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Billing group to add the thing to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_group_name: Option<String>,
}

impl CreateThingRequest {
    /// Create a request for the given thing name.
    pub fn new(thing_name: impl Into<String>) -> Self {
        Self {
            thing_name: thing_name.into(),
            ..Self::default()
        }
    }

    /// Set the thing type.
    pub fn thing_type_name(mut self, name: impl Into<String>) -> Self {
        self.thing_type_name = Some(name.into());
        self
    }

    /// Set the billing group.
    pub fn billing_group_name(mut self, name: impl Into<String>) -> Self {
        self.billing_group_name = Some(name.into());
        self
    }

    /// Insert a single attribute, rejecting duplicate keys.
    pub fn attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let key = key.into();
        if self.attributes.contains_key(&key) {
            return Err(ModelError::DuplicateKey(key));
        }
        self.attributes.insert(key, value.into());
        Ok(self)
    }

    /// Replace the whole attribute map.
    pub fn attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Remove all attributes.
    pub fn clear_attributes(mut self) -> Self {
        self.attributes.clear();
        self
    }
}

/// Request body for updating a thing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThingRequest {
    /// Thing type to assign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thing_type_name: Option<String>,

    /// Attribute name/value pairs to apply (unique keys)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Merge attributes into the existing map instead of replacing it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge: Option<bool>,

    /// Detach the current thing type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_thing_type: Option<bool>,

    /// Fail the update unless the registry version matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<i64>,
}

impl UpdateThingRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thing type.
    pub fn thing_type_name(mut self, name: impl Into<String>) -> Self {
        self.thing_type_name = Some(name.into());
        self
    }

    /// Insert a single attribute, rejecting duplicate keys.
    pub fn attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let key = key.into();
        if self.attributes.contains_key(&key) {
            return Err(ModelError::DuplicateKey(key));
        }
        self.attributes.insert(key, value.into());
        Ok(self)
    }

    /// Replace the whole attribute map.
    pub fn attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Merge attributes instead of replacing.
    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Guard the update on an expected registry version.
    pub fn expected_version(mut self, version: i64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Filter parameters for thing listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThingFilterParams {
    /// Restrict to things of this type
    pub thing_type_name: Option<String>,
    /// Attribute name to match
    pub attribute_name: Option<String>,
    /// Attribute value to match (requires `attribute_name`)
    pub attribute_value: Option<String>,
}

impl ThingFilterParams {
    /// Create empty filter params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to query parameters for the API.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(ref name) = self.thing_type_name {
            params.push(("thingTypeName", name.clone()));
        }
        if let Some(ref name) = self.attribute_name {
            params.push(("attributeName", name.clone()));
        }
        if let Some(ref value) = self.attribute_value {
            params.push(("attributeValue", value.clone()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_thing_round_trip() {
        let request = CreateThingRequest::new("front-door-42")
            .thing_type_name("door-sensor")
            .attribute("firmwareVersion", "2.1.0")
            .unwrap();

        assert_eq!(request.thing_name, "front-door-42");
        assert_eq!(request.thing_type_name.as_deref(), Some("door-sensor"));
        assert_eq!(
            request.attributes.get("firmwareVersion").map(String::as_str),
            Some("2.1.0")
        );
        assert!(request.billing_group_name.is_none());
    }

    #[test]
    fn test_create_thing_rejects_duplicate_attribute() {
        let result = CreateThingRequest::new("front-door-42")
            .attribute("serialNumber", "SN-001")
            .unwrap()
            .attribute("serialNumber", "SN-002");

        assert_eq!(
            result.unwrap_err(),
            ModelError::DuplicateKey("serialNumber".to_string())
        );
    }

    #[test]
    fn test_create_thing_bulk_replace_and_clear() {
        let mut attrs = HashMap::new();
        attrs.insert("a".to_string(), "1".to_string());
        attrs.insert("b".to_string(), "2".to_string());

        let request = CreateThingRequest::new("t").attributes(attrs);
        assert_eq!(request.attributes.len(), 2);

        // bulk replace never fails, even when keys were present before
        let request = request.attribute("c", "3").unwrap().clear_attributes();
        assert!(request.attributes.is_empty());
    }

    #[test]
    fn test_create_thing_serialization_omits_absent_fields() {
        let request = CreateThingRequest::new("front-door-42");
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("thingName"));
        assert!(!json.contains("thingTypeName"));
        assert!(!json.contains("attributes"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_thing_description_absence_distinct_from_zero() {
        let description: ThingDescription = serde_json::from_str(
            r#"{"thingName": "front-door-42", "version": 0}"#,
        )
        .unwrap();

        assert_eq!(description.version, Some(0));
        assert!(description.thing_id.is_none());
        assert!(description.attributes.is_empty());
    }

    #[test]
    fn test_thing_description_equality_is_field_sensitive() {
        let base: ThingDescription =
            serde_json::from_str(r#"{"thingName": "a", "version": 3}"#).unwrap();
        let same: ThingDescription =
            serde_json::from_str(r#"{"thingName": "a", "version": 3}"#).unwrap();
        let bumped: ThingDescription =
            serde_json::from_str(r#"{"thingName": "a", "version": 4}"#).unwrap();

        assert_eq!(base, base);
        assert_eq!(base == same, same == base);
        assert_ne!(base, bumped);
    }

    #[test]
    fn test_thing_filter_params_query() {
        let params = ThingFilterParams {
            thing_type_name: Some("door-sensor".to_string()),
            attribute_name: Some("building".to_string()),
            attribute_value: Some("hq".to_string()),
        };

        let query = params.to_query_params();
        assert_eq!(query.len(), 3);
        assert!(query.contains(&("thingTypeName", "door-sensor".to_string())));
        assert!(query.contains(&("attributeName", "building".to_string())));
        assert!(query.contains(&("attributeValue", "hq".to_string())));
    }
}
