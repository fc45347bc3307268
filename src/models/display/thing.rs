//! Thing display model

use serde::Serialize;
use tabled::Tabled;

use super::common::display_opt;
use crate::client::models::ThingSummary;

/// Thing display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ThingDisplay {
    /// Thing name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Thing type
    #[tabled(rename = "TYPE")]
    pub thing_type: String,

    /// Registry version
    #[tabled(rename = "VERSION")]
    pub version: String,

    /// Attribute pairs, `key=value` comma-separated
    #[tabled(rename = "ATTRIBUTES")]
    pub attributes: String,
}

impl From<ThingSummary> for ThingDisplay {
    fn from(thing: ThingSummary) -> Self {
        let mut pairs: Vec<String> = thing
            .attributes
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        pairs.sort();

        Self {
            name: thing.thing_name,
            thing_type: display_opt(&thing.thing_type_name),
            version: thing
                .version
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            attributes: pairs.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::ThingBuilder;

    #[test]
    fn test_thing_display_from_summary() {
        let summary = ThingBuilder::new("front-door-42")
            .thing_type("door-sensor")
            .attribute("building", "hq")
            .build_summary();

        let display = ThingDisplay::from(summary);

        assert_eq!(display.name, "front-door-42");
        assert_eq!(display.thing_type, "door-sensor");
        assert_eq!(display.version, "1");
        assert_eq!(display.attributes, "building=hq");
    }

    #[test]
    fn test_thing_display_absent_fields_render_as_dash() {
        let summary = ThingSummary {
            thing_name: "bare".to_string(),
            thing_type_name: None,
            thing_arn: None,
            attributes: Default::default(),
            version: None,
        };

        let display = ThingDisplay::from(summary);
        assert_eq!(display.thing_type, "-");
        assert_eq!(display.version, "-");
        assert_eq!(display.attributes, "");
    }
}
