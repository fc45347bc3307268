//! Violation display models

use serde::Serialize;
use tabled::Tabled;

use super::common::display_opt;
use crate::client::models::{ActiveViolation, ViolationEvent};
use crate::output::formatters::format_datetime;

/// Active violation display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ViolationDisplay {
    /// Violation ID
    #[tabled(rename = "VIOLATION ID")]
    pub id: String,

    /// Violating thing
    #[tabled(rename = "THING")]
    pub thing: String,

    /// Security profile
    #[tabled(rename = "PROFILE")]
    pub profile: String,

    /// Violated behavior
    #[tabled(rename = "BEHAVIOR")]
    pub behavior: String,

    /// When the violation entered alarm
    #[tabled(rename = "SINCE")]
    pub since: String,
}

impl From<ActiveViolation> for ViolationDisplay {
    fn from(violation: ActiveViolation) -> Self {
        Self {
            id: display_opt(&violation.violation_id),
            thing: display_opt(&violation.thing_name),
            profile: display_opt(&violation.security_profile_name),
            behavior: violation
                .behavior
                .map(|b| b.name)
                .unwrap_or_else(|| "-".to_string()),
            since: format_datetime(violation.violation_start_time),
        }
    }
}

/// Violation event display model.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ViolationEventDisplay {
    /// Violation ID
    #[tabled(rename = "VIOLATION ID")]
    pub id: String,

    /// Violating thing
    #[tabled(rename = "THING")]
    pub thing: String,

    /// What happened to the alarm
    #[tabled(rename = "EVENT")]
    pub event: String,

    /// When the event occurred
    #[tabled(rename = "TIME")]
    pub time: String,
}

impl From<ViolationEvent> for ViolationEventDisplay {
    fn from(event: ViolationEvent) -> Self {
        Self {
            id: display_opt(&event.violation_id),
            thing: display_opt(&event.thing_name),
            event: event
                .violation_event_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            time: format_datetime(event.violation_event_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::ActiveViolationBuilder;

    #[test]
    fn test_violation_display() {
        let display = ViolationDisplay::from(
            ActiveViolationBuilder::new("v-1").thing_name("hallway-7").build(),
        );

        assert_eq!(display.id, "v-1");
        assert_eq!(display.thing, "hallway-7");
        assert_eq!(display.behavior, "excessive-messages");
        assert!(display.since.contains("2023"));
    }
}
