//! Mitigation action display model

use serde::Serialize;
use tabled::Tabled;

use super::common::display_opt;
use crate::client::models::MitigationActionSummary;
use crate::output::formatters::format_datetime;

/// Mitigation action display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MitigationActionDisplay {
    /// Action name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Action ARN
    #[tabled(rename = "ARN")]
    pub arn: String,

    /// Creation date
    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<MitigationActionSummary> for MitigationActionDisplay {
    fn from(action: MitigationActionSummary) -> Self {
        Self {
            name: action.action_name,
            arn: display_opt(&action.action_arn),
            created: format_datetime(action.creation_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mitigation_display() {
        let display = MitigationActionDisplay::from(MitigationActionSummary {
            action_name: "deactivate-cert".to_string(),
            action_arn: Some("arn:sentra:action/deactivate-cert".to_string()),
            creation_date: None,
        });

        assert_eq!(display.name, "deactivate-cert");
        assert_eq!(display.created, "-");
    }
}
