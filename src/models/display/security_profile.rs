//! Security profile display model

use serde::Serialize;
use tabled::Tabled;

use super::common::display_opt;
use crate::client::models::SecurityProfileSummary;

/// Security profile display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SecurityProfileDisplay {
    /// Profile name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Profile ARN
    #[tabled(rename = "ARN")]
    pub arn: String,
}

impl From<SecurityProfileSummary> for SecurityProfileDisplay {
    fn from(profile: SecurityProfileSummary) -> Self {
        Self {
            name: profile.security_profile_name,
            arn: display_opt(&profile.security_profile_arn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_display() {
        let display = SecurityProfileDisplay::from(SecurityProfileSummary {
            security_profile_name: "fleet-baseline".to_string(),
            security_profile_arn: None,
        });

        assert_eq!(display.name, "fleet-baseline");
        assert_eq!(display.arn, "-");
    }
}
