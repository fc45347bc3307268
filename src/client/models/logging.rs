//! Platform logging option models

use serde::{Deserialize, Serialize};

use super::string_enum;

string_enum! {
    /// Verbosity of platform-side logging
    LogLevel {
        Debug => "DEBUG",
        Info => "INFO",
        Warn => "WARN",
        Error => "ERROR",
        Disabled => "DISABLED",
    }
}

/// Account-wide logging options.
///
/// Doubles as the request body for updating them; both fields must be
/// present when submitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingOptions {
    /// Role the platform assumes to write logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,

    /// Log verbosity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

impl LoggingOptions {
    /// Create empty logging options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logging role ARN.
    pub fn role_arn(mut self, arn: impl Into<String>) -> Self {
        self.role_arn = Some(arn.into());
        self
    }

    /// Set the log level from either the enum or a raw token.
    pub fn log_level(mut self, level: impl Into<LogLevel>) -> Self {
        self.log_level = Some(level.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_enum_and_string_paths_converge() {
        let typed = LoggingOptions::new().log_level(LogLevel::Info);
        let raw = LoggingOptions::new().log_level("INFO");
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_logging_options_omit_absent_fields() {
        let options = LoggingOptions::new().log_level(LogLevel::Disabled);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("DISABLED"));
        assert!(!json.contains("roleArn"));
    }

    #[test]
    fn test_unknown_log_level_survives_round_trip() {
        let options: LoggingOptions =
            serde_json::from_str(r#"{"logLevel": "TRACE"}"#).unwrap();
        assert_eq!(options.log_level, Some(LogLevel::Other("TRACE".to_string())));
        assert!(serde_json::to_string(&options).unwrap().contains("TRACE"));
    }
}
