//! Filter argument types for CLI commands

use chrono::{DateTime, Duration, Utc};
use clap::Args;

use crate::client::models::{
    AuditFindingFilterParams, AuditSuppressionFilterParams, AuditTaskFilterParams,
    MitigationActionFilterParams, ThingFilterParams, ViolationEventFilterParams,
    ViolationFilterParams,
};
use crate::error::{Error, Result};

/// Parse a time argument: RFC 3339, `YYYY-MM-DD`, or relative (`7d`, `24h`, `30m`).
pub fn parse_time_arg(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = value.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(midnight.and_utc());
    }

    // Relative offsets count back from now
    if let Some(number) = value
        .strip_suffix(['d', 'h', 'm'])
        .and_then(|n| n.parse::<i64>().ok())
    {
        let duration = match value.chars().last() {
            Some('d') => Duration::days(number),
            Some('h') => Duration::hours(number),
            _ => Duration::minutes(number),
        };
        return Ok(Utc::now() - duration);
    }

    Err(Error::Other(format!(
        "Invalid time '{}': use RFC 3339, YYYY-MM-DD, or relative (7d, 24h, 30m)",
        value
    )))
}

/// Filter arguments for thing list command.
#[derive(Args, Debug, Default, Clone)]
pub struct ThingFilterArgs {
    /// Filter by thing type
    #[arg(long = "type", short = 't')]
    pub thing_type: Option<String>,

    /// Filter by attribute, as name=value
    #[arg(long, short = 'a', value_name = "NAME=VALUE")]
    pub attribute: Option<String>,
}

impl ThingFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> Result<ThingFilterParams> {
        let mut params = ThingFilterParams {
            thing_type_name: self.thing_type.clone(),
            ..ThingFilterParams::default()
        };

        if let Some(ref attribute) = self.attribute {
            let (name, value) = attribute.split_once('=').ok_or_else(|| {
                Error::Other(format!("Invalid attribute filter '{}': use name=value", attribute))
            })?;
            params.attribute_name = Some(name.to_string());
            params.attribute_value = Some(value.to_string());
        }

        Ok(params)
    }
}

/// Filter arguments for audit task list command.
#[derive(Args, Debug, Default, Clone)]
pub struct AuditTaskFilterArgs {
    /// Filter by task status (IN_PROGRESS, COMPLETED, FAILED, CANCELED)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Filter by task type (ON_DEMAND_AUDIT_TASK, SCHEDULED_AUDIT_TASK)
    #[arg(long = "type", short = 't')]
    pub task_type: Option<String>,

    /// Start of the time window (RFC 3339 or relative: 7d, 24h)
    #[arg(long)]
    pub since: Option<String>,

    /// End of the time window (RFC 3339 or relative: 7d, 24h)
    #[arg(long)]
    pub until: Option<String>,
}

impl AuditTaskFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> Result<AuditTaskFilterParams> {
        Ok(AuditTaskFilterParams {
            start_time: self.since.as_deref().map(parse_time_arg).transpose()?,
            end_time: self.until.as_deref().map(parse_time_arg).transpose()?,
            task_type: self.task_type.as_deref().map(Into::into),
            task_status: self.status.as_deref().map(Into::into),
        })
    }
}

/// Filter arguments for audit finding list command.
#[derive(Args, Debug, Default, Clone)]
pub struct FindingFilterArgs {
    /// Filter by check name
    #[arg(long, short = 'c')]
    pub check: Option<String>,

    /// Filter by audit task ID
    #[arg(long, short = 't')]
    pub task: Option<String>,

    /// Start of the time window (RFC 3339 or relative: 7d, 24h)
    #[arg(long)]
    pub since: Option<String>,

    /// End of the time window (RFC 3339 or relative: 7d, 24h)
    #[arg(long)]
    pub until: Option<String>,

    /// Include findings hidden by suppressions
    #[arg(long)]
    pub include_suppressed: bool,
}

impl FindingFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> Result<AuditFindingFilterParams> {
        Ok(AuditFindingFilterParams {
            task_id: self.task.clone(),
            check_name: self.check.clone(),
            start_time: self.since.as_deref().map(parse_time_arg).transpose()?,
            end_time: self.until.as_deref().map(parse_time_arg).transpose()?,
            list_suppressed_findings: self.include_suppressed.then_some(true),
        })
    }
}

/// Filter arguments for audit suppression list command.
#[derive(Args, Debug, Default, Clone)]
pub struct SuppressionFilterArgs {
    /// Filter by check name
    #[arg(long, short = 'c')]
    pub check: Option<String>,
}

impl SuppressionFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> AuditSuppressionFilterParams {
        AuditSuppressionFilterParams {
            check_name: self.check.clone(),
        }
    }
}

/// Filter arguments for active violation list command.
#[derive(Args, Debug, Default, Clone)]
pub struct ViolationFilterArgs {
    /// Filter by thing name
    #[arg(long, short = 't')]
    pub thing: Option<String>,

    /// Filter by security profile name
    #[arg(long, short = 'p')]
    pub profile: Option<String>,
}

impl ViolationFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> ViolationFilterParams {
        ViolationFilterParams {
            thing_name: self.thing.clone(),
            security_profile_name: self.profile.clone(),
        }
    }
}

/// Filter arguments for violation event list command.
#[derive(Args, Debug, Clone)]
pub struct EventFilterArgs {
    /// Start of the time window (RFC 3339 or relative: 7d, 24h)
    #[arg(long, default_value = "24h")]
    pub since: String,

    /// End of the time window (RFC 3339 or relative: 7d, 24h)
    #[arg(long)]
    pub until: Option<String>,

    /// Filter by thing name
    #[arg(long, short = 't')]
    pub thing: Option<String>,

    /// Filter by security profile name
    #[arg(long, short = 'p')]
    pub profile: Option<String>,
}

impl EventFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> Result<ViolationEventFilterParams> {
        let start = parse_time_arg(&self.since)?;
        let end = match self.until {
            Some(ref until) => parse_time_arg(until)?,
            None => Utc::now(),
        };

        let mut params = ViolationEventFilterParams::new(start, end);
        if let Some(ref thing) = self.thing {
            params = params.thing_name(thing);
        }
        if let Some(ref profile) = self.profile {
            params = params.security_profile_name(profile);
        }
        Ok(params)
    }
}

/// Filter arguments for mitigation action list command.
#[derive(Args, Debug, Default, Clone)]
pub struct MitigationFilterArgs {
    /// Filter by action type (e.g. UPDATE_DEVICE_CERTIFICATE)
    #[arg(long = "type", short = 't')]
    pub action_type: Option<String>,
}

impl MitigationFilterArgs {
    /// Convert CLI args to API filter params.
    pub fn to_params(&self) -> MitigationActionFilterParams {
        MitigationActionFilterParams {
            action_type: self.action_type.as_deref().map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_arg_rfc3339() {
        let dt = parse_time_arg("2023-11-14T22:13:20Z").unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_parse_time_arg_date() {
        let dt = parse_time_arg("2023-11-14").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2023-11-14 00:00");
    }

    #[test]
    fn test_parse_time_arg_relative() {
        let dt = parse_time_arg("24h").unwrap();
        let delta = Utc::now() - dt;
        assert!((delta.num_minutes() - 24 * 60).abs() <= 1);
    }

    #[test]
    fn test_parse_time_arg_invalid() {
        assert!(parse_time_arg("yesterday").is_err());
        assert!(parse_time_arg("12x").is_err());
    }

    #[test]
    fn test_thing_filter_attribute_split() {
        let args = ThingFilterArgs {
            thing_type: None,
            attribute: Some("building=hq".to_string()),
        };
        let params = args.to_params().unwrap();
        assert_eq!(params.attribute_name.as_deref(), Some("building"));
        assert_eq!(params.attribute_value.as_deref(), Some("hq"));

        let bad = ThingFilterArgs {
            thing_type: None,
            attribute: Some("no-equals".to_string()),
        };
        assert!(bad.to_params().is_err());
    }

    #[test]
    fn test_audit_task_filter_raw_status_token() {
        use crate::client::models::AuditTaskStatus;

        let args = AuditTaskFilterArgs {
            status: Some("FAILED".to_string()),
            ..AuditTaskFilterArgs::default()
        };
        let params = args.to_params().unwrap();
        assert_eq!(params.task_status, Some(AuditTaskStatus::Failed));
    }
}
