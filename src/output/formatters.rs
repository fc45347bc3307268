//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Utc};

/// Format an optional wire timestamp for table cells.
///
/// Returns "-" when the field is absent.
pub fn format_datetime(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_absent() {
        assert_eq!(format_datetime(None), "-");
    }

    #[test]
    fn test_format_datetime_present() {
        let dt = DateTime::from_timestamp(1_700_000_000, 0);
        assert_eq!(format_datetime(dt), "2023-11-14 22:13 UTC");
    }
}
