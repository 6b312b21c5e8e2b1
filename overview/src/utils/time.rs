//! Time utility functions

use chrono::{DateTime, Utc};
use costcenter::value::parse_timestamp;

/// Parse a date argument (`YYYY-MM-DD` or RFC 3339) for clap
pub fn parse_date_arg(s: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(s).ok_or_else(|| {
        format!(
            "Invalid date '{}'. Expected YYYY-MM-DD or an RFC 3339 timestamp",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_arg_date_only() {
        assert_eq!(
            parse_date_arg("2024-03-15").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_date_arg_rfc3339_with_offset() {
        assert_eq!(
            parse_date_arg("2024-03-15T10:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_date_arg_invalid() {
        let err = parse_date_arg("15/03/2024").unwrap_err();
        assert!(err.contains("15/03/2024"));
    }
}
