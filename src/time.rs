//! Time related utils.

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Create a new DateTime with the current UTC time.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format a datetime into an 8-digit date like `20220313`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format a datetime into compact ISO 8601 like `20220313T072004Z`.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let t = chrono::Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap();
        assert_eq!(format_date(t), "20220313");
    }

    #[test]
    fn test_format_iso8601() {
        let t = chrono::Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap();
        assert_eq!(format_iso8601(t), "20220313T072004Z");
    }
}
