/// Utilities for date and time formatting
///
/// The backend sends modification dates as ISO-8601, with or without an
/// offset and fractional seconds.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Format ISO datetime string to DD/MM/YYYY HH:MM:SS
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    let s = datetime_str.trim();
    if s.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15/03/2024 14:02:26");
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "31/12/2024 23:59:59");
        assert_eq!(format_datetime("2024-12-31 08:00:00.5"), "31/12/2024 08:00:00");
        assert_eq!(format_datetime("2024-03-15"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_datetime(""), "-");
    }
}
