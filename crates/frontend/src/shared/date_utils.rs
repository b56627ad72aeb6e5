/// Utilities for date and time formatting
///
/// The backend sends ISO 8601 strings; the dashboard shows US-style dates.

/// Format ISO datetime string to MM/DD/YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123Z" -> "03/15/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some((year, rest)) = date_part.split_once('-') {
            if let Some((month, day)) = rest.split_once('-') {
                let time = time_part.get(..5).unwrap_or(time_part);
                return format!("{}/{}/{} {}", month, day, year, time);
            }
        }
    }
    datetime_str.to_string()
}

/// Format ISO date string to MM/DD/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "03/15/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", month, day, year);
        }
    }
    date_str.to_string()
}

/// Optional variant used by table cells: missing values render as a dash.
pub fn format_date_opt(date_str: Option<&str>) -> String {
    match date_str {
        Some(s) if !s.trim().is_empty() => format_date(s),
        _ => "-".to_string(),
    }
}

/// Today's date in the browser's local time zone.
pub fn today() -> chrono::NaiveDate {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "03/15/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "12/31/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "03/15/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "03/15/2024");
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(format_date_opt(None), "-");
        assert_eq!(format_date_opt(Some(" ")), "-");
        assert_eq!(format_date_opt(Some("1990-07-04")), "07/04/1990");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }
}
