use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%:z"];

/// Parses the textual timestamp forms found in the roster and activity feeds.
///
/// Values carrying a UTC offset are converted to local wall-clock time so they
/// compare against the same "now" the dashboard uses.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Excel serial day numbers count from 1899-12-30 (the 1900 leap-year bug
/// included), with the fraction as time of day.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates_at_midnight() {
        let parsed = parse_timestamp("2024-06-01").unwrap();
        assert_eq!(parsed, ymd(2024, 6, 1).and_time(NaiveTime::MIN));
        assert_eq!(parse_timestamp("2024/06/01").unwrap().date(), ymd(2024, 6, 1));
    }

    #[test]
    fn parses_datetimes_with_and_without_fraction() {
        let expected = ymd(2024, 5, 25).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-25 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-25T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-25 10:30"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-25T10:30:00.250").map(|dt| dt.date()),
            Some(ymd(2024, 5, 25))
        );
    }

    #[test]
    fn offset_timestamps_are_accepted() {
        assert!(parse_timestamp("2024-05-25T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-05-25 10:30:00+09:00").is_some());
    }

    #[test]
    fn rejects_garbage_and_blank() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn excel_serials_map_to_calendar_dates() {
        // 45444 is 2024-06-01 in the 1900 date system.
        let dt = excel_serial_to_datetime(45444.0).unwrap();
        assert_eq!(dt.date(), ymd(2024, 6, 1));
        let noon = excel_serial_to_datetime(45444.5).unwrap();
        assert_eq!(noon.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn formatted_dates_parse_back_to_the_same_day() {
        for date in [ymd(2024, 1, 1), ymd(2024, 2, 29), ymd(1999, 12, 31)] {
            let text = format_ymd(date);
            assert_eq!(parse_timestamp(&text).unwrap().date(), date);
        }
    }
}
