use chrono::{TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    Date,       // 2024-01-12
    DateTime,   // 2024-01-12 10:30
    HourMinSec, // 10:30:15
}

/// Determines the best date format for a displayed span (in seconds).
pub fn determine_date_format(span_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const DAY: f64 = 24.0 * 3600.0;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if span_sec > YEAR * 5.0 {
        SmartDateFormat::Year
    } else if span_sec > MONTH * 6.0 {
        SmartDateFormat::MonthYear
    } else if span_sec > DAY * 3.0 {
        SmartDateFormat::Date
    } else if span_sec > MINUTE * 10.0 {
        SmartDateFormat::DateTime
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats a date value stored as milliseconds since the Unix epoch.
pub fn format_millis(millis: f64, format: SmartDateFormat) -> String {
    let dt = match Utc.timestamp_millis_opt(millis as i64) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return format!("{:.0}", millis),
    };

    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::Date => dt.format("%Y-%m-%d").to_string(),
        SmartDateFormat::DateTime => dt.format("%Y-%m-%d %H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
    }
}

/// Formats a date using a format picked from the span of the axis it belongs to.
pub fn format_date_in_span(millis: f64, span_millis: f64) -> String {
    format_millis(millis, determine_date_format(span_millis.abs() / 1000.0))
}
