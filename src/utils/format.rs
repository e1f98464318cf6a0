use chrono::{TimeZone, Utc};

use crate::data_types::AxisKind;

#[derive(Debug, Clone, Copy)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

/// Determines the best date format based on the visible time range (in
/// milliseconds).
pub fn determine_date_format(visible_range_ms: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60_000.0;
    const HOUR: f64 = 3_600_000.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_ms > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_ms > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_ms > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_ms > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

fn format_timestamp(value_ms: f64, format: SmartDateFormat) -> String {
    let dt = match Utc.timestamp_millis_opt(value_ms as i64) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return format!("{:.2}", value_ms),
    };

    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => dt.format("%d %b").to_string(),
        SmartDateFormat::HourMin => dt.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
    }
}

fn format_duration(value_ms: f64) -> String {
    let duration = chrono::Duration::milliseconds(value_ms as i64);
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    let seconds = duration.num_seconds() % 60;
    if hours != 0 {
        format!("{hours}:{:02}:{:02}", minutes.abs(), seconds.abs())
    } else if minutes != 0 {
        format!("{minutes}:{:02}", seconds.abs())
    } else {
        let millis = duration.num_milliseconds() % 1000;
        if millis != 0 && seconds.abs() < 10 {
            format!("{seconds}.{:03}s", millis.abs())
        } else {
            format!("{seconds}s")
        }
    }
}

fn format_numeric(value: f64) -> String {
    if value.abs() < 0.001 && value.abs() > 0.0 {
        format!("{:.4}", value)
    } else if value.abs() > 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format one tick value for an axis of the given kind. `span` is the
/// visible domain width, used to pick date precision.
pub fn format_tick(value: f64, kind: AxisKind, span: f64) -> String {
    match kind {
        AxisKind::Numeric => format_numeric(value),
        AxisKind::DateTime => format_timestamp(value, determine_date_format(span.abs())),
        AxisKind::Duration => format_duration(value),
        AxisKind::Category => format!("{}", value.round() as i64),
    }
}
