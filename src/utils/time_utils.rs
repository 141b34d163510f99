use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    /// Date plus hour-and-minute, as shown in the hover readout
    pub const DATE_HOURS_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Hover readout date for a unix-seconds timestamp (UTC).
/// Out-of-range timestamps render as `-`.
pub fn format_date_hours(epoch_sec: i64) -> String {
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(TimeUtils::DATE_HOURS_FORMAT).to_string(),
        None => "-".to_string(),
    }
}
