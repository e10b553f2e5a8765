//! Display formatting for timer values and timestamps.
//!
//! ```rust
//! use focusflow::libs::formatter::format_time;
//!
//! assert_eq!(format_time(0), "00:00:00");
//! assert_eq!(format_time(3661), "01:01:01");
//! assert_eq!(format_time(90000), "25:00:00");
//! ```

use chrono::{DateTime, Local, Utc};

/// Formats whole seconds as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits and keep growing past 23; they are
/// never wrapped into days.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Calendar date of `timestamp` in the local time zone (`YYYY-MM-DD`).
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
