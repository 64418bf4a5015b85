//! Display text for a countdown

use std::time::Duration;

/// Shown in place of the time while a countdown is paused
pub const PAUSE_MARKER: &str = "PAUSE";

/// Format a duration as `HH:MM:SS`, rounded to the nearest second.
///
/// Hours are not capped, so 100 hours or more simply widens the first field.
pub fn duration_to_text(d: Duration) -> String {
    let total_secs = (d.as_nanos() + 500_000_000) / 1_000_000_000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_to_text() {
        assert_eq!(duration_to_text(Duration::ZERO), "00:00:00");
        assert_eq!(duration_to_text(Duration::from_secs(3725)), "01:02:05");
        assert_eq!(duration_to_text(Duration::from_secs(86_399)), "23:59:59");
    }

    #[test]
    fn test_rounds_to_nearest_second() {
        assert_eq!(duration_to_text(Duration::from_millis(59_600)), "00:01:00");
        assert_eq!(duration_to_text(Duration::from_millis(59_400)), "00:00:59");
        assert_eq!(duration_to_text(Duration::from_millis(500)), "00:00:01");
        assert_eq!(duration_to_text(Duration::from_millis(499)), "00:00:00");
    }

    #[test]
    fn test_hours_overflow_field_width() {
        assert_eq!(duration_to_text(Duration::from_secs(100 * 3600 + 1)), "100:00:01");
    }
}
