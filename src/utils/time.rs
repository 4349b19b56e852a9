// src/utils/time.rs

use chrono::{DateTime, Local, TimeDelta};

/// Formats a span as `H:MM:SS`, dropping fractional seconds.
/// Spans of a day or more get a `N day, ` / `N days, ` prefix.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let rem = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, rem % 3600 / 60, rem % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_short_spans() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(323)), "0:05:23");
        assert_eq!(format_elapsed(TimeDelta::milliseconds(59_999)), "0:00:59");
        assert_eq!(format_elapsed(TimeDelta::hours(13) + TimeDelta::seconds(7)), "13:00:07");
    }

    #[test]
    fn test_formats_multi_day_spans() {
        assert_eq!(format_elapsed(TimeDelta::days(1)), "1 day, 0:00:00");
        assert_eq!(
            format_elapsed(TimeDelta::days(2) + TimeDelta::minutes(61)),
            "2 days, 1:01:00"
        );
    }

    #[test]
    fn test_negative_spans_clamp_to_zero() {
        assert_eq!(format_elapsed(TimeDelta::seconds(-5)), "0:00:00");
    }
}
