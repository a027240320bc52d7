// Clock-time helpers shared by the wire layer and time-row generation

use chrono::{Duration, NaiveTime};

/// Parse `"HH:MM"` or `"HH:MM:SS"`.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Display form used for grid rows.
pub fn format_row_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// The backend wants seconds on assignment times.
pub fn to_wire_time(row_time: &str) -> String {
    format!("{}:00", row_time)
}

/// Rows from `start` (inclusive) to `end` (exclusive) every `interval_minutes`.
pub fn generate_rows(start: NaiveTime, end: NaiveTime, interval_minutes: u32) -> Vec<String> {
    if interval_minutes == 0 || end <= start {
        return Vec::new();
    }

    let step = Duration::minutes(interval_minutes as i64);
    let mut rows = Vec::new();
    let mut current = start;
    while current < end {
        rows.push(format_row_time(current));
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_accepts_both_precisions() {
        assert_eq!(parse_clock_time("06:10"), Some(t(6, 10)));
        assert_eq!(parse_clock_time("06:10:00"), Some(t(6, 10)));
        assert_eq!(parse_clock_time(" 18:05 "), Some(t(18, 5)));
        assert_eq!(parse_clock_time("6pm"), None);
    }

    #[test]
    fn test_generate_rows_excludes_end() {
        let rows = generate_rows(t(6, 0), t(6, 30), 10);
        assert_eq!(rows, vec!["06:00", "06:10", "06:20"]);
    }

    #[test]
    fn test_generate_rows_handles_degenerate_ranges() {
        assert!(generate_rows(t(9, 0), t(6, 0), 10).is_empty());
        assert!(generate_rows(t(6, 0), t(9, 0), 0).is_empty());
    }

    #[test]
    fn test_generate_rows_stops_at_midnight() {
        let rows = generate_rows(t(23, 40), t(23, 59), 15);
        assert_eq!(rows, vec!["23:40", "23:55"]);
    }

    #[test]
    fn test_wire_time_appends_seconds() {
        assert_eq!(to_wire_time("06:00"), "06:00:00");
    }
}
