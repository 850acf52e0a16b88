use crate::engine::error::AttendanceError;
use chrono::NaiveDateTime;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Elapsed worked time between check-in and check-out, in hours rounded to
/// two decimal places. Fails with `InvalidInterval` when `end < start`
/// (clock skew is surfaced, never silently clamped).
pub fn worked_hours(start: NaiveDateTime, end: NaiveDateTime) -> Result<f64, AttendanceError> {
    let millis = (end - start).num_milliseconds();
    if millis < 0 {
        return Err(AttendanceError::InvalidInterval);
    }
    Ok(round2(millis as f64 / MILLIS_PER_HOUR))
}

/// Round to 2 decimal places, the precision `total_hours` is stored at.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Human-readable `Hh Mm Ss` breakdown of the same delta. A missing end
/// (in-progress session) or an inverted interval renders as a zero duration;
/// this is display-only and independent of the stored numeric hours.
pub fn format_breakdown(start: NaiveDateTime, end: Option<NaiveDateTime>) -> String {
    let secs = end
        .map(|e| (e - start).num_seconds().max(0))
        .unwrap_or(0);
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn full_day_rounds_to_two_places() {
        let hours = worked_hours(ts("2026-08-30 09:00:00"), ts("2026-08-30 17:30:00")).unwrap();
        assert_eq!(hours, 8.50);
    }

    #[test]
    fn sub_minute_sessions_round_down_to_zero() {
        let hours = worked_hours(ts("2026-08-30 09:00:00"), ts("2026-08-30 09:00:10")).unwrap();
        assert_eq!(hours, 0.0);
    }

    #[test]
    fn zero_length_interval_is_valid() {
        let t = ts("2026-08-30 09:00:00");
        assert_eq!(worked_hours(t, t).unwrap(), 0.0);
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let err = worked_hours(ts("2026-08-30 17:00:00"), ts("2026-08-30 09:00:00")).unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidInterval));
    }

    #[test]
    fn hours_are_never_negative() {
        for (a, b) in [
            ("2026-08-30 09:00:00", "2026-08-30 09:00:00"),
            ("2026-08-30 09:00:00", "2026-08-30 09:00:01"),
            ("2026-08-30 09:00:00", "2026-08-31 09:00:00"),
        ] {
            assert!(worked_hours(ts(a), ts(b)).unwrap() >= 0.0);
        }
    }

    #[test]
    fn breakdown_formats_hours_minutes_seconds() {
        let s = format_breakdown(ts("2026-08-30 09:00:00"), Some(ts("2026-08-30 17:30:00")));
        assert_eq!(s, "8h 30m 0s");

        let s = format_breakdown(ts("2026-08-30 09:00:00"), Some(ts("2026-08-30 10:05:07")));
        assert_eq!(s, "1h 5m 7s");
    }

    #[test]
    fn breakdown_tolerates_open_sessions() {
        assert_eq!(format_breakdown(ts("2026-08-30 09:00:00"), None), "0h 0m 0s");
    }

    #[test]
    fn breakdown_clamps_inverted_intervals_to_zero() {
        let s = format_breakdown(ts("2026-08-30 17:00:00"), Some(ts("2026-08-30 09:00:00")));
        assert_eq!(s, "0h 0m 0s");
    }
}
