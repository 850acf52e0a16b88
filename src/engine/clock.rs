use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for the attendance engine. Injectable so classification
/// and record-lifecycle tests are deterministic.
pub trait Clock {
    /// Local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Calendar-date key for "now" (`YYYY-MM-DD` bucket).
    fn today(&self) -> NaiveDate {
        date_key(self.now())
    }
}

/// Production clock backed by the OS local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// The `YYYY-MM-DD` bucket a timestamp falls into, used as part of a
/// record's identity.
pub fn date_key(ts: NaiveDateTime) -> NaiveDate {
    ts.date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn date_key_drops_time_of_day() {
        assert_eq!(
            date_key(ts("2026-08-30 23:59:59")),
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
        );
        assert_eq!(
            date_key(ts("2026-08-31 00:00:00")),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
        );
    }

    #[test]
    fn date_key_formats_as_iso_date() {
        let key = date_key(ts("2026-01-05 09:00:00"));
        assert_eq!(key.to_string(), "2026-01-05");
    }

    #[test]
    fn today_uses_injected_clock() {
        let clock = FixedClock(ts("2026-08-30 10:15:00"));
        assert_eq!(clock.today().to_string(), "2026-08-30");
    }
}
