use crate::model::attendance::AttendanceStatus;
use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Default Late cutoff, overridable via `LATE_CUTOFF`.
pub const DEFAULT_LATE_CUTOFF: &str = "09:30";

/// Derives the attendance status for a check-in timestamp.
///
/// A check-in is `Late` when its time-of-day is strictly after the cutoff,
/// compared at minute precision (09:30:59 with a 09:30 cutoff is still on
/// time). `Absent` is never produced here: it is the absence of a record,
/// inferred at aggregation time. `HalfDay`/`OnLeave` are reserved for manual
/// adjustment workflows.
pub fn classify(check_in: NaiveDateTime, cutoff: NaiveTime) -> AttendanceStatus {
    let t = check_in.time();
    if (t.hour(), t.minute()) > (cutoff.hour(), cutoff.minute()) {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}
