use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Attendance status, fixed at check-in time. `Absent` is only ever inferred
/// from the absence of a record; `HalfDay`/`OnLeave` come from manual
/// manager adjustments, never from the classifier.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    #[serde(rename = "Half Day")]
    #[strum(serialize = "Half Day")]
    HalfDay,
    #[serde(rename = "On Leave")]
    #[strum(serialize = "On Leave")]
    OnLeave,
}

/// One attendance record per (employee, calendar date). Created by check-in,
/// mutated exactly once by check-out, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 42,
    "userId": 1,
    "date": "2026-08-30",
    "checkInTime": "2026-08-30T09:02:11",
    "checkOutTime": "2026-08-30T17:31:05",
    "status": "Present",
    "totalHours": 8.48
}))]
pub struct AttendanceRecord {
    pub id: u64,
    #[serde(rename = "userId")]
    pub employee_id: u64,
    #[schema(value_type = String, format = "date", example = "2026-08-30")]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, example = "2026-08-30T09:02:11")]
    pub check_in_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2026-08-30T17:31:05")]
    pub check_out_time: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
    #[schema(example = 8.48)]
    pub total_hours: f64,
}
