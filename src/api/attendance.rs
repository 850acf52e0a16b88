use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::db::MySqlStore;
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::duration::format_breakdown;
use crate::engine::store::AttendanceStore;
use crate::model::attendance::AttendanceRecord;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CheckInReq {
    #[serde(rename = "userId")]
    #[schema(example = 1)]
    pub user_id: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct CheckOutReq {
    #[serde(rename = "userId")]
    #[schema(example = 1)]
    pub user_id: u64,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    request_body = CheckInReq,
    responses(
        (status = 200, description = "Checked in, new record returned", body = AttendanceRecord),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    config: web::Data<Config>,
    body: web::Json<CheckInReq>,
) -> actix_web::Result<HttpResponse> {
    auth.authorize_for(body.user_id)?;

    let now = SystemClock.now();
    let record = store.check_in(body.user_id, now, config.late_cutoff).await?;

    info!(employee_id = body.user_id, status = %record.status, "Checked in");
    Ok(HttpResponse::Ok().json(record))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/checkout",
    request_body = CheckOutReq,
    responses(
        (status = 200, description = "Checked out, updated record returned", body = AttendanceRecord),
        (status = 404, description = "No check-in record found for today", body = Object, example = json!({
            "message": "No check-in record found for today"
        })),
        (status = 400, description = "Check-out time precedes check-in time"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    body: web::Json<CheckOutReq>,
) -> actix_web::Result<HttpResponse> {
    auth.authorize_for(body.user_id)?;

    let now = SystemClock.now();
    let record = store.check_out(body.user_id, now).await?;

    if let Some(start) = record.check_in_time {
        info!(
            employee_id = body.user_id,
            hours = record.total_hours,
            session = %format_breakdown(start, record.check_out_time),
            "Checked out"
        );
    }
    Ok(HttpResponse::Ok().json(record))
}

/// All attendance records (the full store content).
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance records", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    _auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<HttpResponse> {
    let records = store.all_records().await?;
    Ok(HttpResponse::Ok().json(records))
}

/// One employee's history, most recent date first.
#[utoipa::path(
    get,
    path = "/api/attendance/{user_id}",
    params(("user_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Attendance history", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn employee_history(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.authorize_for(employee_id)?;

    let records = store.records_for(employee_id).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Today's record for an employee, `null` when not checked in yet. Drives
/// the check-in/check-out toggle on the dashboard.
#[utoipa::path(
    get,
    path = "/api/attendance/{user_id}/today",
    params(("user_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Today's record, or null when not checked in", body = AttendanceRecord),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn today_record(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.authorize_for(employee_id)?;

    let record = store.today_record(employee_id, SystemClock.today()).await?;
    Ok(HttpResponse::Ok().json(record))
}
