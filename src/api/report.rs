use crate::auth::auth::AuthUser;
use crate::db::MySqlStore;
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::report::{
    DepartmentAttendance, EmployeeSummary, RosterSummary, department_breakdown, employee_summary,
    roster_summary,
};
use crate::engine::store::AttendanceStore;
use crate::model::{employee::Employee, role::Role};
use crate::utils::roster_cache;
use actix_web::{HttpResponse, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Report date, defaults to today.
    pub date: Option<NaiveDate>,
}

async fn employee_roster(pool: &MySqlPool) -> actix_web::Result<Vec<Employee>> {
    let roster = roster_cache::roster(pool).await.map_err(|e| {
        error!(error = %e, "Failed to load roster");
        ErrorInternalServerError("Database error")
    })?;
    // reports only cover staff; managers are not part of the roster counts
    Ok(roster
        .iter()
        .filter(|e| e.role == Role::Employee)
        .cloned()
        .collect())
}

/// One-day roster summary: On-Time / Late / Absent counts for the manager
/// dashboard. Absent is inferred from missing records, never stored.
#[utoipa::path(
    get,
    path = "/api/reports/daily",
    params(ReportQuery),
    responses(
        (status = 200, description = "Roster summary for the date", body = RosterSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn daily_summary(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_manager()?;

    let today = SystemClock.today();
    let date = query.date.unwrap_or(today);
    let employees = employee_roster(pool.get_ref()).await?;
    let records = store.records_on(date).await?;

    Ok(HttpResponse::Ok().json(roster_summary(&employees, &records, date, today)))
}

/// Per-department attendance for a date (department bar chart).
#[utoipa::path(
    get,
    path = "/api/reports/departments",
    params(ReportQuery),
    responses(
        (status = 200, description = "Attendance per department", body = [DepartmentAttendance]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn department_summary(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_manager()?;

    let date = query.date.unwrap_or_else(|| SystemClock.today());
    let employees = employee_roster(pool.get_ref()).await?;
    let records = store.records_on(date).await?;

    Ok(HttpResponse::Ok().json(department_breakdown(&employees, &records, date)))
}

/// Whole-history summary for one employee (personal dashboard tiles).
#[utoipa::path(
    get,
    path = "/api/reports/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Present/Late day counts and summed hours", body = EmployeeSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn employee_report(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.authorize_for(employee_id)?;

    let records = store.records_for(employee_id).await?;
    Ok(HttpResponse::Ok().json(employee_summary(&records)))
}
