use crate::api::attendance::{CheckInReq, CheckOutReq};
use crate::engine::report::{DepartmentAttendance, EmployeeSummary, RosterSummary};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::model::role::Role;
use crate::models::{LoginReq, LoginResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WorkPulse API",
        version = "1.0.0",
        description = r#"
## WorkPulse — employee attendance tracking

### Key features
- **Check-in / check-out** — one record per employee per calendar date;
  arrivals after the configured cutoff are classified Late
- **Attendance history** — per-employee records, most recent first
- **Reports** — daily roster summary (On-Time / Late / Absent), department
  breakdown, and per-employee totals for dashboards

### Security
All endpoints except login require a **JWT Bearer token**. Reports and the
roster are restricted to managers.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::employee::list_users,
        crate::api::employee::get_user,

        crate::api::attendance::list_attendance,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::employee_history,
        crate::api::attendance::today_record,

        crate::api::report::daily_summary,
        crate::api::report::department_summary,
        crate::api::report::employee_report
    ),
    components(
        schemas(
            LoginReq,
            LoginResponse,
            Employee,
            Role,
            AttendanceRecord,
            AttendanceStatus,
            CheckInReq,
            CheckOutReq,
            RosterSummary,
            DepartmentAttendance,
            EmployeeSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication APIs"),
        (name = "Attendance", description = "Check-in/check-out and history APIs"),
        (name = "Employee", description = "Roster APIs"),
        (name = "Reports", description = "Aggregated attendance reports"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(openapi::Components::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
