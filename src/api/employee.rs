use crate::auth::auth::AuthUser;
use crate::model::employee::Employee;
use crate::utils::roster_cache;
use actix_web::{HttpResponse, error::ErrorInternalServerError, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;

/// Full roster, managers only. Feeds the staff table and is the employee
/// set every report aggregates over.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Roster", body = [Employee]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_users(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_manager()?;

    let roster = roster_cache::roster(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to load roster");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(&*roster))
}

/// One employee's profile, self or manager.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.authorize_for(employee_id)?;

    let roster = roster_cache::roster(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to load roster");
        ErrorInternalServerError("Database error")
    })?;

    match roster.iter().find(|e| e.id == employee_id) {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::NotFound().json(json!({ "message": "Employee not found" }))),
    }
}
