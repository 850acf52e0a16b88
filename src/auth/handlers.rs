use crate::{
    auth::{jwt::generate_token, password::verify_password},
    config::Config,
    models::{LoginReq, LoginResponse},
    model::user::UserRow,
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

/// Login endpoint. Resolves the user by email + role (the login form lets
/// callers pick a role, so a mismatch is a 400, not a 401) and verifies the
/// password when one is sent.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "User not found or role mismatch", body = Object, example = json!({
            "message": "User not found or role mismatch"
        })),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(pool, config, body), fields(email = %body.email))]
pub async fn login(
    body: web::Json<LoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    let email = body.email.trim();
    if email.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Email required" }));
    }

    debug!("Fetching user from database");

    let row = match sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, password, role, employee_code, department, avatar
        FROM users
        WHERE email = ? AND role = ?
        "#,
    )
    .bind(email)
    .bind(body.role.to_string())
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(row)) => row,
        Ok(None) => {
            info!("User not found or role mismatch");
            return HttpResponse::BadRequest()
                .json(json!({ "message": "User not found or role mismatch" }));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Some(password) = &body.password {
        if verify_password(password, &row.password).is_err() {
            info!("Invalid credentials: password mismatch");
            return HttpResponse::Unauthorized()
                .json(json!({ "message": "Invalid credentials" }));
        }
    }

    let user = match row.to_employee() {
        Some(user) => user,
        None => {
            error!(user_id = row.id, role = %row.role, "Corrupt role value on user row");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let token = generate_token(
        user.id,
        user.email.clone(),
        user.role,
        &config.jwt_secret,
        config.token_ttl,
    );

    info!(user_id = user.id, "Login successful");

    HttpResponse::Ok().json(LoginResponse { token, user })
}
