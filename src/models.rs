use crate::model::{employee::Employee, role::Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "alice@company.com", format = "email")]
    pub email: String,
    #[schema(example = "employee")]
    pub role: Role,
    /// Verified when present; the demo UI sends a fixed password.
    #[schema(example = "password")]
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: Employee,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    /// Email address of the authenticated user.
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
