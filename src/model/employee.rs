use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public employee profile (never carries the password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "name": "Alice Johnson",
    "email": "alice@company.com",
    "role": "employee",
    "employeeId": "EMP001",
    "department": "Engineering",
    "avatar": "https://ui-avatars.com/api/?name=Alice+Johnson"
}))]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Stable employee-code, `employeeId` on the wire.
    #[serde(rename = "employeeId")]
    pub employee_code: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
