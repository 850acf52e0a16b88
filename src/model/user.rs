use crate::model::employee::Employee;
use crate::model::role::Role;
use std::str::FromStr;

/// Row shape of the `users` table, including the credential hash. Only the
/// auth layer and the roster loader see this; everything outward-facing gets
/// an [`Employee`] view.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub employee_code: String,
    pub department: String,
    pub avatar: Option<String>,
}

impl UserRow {
    /// Public view of this user. `None` when the stored role string is not a
    /// known role (a corrupt row, skipped with a warning by callers).
    pub fn to_employee(&self) -> Option<Employee> {
        let role = Role::from_str(&self.role).ok()?;
        Some(Employee {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role,
            employee_code: self.employee_code.clone(),
            department: self.department.clone(),
            avatar: self.avatar.clone(),
        })
    }
}
