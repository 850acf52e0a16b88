use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Attendance engine error taxonomy. All variants are local and non-fatal;
/// they surface to the caller as rejected actions, no retry logic applies.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Second check-in attempt for the same (employee, date).
    #[error("Already checked in today")]
    DuplicateCheckIn,

    /// Check-out with no matching open check-in for today.
    #[error("No check-in record found for today")]
    NoOpenRecord,

    /// Check-out time precedes check-in time (clock skew).
    #[error("Check-out time precedes check-in time")]
    InvalidInterval,

    /// A persisted row carries a status string the engine does not know.
    #[error("corrupt attendance row: unknown status {0:?}")]
    InvalidStatus(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::DuplicateCheckIn | AttendanceError::InvalidInterval => {
                StatusCode::BAD_REQUEST
            }
            AttendanceError::NoOpenRecord => StatusCode::NOT_FOUND,
            AttendanceError::InvalidStatus(_) | AttendanceError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // internal details are logged, not leaked
            AttendanceError::InvalidStatus(_) | AttendanceError::Storage(_) => {
                tracing::error!(error = %self, "attendance storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
