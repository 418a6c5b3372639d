//! Course Error Types
//!
//! Course-specific failures. [`CourseError::kind`] is the only place that
//! decides which HTTP status a failure gets; rendering goes through
//! `kernel::error::AppError`.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Course-specific result type alias
pub type CourseResult<T> = Result<T, CourseError>;

#[derive(Debug, Error)]
pub enum CourseError {
    /// No authenticated identity on the request
    #[error("User is not logged in")]
    NotLoggedIn,

    /// Logged in, but missing the role or privilege
    #[error("{0}")]
    Forbidden(String),

    /// Missing or malformed query parameter
    #[error("{0}")]
    InvalidParameter(String),

    /// Request body could not be parsed or is incomplete
    #[error("{0}")]
    InvalidRequestBody(String),

    /// Business-rule validation failed (bad time zone, bad course id)
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CourseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CourseError::NotLoggedIn => ErrorKind::Unauthorized,
            CourseError::Forbidden(_) => ErrorKind::Forbidden,
            CourseError::InvalidParameter(_)
            | CourseError::InvalidRequestBody(_)
            | CourseError::Validation(_) => ErrorKind::BadRequest,
            CourseError::NotFound(_) => ErrorKind::NotFound,
            CourseError::AlreadyExists(_) => ErrorKind::Conflict,
            CourseError::Database(_) | CourseError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Missing required query parameter
    pub fn missing_parameter(name: &str) -> Self {
        CourseError::InvalidParameter(format!("The [{}] HTTP parameter is null.", name))
    }

    fn log(&self) {
        match self {
            CourseError::Database(e) => {
                tracing::error!(error = %e, "Course database error");
            }
            CourseError::Internal(msg) => {
                tracing::error!(message = %msg, "Course internal error");
            }
            CourseError::Forbidden(msg) => {
                tracing::warn!(message = %msg, "Course access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Course request rejected");
            }
        }
    }
}

impl From<CourseError> for AppError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::Database(e) => AppError::from(e),
            CourseError::Internal(msg) => AppError::internal("Internal server error")
                .with_source(std::io::Error::other(msg)),
            CourseError::NotLoggedIn => AppError::unauthorized(CourseError::NotLoggedIn.to_string())
                .with_action("Sign in through your institution and retry"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

/// Value objects validate through `AppResult`; keep their message and class.
impl From<AppError> for CourseError {
    fn from(err: AppError) -> Self {
        let message = err.message().to_string();
        match err.kind() {
            ErrorKind::BadRequest => CourseError::Validation(message),
            ErrorKind::Unauthorized => CourseError::NotLoggedIn,
            ErrorKind::Forbidden => CourseError::Forbidden(message),
            ErrorKind::NotFound => CourseError::NotFound(message),
            ErrorKind::Conflict => CourseError::AlreadyExists(message),
            _ => CourseError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
