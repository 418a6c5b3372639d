//! Course ID Value Object
//!
//! Course IDs are chosen by the instructor at creation time and never change.

use std::fmt;
use std::str::FromStr;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const COURSE_ID_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Validate a user-supplied course ID
    pub fn new(course_id: impl Into<String>) -> AppResult<Self> {
        let course_id = course_id.into().trim().to_string();

        if course_id.is_empty() {
            return Err(AppError::bad_request("Course ID cannot be empty"));
        }

        if course_id.chars().count() > COURSE_ID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "\"{}\" is not acceptable as a course ID because it is too long. \
                 A course ID can contain at most {} characters.",
                course_id, COURSE_ID_MAX_LENGTH
            )));
        }

        if !course_id.chars().all(Self::is_allowed_char) {
            return Err(AppError::bad_request(format!(
                "\"{}\" is not acceptable as a course ID. A course ID can contain only \
                 letters, digits, and the characters '.', '_', '$' and '-'.",
                course_id
            )));
        }

        Ok(Self(course_id))
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '$' | '-')
    }

    /// From database value (assumed already validated)
    pub fn from_db(course_id: impl Into<String>) -> Self {
        Self(course_id.into())
    }

    /// Key for looking up an existing course. Only trimmed: an id that could
    /// never have been created simply finds nothing.
    pub fn lookup(course_id: &str) -> Self {
        Self(course_id.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CourseId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        CourseId::new(s)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
