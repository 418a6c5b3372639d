//! Course Name Value Object

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const COURSE_NAME_MAX_LENGTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseName(String);

impl CourseName {
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::bad_request(
                "The field 'course name' is empty. A course name cannot be empty.",
            ));
        }

        if name.chars().count() > COURSE_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "\"{}\" is not acceptable as a course name because it is too long. \
                 A course name can contain at most {} characters.",
                name, COURSE_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_name() {
        assert_eq!(
            CourseName::new(" Software Engineering ").unwrap().as_str(),
            "Software Engineering"
        );
        assert!(CourseName::new("").is_err());
        assert!(CourseName::new("x".repeat(COURSE_NAME_MAX_LENGTH)).is_ok());
        assert!(CourseName::new("x".repeat(COURSE_NAME_MAX_LENGTH + 1)).is_err());
    }
}
