//! Gate Keeper
//!
//! Course-level access checks shared by all instructor endpoints.

use kernel::error::app_error::OptionExt;

use crate::domain::entity::{course::Course, instructor::Instructor};
use crate::domain::value_object::privilege::Privilege;
use crate::error::{CourseError, CourseResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct GateKeeper;

impl GateKeeper {
    pub fn new() -> Self {
        Self
    }

    /// Verify that `instructor` may act on `course`, optionally holding `privilege`.
    ///
    /// A missing course wins over a missing instructor so that callers can
    /// tell "no such course" apart from "not yours".
    pub fn verify_accessible<'a>(
        &self,
        instructor: Option<&Instructor>,
        course: Option<&'a Course>,
        privilege: Option<Privilege>,
    ) -> CourseResult<&'a Course> {
        let course = course.ok_or_not_found("Course not found")?;

        let instructor = instructor
            .filter(|i| i.course_id == course.course_id)
            .ok_or_else(|| {
                CourseError::Forbidden(format!(
                    "You are not an instructor of the course {}.",
                    course.course_id
                ))
            })?;

        if let Some(privilege) = privilege {
            if !instructor.has_privilege(privilege) {
                return Err(CourseError::Forbidden(format!(
                    "You do not have the required privilege ({}) to perform this action.",
                    privilege
                )));
            }
        }

        Ok(course)
    }
}
