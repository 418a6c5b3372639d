//! Course access checks
//!
//! Shared first step of every instructor use case: require the instructor
//! level, load course and instructor, then ask the gate keeper. Nothing the
//! caller sent besides the course id is looked at before this passes.

use crate::application::user::UserInfo;
use crate::domain::entity::course::Course;
use crate::domain::gate_keeper::GateKeeper;
use crate::domain::repository::{CourseRepository, InstructorRepository};
use crate::domain::value_object::{course_id::CourseId, privilege::Privilege};
use crate::error::{CourseError, CourseResult};

/// Proof that the gate keeper let a caller into a course.
///
/// Only [`verify_course_access`] builds one.
#[derive(Debug, Clone)]
pub struct CourseAccess {
    course: Course,
}

impl CourseAccess {
    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn into_course(self) -> Course {
        self.course
    }
}

/// Returns the accessible course once the caller is let in
pub async fn verify_course_access<R>(
    repo: &R,
    gate_keeper: &GateKeeper,
    user: &UserInfo,
    course_id: &CourseId,
    privilege: Option<Privilege>,
) -> CourseResult<CourseAccess>
where
    R: CourseRepository + InstructorRepository,
{
    user.require_instructor()?;

    let course = repo.find_course(course_id).await?;
    let instructor = repo
        .find_instructor_for_google_id(course_id, &user.id)
        .await?;

    gate_keeper.verify_accessible(instructor.as_ref(), course.as_ref(), privilege)?;

    match (course, instructor) {
        (Some(course), Some(_)) => Ok(CourseAccess { course }),
        _ => Err(CourseError::Internal(
            "Gate keeper accepted a missing course or instructor".to_string(),
        )),
    }
}
