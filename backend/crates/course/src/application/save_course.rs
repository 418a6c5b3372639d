//! Save Course Use Case
//!
//! Updates a course's name and time zone. Access is granted first
//! ([`SaveCourseUseCase::authorize`]); the time zone is checked before
//! anything is written.

use std::sync::Arc;

use crate::application::access::{CourseAccess, verify_course_access};
use crate::application::user::UserInfo;
use crate::domain::entity::course::{Course, CourseUpdate};
use crate::domain::gate_keeper::GateKeeper;
use crate::domain::repository::{CourseRepository, InstructorRepository};
use crate::domain::value_object::{
    course_id::CourseId, course_name::CourseName, privilege::Privilege, time_zone::TimeZone,
};
use crate::error::CourseResult;

/// Save course input
#[derive(Debug, Clone)]
pub struct SaveCourseInput {
    pub course_name: String,
    pub time_zone: String,
}

pub struct SaveCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    repo: Arc<R>,
    gate_keeper: GateKeeper,
}

impl<R> SaveCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            gate_keeper: GateKeeper::new(),
        }
    }

    /// Requires the modify-course privilege
    pub async fn authorize(
        &self,
        user: &UserInfo,
        course_id: &CourseId,
    ) -> CourseResult<CourseAccess> {
        verify_course_access(
            self.repo.as_ref(),
            &self.gate_keeper,
            user,
            course_id,
            Some(Privilege::ModifyCourse),
        )
        .await
    }

    /// Returns the updated course
    pub async fn execute(
        &self,
        access: CourseAccess,
        input: SaveCourseInput,
    ) -> CourseResult<Course> {
        let time_zone = TimeZone::parse(&input.time_zone)?;
        let name = CourseName::new(input.course_name)?;

        let update = CourseUpdate {
            course_id: access.into_course().course_id,
            name,
            time_zone,
        };
        let course = self.repo.update_course_cascade(&update).await?;

        tracing::info!(
            course_id = %course.course_id,
            time_zone = %course.time_zone,
            "Course details updated"
        );
        Ok(course)
    }
}
