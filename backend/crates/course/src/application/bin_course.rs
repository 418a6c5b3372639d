//! Bin Course Use Case
//!
//! Moves a course into the recycle bin.

use std::sync::Arc;

use crate::application::access::verify_course_access;
use crate::application::user::UserInfo;
use crate::domain::entity::course::Course;
use crate::domain::gate_keeper::GateKeeper;
use crate::domain::repository::{CourseRepository, InstructorRepository};
use crate::domain::value_object::{course_id::CourseId, privilege::Privilege};
use crate::error::CourseResult;

pub struct BinCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    repo: Arc<R>,
    gate_keeper: GateKeeper,
}

impl<R> BinCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            gate_keeper: GateKeeper::new(),
        }
    }

    /// Returns the course as it was before binning
    pub async fn execute(&self, user: &UserInfo, course_id: &CourseId) -> CourseResult<Course> {
        let course = verify_course_access(
            self.repo.as_ref(),
            &self.gate_keeper,
            user,
            course_id,
            Some(Privilege::ModifyCourse),
        )
        .await?
        .into_course();

        let deleted_at = self.repo.move_course_to_recycle_bin(course_id).await?;

        tracing::info!(
            course_id = %course_id,
            google_id = %user.id,
            deleted_at = %deleted_at,
            "Course moved to recycle bin"
        );

        Ok(course)
    }
}
