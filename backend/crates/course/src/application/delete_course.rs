//! Delete Course Use Case
//!
//! Permanent deletion. Works the same whether or not the course is binned.

use std::sync::Arc;

use crate::application::access::verify_course_access;
use crate::application::user::UserInfo;
use crate::domain::gate_keeper::GateKeeper;
use crate::domain::repository::{CourseRepository, InstructorRepository};
use crate::domain::value_object::{course_id::CourseId, privilege::Privilege};
use crate::error::CourseResult;

pub struct DeleteCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    repo: Arc<R>,
    gate_keeper: GateKeeper,
}

impl<R> DeleteCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            gate_keeper: GateKeeper::new(),
        }
    }

    pub async fn execute(&self, user: &UserInfo, course_id: &CourseId) -> CourseResult<()> {
        let course = verify_course_access(
            self.repo.as_ref(),
            &self.gate_keeper,
            user,
            course_id,
            Some(Privilege::ModifyCourse),
        )
        .await?
        .into_course();

        self.repo.delete_course_cascade(course_id).await?;

        tracing::info!(
            course_id = %course_id,
            google_id = %user.id,
            was_binned = course.is_in_recycle_bin(),
            "Course permanently deleted"
        );
        Ok(())
    }
}
