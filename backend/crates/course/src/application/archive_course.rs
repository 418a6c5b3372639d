//! Archive Course Use Case
//!
//! Archiving is per instructor: it only hides the course for the caller.

use std::sync::Arc;

use crate::application::access::{CourseAccess, verify_course_access};
use crate::application::user::UserInfo;
use crate::domain::gate_keeper::GateKeeper;
use crate::domain::repository::{CourseRepository, InstructorRepository};
use crate::domain::value_object::course_id::CourseId;
use crate::error::CourseResult;

pub struct ArchiveCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    repo: Arc<R>,
    gate_keeper: GateKeeper,
}

impl<R> ArchiveCourseUseCase<R>
where
    R: CourseRepository + InstructorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            gate_keeper: GateKeeper::new(),
        }
    }

    /// Any instructor of the course may archive it for themselves
    pub async fn authorize(
        &self,
        user: &UserInfo,
        course_id: &CourseId,
    ) -> CourseResult<CourseAccess> {
        verify_course_access(self.repo.as_ref(), &self.gate_keeper, user, course_id, None).await
    }

    /// Returns the archive status now in effect
    pub async fn execute(
        &self,
        user: &UserInfo,
        access: &CourseAccess,
        archive_status: bool,
    ) -> CourseResult<bool> {
        let course_id = &access.course().course_id;
        self.repo
            .set_archive_status(course_id, &user.id, archive_status)
            .await?;

        tracing::info!(
            course_id = %course_id,
            google_id = %user.id,
            is_archived = archive_status,
            "Course archive status changed"
        );
        Ok(archive_status)
    }
}
