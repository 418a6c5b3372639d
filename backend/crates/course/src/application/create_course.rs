//! Create Course Use Case
//!
//! Creates a course and makes the caller its co-owner.

use std::sync::Arc;

use crate::application::user::UserInfo;
use crate::domain::entity::{course::Course, instructor::Instructor};
use crate::domain::repository::{AccountRepository, CourseRepository};
use crate::domain::value_object::{
    course_id::CourseId, course_name::CourseName, time_zone::TimeZone,
};
use crate::error::{CourseError, CourseResult};

/// Create course input
#[derive(Debug, Clone)]
pub struct CreateCourseInput {
    pub course_id: String,
    pub course_name: String,
    pub time_zone: String,
}

pub struct CreateCourseUseCase<R>
where
    R: CourseRepository + AccountRepository,
{
    repo: Arc<R>,
}

impl<R> CreateCourseUseCase<R>
where
    R: CourseRepository + AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user: &UserInfo, input: CreateCourseInput) -> CourseResult<Course> {
        user.require_instructor()?;

        let course_id = CourseId::new(input.course_id)?;
        let name = CourseName::new(input.course_name)?;
        let time_zone = TimeZone::parse(&input.time_zone)?;

        // Fall back to the Google ID for callers without an account row
        let (instructor_name, instructor_email) = match self.repo.find_account(&user.id).await? {
            Some(account) => (account.name, account.email),
            None => (user.id.to_string(), user.id.to_string()),
        };

        let course = Course::new(course_id, name, time_zone);
        let instructor = Instructor::co_owner(
            course.course_id.clone(),
            user.id.clone(),
            instructor_name,
            instructor_email,
        );

        match self
            .repo
            .create_course_and_instructor(&course, &instructor)
            .await
        {
            Ok(()) => {}
            Err(CourseError::AlreadyExists(_)) => {
                return Err(CourseError::AlreadyExists(format!(
                    "The course ID {} has been used by another course, possibly by some other user. \
                     Please try again with a different course ID.",
                    course.course_id
                )));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            course_id = %course.course_id,
            google_id = %user.id,
            "Course created"
        );
        Ok(course)
    }
}
