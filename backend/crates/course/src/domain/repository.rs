//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.
//! Cascaded mutations must be atomic from the caller's point of view.

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    account::Account,
    course::{Course, CourseUpdate},
    feedback_session::FeedbackSession,
    instructor::Instructor,
};
use crate::domain::value_object::{course_id::CourseId, google_id::GoogleId};
use crate::error::CourseResult;

/// Course repository trait
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    /// Find a course by ID, binned or not
    async fn find_course(&self, course_id: &CourseId) -> CourseResult<Option<Course>>;

    /// Insert a course together with its first instructor.
    /// Fails with `AlreadyExists` when the course ID is taken.
    async fn create_course_and_instructor(
        &self,
        course: &Course,
        instructor: &Instructor,
    ) -> CourseResult<()>;

    /// Update name and time zone, propagating the time zone to the course's
    /// feedback sessions. Returns the updated course.
    async fn update_course_cascade(&self, update: &CourseUpdate) -> CourseResult<Course>;

    /// Soft-delete. Returns the deletion timestamp.
    async fn move_course_to_recycle_bin(&self, course_id: &CourseId)
        -> CourseResult<DateTime<Utc>>;

    async fn restore_course_from_recycle_bin(&self, course_id: &CourseId) -> CourseResult<()>;

    /// Remove the course, its instructors and its feedback sessions
    async fn delete_course_cascade(&self, course_id: &CourseId) -> CourseResult<()>;
}

/// Instructor repository trait
#[trait_variant::make(InstructorRepository: Send)]
pub trait LocalInstructorRepository {
    async fn find_instructor_for_google_id(
        &self,
        course_id: &CourseId,
        google_id: &GoogleId,
    ) -> CourseResult<Option<Instructor>>;

    /// All instructors of a course in registration order
    async fn find_instructors_for_course(&self, course_id: &CourseId)
        -> CourseResult<Vec<Instructor>>;

    /// Account flagged as instructor, or linked to at least one instructor record
    async fn is_instructor(&self, google_id: &GoogleId) -> CourseResult<bool>;

    async fn set_archive_status(
        &self,
        course_id: &CourseId,
        google_id: &GoogleId,
        is_archived: bool,
    ) -> CourseResult<()>;
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    async fn find_account(&self, google_id: &GoogleId) -> CourseResult<Option<Account>>;
}

/// Feedback session repository trait
#[trait_variant::make(FeedbackSessionRepository: Send)]
pub trait LocalFeedbackSessionRepository {
    /// Non-deleted sessions overlapping `[start, end]`
    async fn find_ongoing_sessions(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CourseResult<Vec<FeedbackSession>>;
}

/// Everything the course handlers need from storage
pub trait CourseStore:
    CourseRepository
    + InstructorRepository
    + AccountRepository
    + FeedbackSessionRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CourseStore for T where
    T: CourseRepository
        + InstructorRepository
        + AccountRepository
        + FeedbackSessionRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
