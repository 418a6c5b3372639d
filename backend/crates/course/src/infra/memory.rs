//! In-Memory Repository Implementation
//!
//! Backs the handler tests and local runs without a database. All tables sit
//! behind one lock so cascades are atomic.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::entity::{
    account::Account,
    course::{Course, CourseUpdate},
    feedback_session::FeedbackSession,
    instructor::Instructor,
};
use crate::domain::repository::{
    AccountRepository, CourseRepository, FeedbackSessionRepository, InstructorRepository,
};
use crate::domain::value_object::{course_id::CourseId, google_id::GoogleId};
use crate::error::{CourseError, CourseResult};

#[derive(Debug, Default)]
struct Tables {
    courses: BTreeMap<CourseId, Course>,
    /// Registration order is insertion order
    instructors: Vec<Instructor>,
    accounts: HashMap<GoogleId, Account>,
    sessions: Vec<FeedbackSession>,
}

#[derive(Clone, Default)]
pub struct InMemoryCourseRepository {
    tables: Arc<RwLock<Tables>>,
    ongoing_queries: Arc<AtomicUsize>,
}

fn course_not_found(course_id: &CourseId) -> CourseError {
    CourseError::NotFound(format!("The course {} does not exist.", course_id))
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    pub async fn insert_course(&self, course: Course) {
        let mut tables = self.tables.write().await;
        tables.courses.insert(course.course_id.clone(), course);
    }

    pub async fn insert_instructor(&self, instructor: Instructor) {
        self.tables.write().await.instructors.push(instructor);
    }

    pub async fn insert_account(&self, account: Account) {
        let mut tables = self.tables.write().await;
        tables.accounts.insert(account.google_id.clone(), account);
    }

    pub async fn insert_session(&self, session: FeedbackSession) {
        self.tables.write().await.sessions.push(session);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub async fn course(&self, course_id: &CourseId) -> Option<Course> {
        self.tables.read().await.courses.get(course_id).cloned()
    }

    pub async fn instructors_of(&self, course_id: &CourseId) -> Vec<Instructor> {
        self.tables
            .read()
            .await
            .instructors
            .iter()
            .filter(|i| &i.course_id == course_id)
            .cloned()
            .collect()
    }

    pub async fn sessions_of(&self, course_id: &CourseId) -> Vec<FeedbackSession> {
        self.tables
            .read()
            .await
            .sessions
            .iter()
            .filter(|s| &s.course_id == course_id)
            .cloned()
            .collect()
    }

    /// Number of `find_ongoing_sessions` calls so far
    pub fn ongoing_query_count(&self) -> usize {
        self.ongoing_queries.load(Ordering::SeqCst)
    }
}

impl CourseRepository for InMemoryCourseRepository {
    async fn find_course(&self, course_id: &CourseId) -> CourseResult<Option<Course>> {
        Ok(self.course(course_id).await)
    }

    async fn create_course_and_instructor(
        &self,
        course: &Course,
        instructor: &Instructor,
    ) -> CourseResult<()> {
        let mut tables = self.tables.write().await;
        if tables.courses.contains_key(&course.course_id) {
            return Err(CourseError::AlreadyExists(format!(
                "Course {} already exists",
                course.course_id
            )));
        }
        tables
            .courses
            .insert(course.course_id.clone(), course.clone());
        tables.instructors.push(instructor.clone());
        Ok(())
    }

    async fn update_course_cascade(&self, update: &CourseUpdate) -> CourseResult<Course> {
        let mut tables = self.tables.write().await;
        let course = tables
            .courses
            .get_mut(&update.course_id)
            .ok_or_else(|| course_not_found(&update.course_id))?;
        course.apply(update);
        let updated = course.clone();

        for session in tables
            .sessions
            .iter_mut()
            .filter(|s| s.course_id == update.course_id)
        {
            session.time_zone = update.time_zone;
        }
        Ok(updated)
    }

    async fn move_course_to_recycle_bin(
        &self,
        course_id: &CourseId,
    ) -> CourseResult<DateTime<Utc>> {
        let mut tables = self.tables.write().await;
        let course = tables
            .courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        let deleted_at = course.deleted_at.unwrap_or_else(Utc::now);
        course.move_to_recycle_bin(deleted_at);
        Ok(deleted_at)
    }

    async fn restore_course_from_recycle_bin(&self, course_id: &CourseId) -> CourseResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?
            .restore_from_recycle_bin();
        Ok(())
    }

    async fn delete_course_cascade(&self, course_id: &CourseId) -> CourseResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .courses
            .remove(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        tables.instructors.retain(|i| &i.course_id != course_id);
        tables.sessions.retain(|s| &s.course_id != course_id);
        Ok(())
    }
}

impl InstructorRepository for InMemoryCourseRepository {
    async fn find_instructor_for_google_id(
        &self,
        course_id: &CourseId,
        google_id: &GoogleId,
    ) -> CourseResult<Option<Instructor>> {
        Ok(self
            .tables
            .read()
            .await
            .instructors
            .iter()
            .find(|i| &i.course_id == course_id && i.google_id.as_ref() == Some(google_id))
            .cloned())
    }

    async fn find_instructors_for_course(
        &self,
        course_id: &CourseId,
    ) -> CourseResult<Vec<Instructor>> {
        Ok(self.instructors_of(course_id).await)
    }

    async fn is_instructor(&self, google_id: &GoogleId) -> CourseResult<bool> {
        let tables = self.tables.read().await;
        let flagged = tables
            .accounts
            .get(google_id)
            .is_some_and(|a| a.is_instructor);
        Ok(flagged
            || tables
                .instructors
                .iter()
                .any(|i| i.google_id.as_ref() == Some(google_id)))
    }

    async fn set_archive_status(
        &self,
        course_id: &CourseId,
        google_id: &GoogleId,
        is_archived: bool,
    ) -> CourseResult<()> {
        let mut tables = self.tables.write().await;
        let instructor = tables
            .instructors
            .iter_mut()
            .find(|i| &i.course_id == course_id && i.google_id.as_ref() == Some(google_id))
            .ok_or_else(|| {
                CourseError::NotFound(format!(
                    "No instructor {} in course {}",
                    google_id, course_id
                ))
            })?;
        instructor.is_archived = is_archived;
        Ok(())
    }
}

impl AccountRepository for InMemoryCourseRepository {
    async fn find_account(&self, google_id: &GoogleId) -> CourseResult<Option<Account>> {
        Ok(self.tables.read().await.accounts.get(google_id).cloned())
    }
}

impl FeedbackSessionRepository for InMemoryCourseRepository {
    async fn find_ongoing_sessions(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CourseResult<Vec<FeedbackSession>> {
        self.ongoing_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .read()
            .await
            .sessions
            .iter()
            .filter(|s| !s.is_deleted() && s.overlaps(start, end))
            .cloned()
            .collect())
    }
}
