//! PostgreSQL Repository Implementations

use chrono::{DateTime, Duration, Utc};
use kernel::id::{FeedbackSessionId, InstructorId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    account::Account,
    course::{Course, CourseUpdate},
    feedback_session::FeedbackSession,
    instructor::Instructor,
};
use crate::domain::repository::{
    AccountRepository, CourseRepository, FeedbackSessionRepository, InstructorRepository,
};
use crate::domain::value_object::{
    course_id::CourseId,
    course_name::CourseName,
    google_id::GoogleId,
    privilege::{InstructorPrivileges, InstructorRole},
    time_zone::TimeZone,
};
use crate::error::{CourseError, CourseResult};

/// PostgreSQL-backed course repository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn course_not_found(course_id: &CourseId) -> CourseError {
    CourseError::NotFound(format!("The course {} does not exist.", course_id))
}

// ============================================================================
// Course Repository Implementation
// ============================================================================

impl CourseRepository for PgCourseRepository {
    async fn find_course(&self, course_id: &CourseId) -> CourseResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT course_id, name, time_zone, created_at, deleted_at
            FROM courses
            WHERE course_id = $1
            "#,
        )
        .bind(course_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseRow::into_course))
    }

    async fn create_course_and_instructor(
        &self,
        course: &Course,
        instructor: &Instructor,
    ) -> CourseResult<()> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO courses (course_id, name, time_zone, created_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(course.course_id.as_str())
        .bind(course.name.as_str())
        .bind(course.time_zone.as_str())
        .bind(course.created_at)
        .bind(course.deleted_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(CourseError::AlreadyExists(format!(
                    "Course {} already exists",
                    course.course_id
                )));
            }
            Err(e) => return Err(e.into()),
        }

        insert_instructor(&mut tx, instructor).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_course_cascade(&self, update: &CourseUpdate) -> CourseResult<Course> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET name = $2, time_zone = $3
            WHERE course_id = $1
            RETURNING course_id, name, time_zone, created_at, deleted_at
            "#,
        )
        .bind(update.course_id.as_str())
        .bind(update.name.as_str())
        .bind(update.time_zone.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| course_not_found(&update.course_id))?;

        let sessions = sqlx::query("UPDATE feedback_sessions SET time_zone = $2 WHERE course_id = $1")
            .bind(update.course_id.as_str())
            .bind(update.time_zone.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            course_id = %update.course_id,
            sessions_updated = sessions,
            "Cascaded course time zone to sessions"
        );

        Ok(row.into_course())
    }

    async fn move_course_to_recycle_bin(
        &self,
        course_id: &CourseId,
    ) -> CourseResult<DateTime<Utc>> {
        // Re-binning keeps the original timestamp
        let deleted_at = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            r#"
            UPDATE courses
            SET deleted_at = COALESCE(deleted_at, now())
            WHERE course_id = $1
            RETURNING deleted_at
            "#,
        )
        .bind(course_id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .flatten();

        deleted_at.ok_or_else(|| course_not_found(course_id))
    }

    async fn restore_course_from_recycle_bin(&self, course_id: &CourseId) -> CourseResult<()> {
        let affected = sqlx::query("UPDATE courses SET deleted_at = NULL WHERE course_id = $1")
            .bind(course_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(course_not_found(course_id));
        }
        Ok(())
    }

    async fn delete_course_cascade(&self, course_id: &CourseId) -> CourseResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM feedback_sessions WHERE course_id = $1")
            .bind(course_id.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM instructors WHERE course_id = $1")
            .bind(course_id.as_str())
            .execute(&mut *tx)
            .await?;

        let affected = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(course_id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(course_not_found(course_id));
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_instructor(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    instructor: &Instructor,
) -> CourseResult<()> {
    sqlx::query(
        r#"
        INSERT INTO instructors (
            instructor_id,
            course_id,
            google_id,
            name,
            email,
            role,
            can_modify_course,
            can_modify_instructor,
            can_modify_session,
            can_modify_student,
            is_archived
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(instructor.instructor_id.as_uuid())
    .bind(instructor.course_id.as_str())
    .bind(instructor.google_id.as_ref().map(GoogleId::as_str))
    .bind(&instructor.name)
    .bind(&instructor.email)
    .bind(instructor.role.code())
    .bind(instructor.privileges.modify_course)
    .bind(instructor.privileges.modify_instructor)
    .bind(instructor.privileges.modify_session)
    .bind(instructor.privileges.modify_student)
    .bind(instructor.is_archived)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// ============================================================================
// Instructor Repository Implementation
// ============================================================================

const INSTRUCTOR_COLUMNS: &str = r#"
    instructor_id,
    course_id,
    google_id,
    name,
    email,
    role,
    can_modify_course,
    can_modify_instructor,
    can_modify_session,
    can_modify_student,
    is_archived
"#;

impl InstructorRepository for PgCourseRepository {
    async fn find_instructor_for_google_id(
        &self,
        course_id: &CourseId,
        google_id: &GoogleId,
    ) -> CourseResult<Option<Instructor>> {
        let sql = format!(
            "SELECT {} FROM instructors WHERE course_id = $1 AND google_id = $2",
            INSTRUCTOR_COLUMNS
        );
        let row = sqlx::query_as::<_, InstructorRow>(&sql)
            .bind(course_id.as_str())
            .bind(google_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(InstructorRow::into_instructor).transpose()
    }

    async fn find_instructors_for_course(
        &self,
        course_id: &CourseId,
    ) -> CourseResult<Vec<Instructor>> {
        let sql = format!(
            "SELECT {} FROM instructors WHERE course_id = $1 ORDER BY created_at, instructor_id",
            INSTRUCTOR_COLUMNS
        );
        let rows = sqlx::query_as::<_, InstructorRow>(&sql)
            .bind(course_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(InstructorRow::into_instructor).collect()
    }

    async fn is_instructor(&self, google_id: &GoogleId) -> CourseResult<bool> {
        let is_instructor: bool = sqlx::query_scalar(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM accounts WHERE google_id = $1 AND is_instructor)
                OR EXISTS (SELECT 1 FROM instructors WHERE google_id = $1)
            "#,
        )
        .bind(google_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(is_instructor)
    }

    async fn set_archive_status(
        &self,
        course_id: &CourseId,
        google_id: &GoogleId,
        is_archived: bool,
    ) -> CourseResult<()> {
        let affected = sqlx::query(
            "UPDATE instructors SET is_archived = $3 WHERE course_id = $1 AND google_id = $2",
        )
        .bind(course_id.as_str())
        .bind(google_id.as_str())
        .bind(is_archived)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(CourseError::NotFound(format!(
                "No instructor {} in course {}",
                google_id, course_id
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgCourseRepository {
    async fn find_account(&self, google_id: &GoogleId) -> CourseResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT google_id, name, email, institute, is_instructor
            FROM accounts
            WHERE google_id = $1
            "#,
        )
        .bind(google_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }
}

// ============================================================================
// Feedback Session Repository Implementation
// ============================================================================

impl FeedbackSessionRepository for PgCourseRepository {
    async fn find_ongoing_sessions(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CourseResult<Vec<FeedbackSession>> {
        let rows = sqlx::query_as::<_, FeedbackSessionRow>(
            r#"
            SELECT
                session_id,
                course_id,
                name,
                creator_email,
                time_zone,
                start_time,
                end_time,
                session_visible_from,
                grace_period_minutes,
                deleted_at
            FROM feedback_sessions
            WHERE deleted_at IS NULL
              AND start_time <= $2
              AND end_time >= $1
            ORDER BY course_id, start_time
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FeedbackSessionRow::into_session).collect())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    course_id: String,
    name: String,
    time_zone: String,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            course_id: CourseId::from_db(self.course_id),
            name: CourseName::from_db(self.name),
            time_zone: TimeZone::from_db(&self.time_zone),
            created_at: self.created_at,
            deleted_at: self.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InstructorRow {
    instructor_id: Uuid,
    course_id: String,
    google_id: Option<String>,
    name: String,
    email: String,
    role: String,
    can_modify_course: bool,
    can_modify_instructor: bool,
    can_modify_session: bool,
    can_modify_student: bool,
    is_archived: bool,
}

impl InstructorRow {
    fn into_instructor(self) -> CourseResult<Instructor> {
        let role = InstructorRole::from_code(&self.role)
            .ok_or_else(|| CourseError::Internal(format!("Invalid instructor role: {}", self.role)))?;

        Ok(Instructor {
            instructor_id: InstructorId::from_uuid(self.instructor_id),
            course_id: CourseId::from_db(self.course_id),
            google_id: self.google_id.map(GoogleId::from_db),
            name: self.name,
            email: self.email,
            role,
            privileges: InstructorPrivileges {
                modify_course: self.can_modify_course,
                modify_instructor: self.can_modify_instructor,
                modify_session: self.can_modify_session,
                modify_student: self.can_modify_student,
            },
            is_archived: self.is_archived,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    google_id: String,
    name: String,
    email: String,
    institute: String,
    is_instructor: bool,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            google_id: GoogleId::from_db(self.google_id),
            name: self.name,
            email: self.email,
            institute: self.institute,
            is_instructor: self.is_instructor,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FeedbackSessionRow {
    session_id: Uuid,
    course_id: String,
    name: String,
    creator_email: String,
    time_zone: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    session_visible_from: DateTime<Utc>,
    grace_period_minutes: i32,
    deleted_at: Option<DateTime<Utc>>,
}

impl FeedbackSessionRow {
    fn into_session(self) -> FeedbackSession {
        FeedbackSession {
            session_id: FeedbackSessionId::from_uuid(self.session_id),
            course_id: CourseId::from_db(self.course_id),
            name: self.name,
            creator_email: self.creator_email,
            time_zone: TimeZone::from_db(&self.time_zone),
            start_time: self.start_time,
            end_time: self.end_time,
            session_visible_from: self.session_visible_from,
            grace_period: Duration::minutes(i64::from(self.grace_period_minutes)),
            deleted_at: self.deleted_at,
        }
    }
}
