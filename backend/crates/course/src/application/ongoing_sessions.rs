//! Ongoing Sessions Use Case
//!
//! Admin report of feedback sessions overlapping a time window, grouped by
//! the institute of each course.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::user::UserInfo;
use crate::domain::entity::feedback_session::{FeedbackSession, SessionStatus};
use crate::domain::repository::{
    AccountRepository, FeedbackSessionRepository, InstructorRepository,
};
use crate::domain::services::{
    self, SessionCounts, UNKNOWN_INSTITUTION, count_known_institutes, count_sessions,
};
use crate::domain::value_object::google_id::GoogleId;
use crate::error::{CourseError, CourseResult};

/// Validated filter window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OngoingSessionsInput {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl OngoingSessionsInput {
    /// Parse the raw `starttime`/`endtime` query values (epoch milliseconds)
    pub fn parse(raw_start: Option<&str>, raw_end: Option<&str>) -> CourseResult<Self> {
        let raw_start = raw_start.ok_or_else(|| CourseError::missing_parameter("starttime"))?;
        let start = parse_epoch_millis(raw_start)
            .ok_or_else(|| CourseError::InvalidParameter("Invalid startTime parameter".into()))?;

        let raw_end = raw_end.ok_or_else(|| CourseError::missing_parameter("endtime"))?;
        let end = parse_epoch_millis(raw_end)
            .ok_or_else(|| CourseError::InvalidParameter("Invalid endTime parameter".into()))?;

        if start > end {
            return Err(CourseError::InvalidParameter(
                "The filter range is not valid. End time should be after start time.".into(),
            ));
        }

        Ok(Self { start, end })
    }
}

/// Earliest instant Postgres can store (4714-11-24 BC)
const EARLIEST_MILLIS: i64 = -210_866_803_200_000;

/// Any `i64` is accepted; values outside the storable range are clamped.
fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis = raw.trim().parse::<i64>().ok()?;
    Some(
        DateTime::from_timestamp_millis(millis.max(EARLIEST_MILLIS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    )
}

/// One reported session
#[derive(Debug, Clone)]
pub struct OngoingSessionEntry {
    pub status: SessionStatus,
    /// Owner of the account the institute was resolved from
    pub instructor_google_id: Option<GoogleId>,
    pub session: FeedbackSession,
}

#[derive(Debug, Clone)]
pub struct OngoingSessionsOutput {
    pub counts: SessionCounts,
    pub total_institutes: usize,
    /// Institute name to sessions, institutes in lexical order
    pub sessions: BTreeMap<String, Vec<OngoingSessionEntry>>,
}

pub struct OngoingSessionsUseCase<R>
where
    R: FeedbackSessionRepository + InstructorRepository + AccountRepository,
{
    repo: Arc<R>,
}

impl<R> OngoingSessionsUseCase<R>
where
    R: FeedbackSessionRepository + InstructorRepository + AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user: &UserInfo,
        input: OngoingSessionsInput,
    ) -> CourseResult<OngoingSessionsOutput> {
        self.execute_at(user, input, Utc::now()).await
    }

    /// Same as [`Self::execute`] with an explicit classification instant
    pub async fn execute_at(
        &self,
        user: &UserInfo,
        input: OngoingSessionsInput,
        now: DateTime<Utc>,
    ) -> CourseResult<OngoingSessionsOutput> {
        user.require_admin()?;

        let ongoing = self
            .repo
            .find_ongoing_sessions(input.start, input.end)
            .await?;
        let counts = count_sessions(&ongoing, now);

        let mut by_institute: BTreeMap<String, Vec<OngoingSessionEntry>> = BTreeMap::new();
        for (course_id, sessions) in services::group_by_course(ongoing) {
            let instructors = self.repo.find_instructors_for_course(&course_id).await?;
            let account = match services::first_registered_instructor(&instructors)
                .and_then(|i| i.google_id.as_ref())
            {
                Some(google_id) => self.repo.find_account(google_id).await?,
                None => None,
            };

            let (institute, instructor_google_id) = match account {
                Some(account) => (account.institute, Some(account.google_id)),
                None => (UNKNOWN_INSTITUTION.to_string(), None),
            };

            by_institute
                .entry(institute)
                .or_default()
                .extend(sessions.into_iter().map(|session| OngoingSessionEntry {
                    status: session.status_at(now),
                    instructor_google_id: instructor_google_id.clone(),
                    session,
                }));
        }

        let total_institutes = count_known_institutes(by_institute.keys());

        tracing::info!(
            start = %input.start,
            end = %input.end,
            total = counts.total,
            institutes = total_institutes,
            "Ongoing sessions report built"
        );

        Ok(OngoingSessionsOutput {
            counts,
            total_institutes,
            sessions: by_institute,
        })
    }
}
