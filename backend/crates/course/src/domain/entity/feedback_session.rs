//! Feedback Session Entity
//!
//! Lifecycle predicates take `now` explicitly and are never cached. The three
//! predicates are independent: at exactly `start_time` a session is neither
//! opened nor waiting, and at exactly `end_time + grace_period` it is neither
//! opened nor closed.

use chrono::{DateTime, Duration, Utc};
use kernel::id::FeedbackSessionId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_object::{course_id::CourseId, time_zone::TimeZone};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackSession {
    pub session_id: FeedbackSessionId,
    pub course_id: CourseId,
    /// Unique within the course
    pub name: String,
    pub creator_email: String,
    /// Mirrors the owning course's time zone
    pub time_zone: TimeZone,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_visible_from: DateTime<Utc>,
    pub grace_period: Duration,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FeedbackSession {
    /// Submissions are accepted until this instant
    #[inline]
    pub fn closes_at(&self) -> DateTime<Utc> {
        self.end_time + self.grace_period
    }

    pub fn is_opened_at(&self, now: DateTime<Utc>) -> bool {
        now > self.start_time && now < self.closes_at()
    }

    pub fn is_closed_at(&self, now: DateTime<Utc>) -> bool {
        now > self.closes_at()
    }

    pub fn is_waiting_to_open_at(&self, now: DateTime<Utc>) -> bool {
        now < self.start_time
    }

    /// Single label for reporting. Sessions sitting exactly on a boundary
    /// fall through to `Closed`.
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if self.is_opened_at(now) {
            SessionStatus::Open
        } else if self.is_waiting_to_open_at(now) {
            SessionStatus::Awaiting
        } else {
            SessionStatus::Closed
        }
    }

    /// Closed-interval overlap with `[start, end]`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time <= end && self.end_time >= start
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Open,
    Awaiting,
    Closed,
}

impl SessionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Open => "Open",
            SessionStatus::Awaiting => "Awaiting",
            SessionStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
