//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{OngoingSessionEntry, OngoingSessionsOutput};
use crate::domain::entity::{course::Course, feedback_session::SessionStatus};
use crate::error::{CourseError, CourseResult};

/// Request bodies that can be structurally valid JSON and still incomplete
pub trait RequestBody {
    fn validate(&self) -> CourseResult<()>;
}

fn require<T>(field: &Option<T>, message: &str) -> CourseResult<()> {
    match field {
        Some(_) => Ok(()),
        None => Err(CourseError::InvalidRequestBody(message.to_string())),
    }
}

// ============================================================================
// Course
// ============================================================================

/// Course as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub course_id: String,
    pub course_name: String,
    pub time_zone: String,
    /// Epoch milliseconds
    pub creation_timestamp: i64,
    /// Epoch milliseconds, absent unless binned
    pub deletion_timestamp: Option<i64>,
}

impl From<&Course> for CourseData {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id.to_string(),
            course_name: course.name.to_string(),
            time_zone: course.time_zone.to_string(),
            creation_timestamp: course.created_at.timestamp_millis(),
            deletion_timestamp: course.deleted_at.map(|at| at.timestamp_millis()),
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOutput {
    pub message: String,
}

impl MessageOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Name and time zone, shared by create and save
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBasicRequest {
    pub course_name: Option<String>,
    pub time_zone: Option<String>,
}

impl RequestBody for CourseBasicRequest {
    fn validate(&self) -> CourseResult<()> {
        require(&self.course_name, "Course name should not be null")?;
        require(&self.time_zone, "Time zone should not be null")
    }
}

/// Save course request; the course ID comes from the URL
pub type CourseSaveRequest = CourseBasicRequest;

/// Create course request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreateRequest {
    #[serde(flatten)]
    pub basic: CourseBasicRequest,
    pub course_id: Option<String>,
}

impl RequestBody for CourseCreateRequest {
    fn validate(&self) -> CourseResult<()> {
        self.basic.validate()?;
        require(&self.course_id, "Course ID should not be null")
    }
}

/// Archive request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseArchiveRequest {
    pub archive_status: bool,
}

/// Archive response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseArchiveData {
    pub course_id: String,
    pub is_archived: bool,
}

// ============================================================================
// Ongoing Sessions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingSession {
    pub session_status: SessionStatus,
    pub instructor_google_id: Option<String>,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
    pub creator_email: String,
    pub course_id: String,
    pub feedback_session_name: String,
}

impl From<OngoingSessionEntry> for OngoingSession {
    fn from(entry: OngoingSessionEntry) -> Self {
        Self {
            session_status: entry.status,
            instructor_google_id: entry.instructor_google_id.map(|id| id.to_string()),
            start_time: entry.session.start_time.timestamp_millis(),
            end_time: entry.session.end_time.timestamp_millis(),
            creator_email: entry.session.creator_email,
            course_id: entry.session.course_id.to_string(),
            feedback_session_name: entry.session.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingSessionsData {
    pub total_ongoing_sessions: usize,
    pub total_open_sessions: usize,
    pub total_closed_sessions: usize,
    pub total_awaiting_sessions: usize,
    pub total_institutes: usize,
    /// Institute name to its sessions
    pub sessions: BTreeMap<String, Vec<OngoingSession>>,
}

impl From<OngoingSessionsOutput> for OngoingSessionsData {
    fn from(output: OngoingSessionsOutput) -> Self {
        Self {
            total_ongoing_sessions: output.counts.total,
            total_open_sessions: output.counts.open,
            total_closed_sessions: output.counts.closed,
            total_awaiting_sessions: output.counts.awaiting,
            total_institutes: output.total_institutes,
            sessions: output
                .sessions
                .into_iter()
                .map(|(institute, entries)| {
                    (institute, entries.into_iter().map(OngoingSession::from).collect())
                })
                .collect(),
        }
    }
}
