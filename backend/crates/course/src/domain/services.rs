//! Domain Services
//!
//! Pure helpers behind the ongoing-sessions report.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::domain::entity::{feedback_session::FeedbackSession, instructor::Instructor};
use crate::domain::value_object::course_id::CourseId;

/// Bucket for courses whose institute cannot be resolved
pub const UNKNOWN_INSTITUTION: &str = "Unknown Institution";

/// Per-category counts. Categories are independent, so they need not add up
/// to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounts {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub awaiting: usize,
}

pub fn count_sessions(sessions: &[FeedbackSession], now: DateTime<Utc>) -> SessionCounts {
    sessions.iter().fold(
        SessionCounts::default(),
        |mut counts, session| {
            counts.total += 1;
            if session.is_opened_at(now) {
                counts.open += 1;
            }
            if session.is_closed_at(now) {
                counts.closed += 1;
            }
            if session.is_waiting_to_open_at(now) {
                counts.awaiting += 1;
            }
            counts
        },
    )
}

/// Group by course ID; sessions within a course ordered by start time
pub fn group_by_course(
    sessions: Vec<FeedbackSession>,
) -> BTreeMap<CourseId, Vec<FeedbackSession>> {
    let mut grouped: BTreeMap<CourseId, Vec<FeedbackSession>> = BTreeMap::new();
    for session in sessions {
        grouped
            .entry(session.course_id.clone())
            .or_default()
            .push(session);
    }
    for sessions in grouped.values_mut() {
        sessions.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.name.cmp(&b.name)));
    }
    grouped
}

/// The instructor whose account decides the course's institute
pub fn first_registered_instructor(instructors: &[Instructor]) -> Option<&Instructor> {
    instructors.iter().find(|i| i.is_registered())
}

pub fn count_known_institutes<'a, I>(institutes: I) -> usize
where
    I: IntoIterator<Item = &'a String>,
{
    institutes
        .into_iter()
        .filter(|name| name.as_str() != UNKNOWN_INSTITUTION)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        google_id::GoogleId, privilege::InstructorRole, time_zone::TimeZone,
    };
    use chrono::{Duration, TimeZone as _};
    use kernel::id::FeedbackSessionId;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    fn session(course: &str, name: &str, start: u32, end: u32) -> FeedbackSession {
        FeedbackSession {
            session_id: FeedbackSessionId::new(),
            course_id: CourseId::new(course).unwrap(),
            name: name.to_string(),
            creator_email: "alice@example.com".to_string(),
            time_zone: TimeZone::UTC,
            start_time: at(start),
            end_time: at(end),
            session_visible_from: at(start),
            grace_period: Duration::zero(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_count_sessions() {
        let sessions = vec![
            session("CS1", "open", 9, 11),
            session("CS1", "closed", 6, 8),
            session("CS2", "awaiting", 12, 14),
            session("CS2", "on-the-edge", 10, 12),
        ];
        let counts = count_sessions(&sessions, at(10));
        assert_eq!(
            counts,
            SessionCounts {
                total: 4,
                open: 1,
                closed: 1,
                awaiting: 1,
            }
        );
    }

    #[test]
    fn test_group_by_course_orders_by_start() {
        let grouped = group_by_course(vec![
            session("CS2", "b", 9, 11),
            session("CS1", "late", 12, 13),
            session("CS1", "early", 8, 9),
        ]);
        let keys: Vec<&str> = grouped.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["CS1", "CS2"]);
        let names: Vec<&str> = grouped[&CourseId::new("CS1").unwrap()]
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn test_first_registered_instructor_skips_unregistered() {
        let course_id = CourseId::new("CS1").unwrap();
        let instructors = vec![
            Instructor::new(course_id.clone(), None, "Ghost", "g@example.com", InstructorRole::Tutor),
            Instructor::co_owner(course_id, GoogleId::new("bob").unwrap(), "Bob", "b@example.com"),
        ];
        let first = first_registered_instructor(&instructors).unwrap();
        assert_eq!(first.name, "Bob");
        assert!(first_registered_instructor(&instructors[..1]).is_none());
    }

    #[test]
    fn test_count_known_institutes_excludes_unknown() {
        let names = vec![
            "NUS".to_string(),
            UNKNOWN_INSTITUTION.to_string(),
            "MIT".to_string(),
        ];
        assert_eq!(count_known_institutes(&names), 2);
    }
}
