//! Course Entity
//!
//! A course is either active or sitting in the recycle bin (`deleted_at` set).
//! Permanent deletion removes the row entirely and is handled by the repository.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    course_id::CourseId, course_name::CourseName, time_zone::TimeZone,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub course_id: CourseId,
    pub name: CourseName,
    pub time_zone: TimeZone,
    pub created_at: DateTime<Utc>,
    /// Set while the course is in the recycle bin
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn new(course_id: CourseId, name: CourseName, time_zone: TimeZone) -> Self {
        Self {
            course_id,
            name,
            time_zone,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn is_in_recycle_bin(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn move_to_recycle_bin(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    pub fn restore_from_recycle_bin(&mut self) {
        self.deleted_at = None;
    }

    pub fn apply(&mut self, update: &CourseUpdate) {
        self.name = update.name.clone();
        self.time_zone = update.time_zone;
    }
}

/// Editable course details. The ID itself is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseUpdate {
    pub course_id: CourseId,
    pub name: CourseName,
    pub time_zone: TimeZone,
}
