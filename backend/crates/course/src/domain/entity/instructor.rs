//! Instructor Entity
//!
//! An instructor record belongs to exactly one course. It is "registered"
//! once linked to an account through a Google ID.

use kernel::id::InstructorId;

use crate::domain::value_object::{
    course_id::CourseId,
    google_id::GoogleId,
    privilege::{InstructorPrivileges, InstructorRole, Privilege},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Instructor {
    pub instructor_id: InstructorId,
    pub course_id: CourseId,
    pub google_id: Option<GoogleId>,
    pub name: String,
    pub email: String,
    pub role: InstructorRole,
    pub privileges: InstructorPrivileges,
    /// Per-instructor archive flag; other instructors of the course are unaffected
    pub is_archived: bool,
}

impl Instructor {
    pub fn new(
        course_id: CourseId,
        google_id: Option<GoogleId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: InstructorRole,
    ) -> Self {
        Self {
            instructor_id: InstructorId::new(),
            course_id,
            google_id,
            name: name.into(),
            email: email.into(),
            privileges: role.default_privileges(),
            role,
            is_archived: false,
        }
    }

    /// Registered co-owner, as created together with a new course
    pub fn co_owner(
        course_id: CourseId,
        google_id: GoogleId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::new(course_id, Some(google_id), name, email, InstructorRole::CoOwner)
    }

    pub fn is_registered(&self) -> bool {
        self.google_id.is_some()
    }

    pub fn has_privilege(&self, privilege: Privilege) -> bool {
        self.privileges.has(privilege)
    }
}
