//! Instructor roles and privileges
//!
//! A role is a preset of privileges. `Custom` instructors carry whatever
//! privileges were stored for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Course-level privilege checked by the gate keeper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Privilege {
    ModifyCourse,
    ModifyInstructor,
    ModifySession,
    ModifyStudent,
}

impl Privilege {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Privilege::ModifyCourse => "canmodifycourse",
            Privilege::ModifyInstructor => "canmodifyinstructor",
            Privilege::ModifySession => "canmodifysession",
            Privilege::ModifyStudent => "canmodifystudent",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InstructorRole {
    #[default]
    CoOwner,
    Manager,
    Observer,
    Tutor,
    Custom,
}

impl InstructorRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use InstructorRole::*;
        match self {
            CoOwner => "Co-owner",
            Manager => "Manager",
            Observer => "Observer",
            Tutor => "Tutor",
            Custom => "Custom",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use InstructorRole::*;
        match code {
            "Co-owner" => Some(CoOwner),
            "Manager" => Some(Manager),
            "Observer" => Some(Observer),
            "Tutor" => Some(Tutor),
            "Custom" => Some(Custom),
            _ => None,
        }
    }

    /// Preset privileges for this role
    pub const fn default_privileges(&self) -> InstructorPrivileges {
        use InstructorRole::*;
        match self {
            CoOwner => InstructorPrivileges::all(),
            Manager => InstructorPrivileges {
                modify_course: false,
                ..InstructorPrivileges::all()
            },
            Observer | Tutor | Custom => InstructorPrivileges::none(),
        }
    }
}

impl fmt::Display for InstructorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstructorPrivileges {
    pub modify_course: bool,
    pub modify_instructor: bool,
    pub modify_session: bool,
    pub modify_student: bool,
}

impl InstructorPrivileges {
    pub const fn all() -> Self {
        Self {
            modify_course: true,
            modify_instructor: true,
            modify_session: true,
            modify_student: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            modify_course: false,
            modify_instructor: false,
            modify_session: false,
            modify_student: false,
        }
    }

    #[inline]
    pub const fn has(&self, privilege: Privilege) -> bool {
        match privilege {
            Privilege::ModifyCourse => self.modify_course,
            Privilege::ModifyInstructor => self.modify_instructor,
            Privilege::ModifySession => self.modify_session,
            Privilege::ModifyStudent => self.modify_student,
        }
    }
}
