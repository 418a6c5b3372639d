//! Account Entity
//!
//! A real user account. Registered instructors link to one through their Google ID.

use crate::domain::value_object::google_id::GoogleId;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub google_id: GoogleId,
    pub name: String,
    pub email: String,
    /// Used only for admin reporting
    pub institute: String,
    /// Granted instructor access, even before owning any course
    pub is_instructor: bool,
}
