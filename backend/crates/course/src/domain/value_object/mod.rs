//! Value Object Module

pub mod course_id;
pub mod course_name;
pub mod google_id;
pub mod privilege;
pub mod time_zone;
