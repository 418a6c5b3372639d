//! Domain Entities

pub mod account;
pub mod course;
pub mod feedback_session;
pub mod instructor;
