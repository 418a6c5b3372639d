//! Domain Layer
//!
//! Entities, value objects, repository traits and the gate keeper.

pub mod entity;
pub mod gate_keeper;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{
    account::Account,
    course::{Course, CourseUpdate},
    feedback_session::{FeedbackSession, SessionStatus},
    instructor::Instructor,
};
pub use gate_keeper::GateKeeper;
pub use repository::{
    AccountRepository, CourseRepository, CourseStore, FeedbackSessionRepository,
    InstructorRepository,
};
