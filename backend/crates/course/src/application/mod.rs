//! Application Layer
//!
//! Use cases and application services.

pub mod access;
pub mod archive_course;
pub mod bin_course;
pub mod config;
pub mod create_course;
pub mod delete_course;
pub mod ongoing_sessions;
pub mod restore_course;
pub mod save_course;
pub mod user;

// Re-exports
pub use archive_course::ArchiveCourseUseCase;
pub use bin_course::BinCourseUseCase;
pub use config::CourseConfig;
pub use create_course::{CreateCourseInput, CreateCourseUseCase};
pub use delete_course::DeleteCourseUseCase;
pub use ongoing_sessions::{
    OngoingSessionEntry, OngoingSessionsInput, OngoingSessionsOutput, OngoingSessionsUseCase,
};
pub use restore_course::RestoreCourseUseCase;
pub use save_course::{SaveCourseInput, SaveCourseUseCase};
pub use user::{ResolveUserUseCase, UserInfo};
