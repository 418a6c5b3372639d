//! Course Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, gate keeper
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, login middleware
//!
//! ## Features
//! - Create, save, archive and permanently delete courses
//! - Recycle bin (bin and restore)
//! - Admin report of ongoing feedback sessions grouped by institute
//!
//! ## Access Model
//! - The caller's Google ID is forwarded by the authenticating gateway
//! - Instructor endpoints go through the gate keeper with a course privilege
//! - The ongoing sessions report is admin only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::CourseConfig;
pub use error::{CourseError, CourseResult};
pub use infra::{memory::InMemoryCourseRepository, postgres::PgCourseRepository};
pub use presentation::router::{course_router, course_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
