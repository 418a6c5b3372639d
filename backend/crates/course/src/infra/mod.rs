//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCourseRepository;
pub use postgres::PgCourseRepository;
