//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::CourseAppState;
pub use middleware::require_login;
pub use router::{course_router, course_router_generic};
