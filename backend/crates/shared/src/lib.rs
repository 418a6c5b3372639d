//! Shared Kernel
//!
//! Vocabulary every bounded context agrees on:
//! - [`error::kind::ErrorKind`] and the unified [`error::app_error::AppError`]
//! - conversions from library errors into `AppError`
//! - typed identifiers ([`id::Id`])
//!
//! Keep this crate small. Anything course-specific belongs in the `course` crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
