//! Resolve User Use Case
//!
//! Turns the gateway-supplied Google ID into a [`UserInfo`] carrying the
//! caller's authentication level.

use std::sync::Arc;

use crate::application::config::CourseConfig;
use crate::domain::repository::InstructorRepository;
use crate::domain::value_object::google_id::GoogleId;
use crate::error::{CourseError, CourseResult};

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: GoogleId,
    pub is_admin: bool,
    pub is_instructor: bool,
}

impl UserInfo {
    pub fn require_instructor(&self) -> CourseResult<()> {
        if self.is_instructor {
            Ok(())
        } else {
            Err(CourseError::Forbidden(
                "Instructor privilege is required to access this resource.".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> CourseResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(CourseError::Forbidden(
                "Admin privilege is required to access this resource.".to_string(),
            ))
        }
    }
}

pub struct ResolveUserUseCase<I>
where
    I: InstructorRepository,
{
    instructor_repo: Arc<I>,
    config: Arc<CourseConfig>,
}

impl<I> ResolveUserUseCase<I>
where
    I: InstructorRepository,
{
    pub fn new(instructor_repo: Arc<I>, config: Arc<CourseConfig>) -> Self {
        Self {
            instructor_repo,
            config,
        }
    }

    /// `raw_google_id` is the header value, if any
    pub async fn execute(&self, raw_google_id: Option<&str>) -> CourseResult<UserInfo> {
        let raw = raw_google_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(CourseError::NotLoggedIn)?;

        let id = GoogleId::new(raw).map_err(|e| {
            tracing::debug!(error = %e, "Rejected malformed Google ID header");
            CourseError::NotLoggedIn
        })?;

        let is_admin = self.config.is_admin(id.as_str());
        let is_instructor = self.instructor_repo.is_instructor(&id).await?;

        Ok(UserInfo {
            id,
            is_admin,
            is_instructor,
        })
    }
}
