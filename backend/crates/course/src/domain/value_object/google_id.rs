//! Google ID Value Object
//!
//! Identity of a logged-in user as asserted by the authentication gateway.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const GOOGLE_ID_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoogleId(String);

impl GoogleId {
    pub fn new(google_id: impl Into<String>) -> AppResult<Self> {
        let google_id = google_id.into().trim().to_string();

        if google_id.is_empty() {
            return Err(AppError::bad_request("Google ID cannot be empty"));
        }
        if google_id.len() > GOOGLE_ID_MAX_LENGTH {
            return Err(AppError::bad_request("Google ID is too long"));
        }
        if google_id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request("Google ID cannot contain whitespace"));
        }

        Ok(Self(google_id))
    }

    pub fn from_db(google_id: impl Into<String>) -> Self {
        Self(google_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoogleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
