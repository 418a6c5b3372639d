//! Application Configuration
//!
//! Configuration for the course application layer.

use std::collections::HashSet;

/// Default header carrying the caller's Google ID, set by the upstream gateway
pub const DEFAULT_GOOGLE_ID_HEADER: &str = "X-Google-Id";

pub const ENV_DEV_MODE: &str = "COURSE_DEV_MODE";
pub const ENV_ADMIN_GOOGLE_IDS: &str = "ADMIN_GOOGLE_IDS";
pub const ENV_GOOGLE_ID_HEADER: &str = "GOOGLE_ID_HEADER";

/// Course application configuration
#[derive(Debug, Clone)]
pub struct CourseConfig {
    /// Header the authenticating gateway forwards the Google ID in
    pub google_id_header: String,
    /// Google IDs granted admin access
    pub admin_google_ids: HashSet<String>,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            google_id_header: DEFAULT_GOOGLE_ID_HEADER.to_string(),
            admin_google_ids: HashSet::new(),
        }
    }
}

impl CourseConfig {
    /// Create config for development (`admin` is an admin)
    pub fn development() -> Self {
        Self::default().with_admins(["admin"])
    }

    /// Build from environment-style variables.
    ///
    /// The development admin is only granted when `COURSE_DEV_MODE` is set
    /// to `true` or `1`, whatever the build profile.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dev_mode = lookup(ENV_DEV_MODE)
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        let mut config = if dev_mode {
            Self::development()
        } else {
            Self::default()
        };

        if let Some(raw) = lookup(ENV_ADMIN_GOOGLE_IDS) {
            config = config.with_admins(Self::parse_admin_ids(&raw));
        }

        if let Some(header) = lookup(ENV_GOOGLE_ID_HEADER) {
            if !header.trim().is_empty() {
                config = config.with_google_id_header(header.trim());
            }
        }

        config
    }

    pub fn with_admins<I, S>(mut self, google_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_google_ids
            .extend(google_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_google_id_header(mut self, header: impl Into<String>) -> Self {
        self.google_id_header = header.into();
        self
    }

    /// Parse a comma separated admin list such as `ADMIN_GOOGLE_IDS`
    pub fn parse_admin_ids(raw: &str) -> HashSet<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_admin(&self, google_id: &str) -> bool {
        self.admin_google_ids.contains(google_id)
    }
}
