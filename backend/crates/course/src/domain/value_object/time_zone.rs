//! Time Zone Value Object
//!
//! A course's time zone, restricted to IANA identifiers known to the tz database.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZone(Tz);

impl TimeZone {
    pub const UTC: TimeZone = TimeZone(Tz::UTC);

    pub fn parse(zone: &str) -> AppResult<Self> {
        Tz::from_str(zone.trim()).map(Self).map_err(|_| {
            AppError::bad_request(format!(
                "\"{}\" is not acceptable as a time zone because it is not available as a choice. \
                 The value must be one of the IANA time zone identifiers.",
                zone
            ))
            .with_action("Pick a time zone such as \"UTC\" or \"Asia/Singapore\"")
        })
    }

    /// Database values were validated on the way in; unknown ones degrade to UTC.
    pub fn from_db(zone: &str) -> Self {
        match Tz::from_str(zone) {
            Ok(tz) => Self(tz),
            Err(_) => {
                tracing::warn!(zone = %zone, "Unknown time zone in database, using UTC");
                Self::UTC
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    pub fn tz(&self) -> Tz {
        self.0
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::UTC
    }
}

impl FromStr for TimeZone {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        TimeZone::parse(s)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TimeZone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeZone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeZone::parse(&raw).map_err(|e| serde::de::Error::custom(e.message().to_string()))
    }
}
