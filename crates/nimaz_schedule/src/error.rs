//! Error types for schedule orchestration.

use chrono::{DateTime, Utc};
use thiserror::Error;

use nimaz_base::MalformedScheduleError;

/// Errors from building or bracketing daily schedules.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleError {
    /// The instant provider failed for a date. The provider's message is
    /// part of this one, so it is not also exposed as the source.
    #[error("prayer time computation failed: {0}")]
    Provider(Box<dyn std::error::Error + Send + Sync + 'static>),
    /// Computed or adjusted instants are not strictly increasing.
    #[error("malformed schedule: {0}")]
    Malformed(#[from] MalformedScheduleError),
    /// A date outside chrono's range, or an invalid year/month.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Consecutive schedules do not bracket the instant.
    #[error("no prayer day brackets {0}")]
    NoBracket(DateTime<Utc>),
}

impl ScheduleError {
    pub(crate) fn provider<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider(Box::new(e))
    }
}
