//! Daily prayer schedule orchestration.
//!
//! This crate provides:
//! - [`schedule_for_date`]: provider output adjusted, rounded and validated
//! - [`ScheduleCache`]: bounded memo keyed by date, location and configuration
//! - [`prayer_day_at`] / [`resolve_at`]: the Fajr-to-Fajr bracket containing
//!   an instant, and the prayer state within it
//! - [`month_schedules`]: one schedule per day of a month

pub mod cache;
pub mod daily;
pub mod day;
pub mod error;
pub mod month;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{DEFAULT_CAPACITY, ScheduleCache, ScheduleKey};
pub use daily::schedule_for_date;
pub use day::{PrayerDay, prayer_day_at, resolve_at};
pub use error::ScheduleError;
pub use month::month_schedules;
