//! Daily prayer schedule primitives.
//!
//! This crate provides:
//! - The six daily boundaries ([`PrayerKind`]) and a validated [`DailySchedule`]
//! - Calculation method presets, Asr rule, high-latitude policies
//! - [`CalculationConfiguration`] with minute adjustments and rounding
//! - [`resolve_current`]: current prayer, next prayer, and countdown at an instant
//! - The [`PrayerInstantProvider`] seam for astronomical solvers
//!
//! Everything here is pure and synchronous; no clock is read.

pub mod config;
pub mod countdown;
pub mod error;
pub mod location;
pub mod method;
pub mod prayer;
pub mod provider;
pub mod resolve;
pub mod schedule;

pub use config::{
    CalculationConfiguration, ConfigFingerprint, ConfigurationBuilder, PrayerAdjustments,
    Rounding, TwilightAngles,
};
pub use countdown::{Countdown, format_clock_12h, format_countdown};
pub use error::{ConfigurationError, MalformedScheduleError};
pub use location::GeoLocation;
pub use method::{AsrRule, CalculationMethod, HighLatitudeRule, IshaRule};
pub use prayer::{PrayerInstant, PrayerKind};
pub use provider::{PrayerInstantProvider, RawPrayerTimes};
pub use resolve::{ResolvedPrayerState, resolve_current};
pub use schedule::DailySchedule;
