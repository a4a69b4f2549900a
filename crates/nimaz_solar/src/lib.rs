//! Astronomical solver for daily prayer times.
//!
//! [`SolarCalculator`] implements [`nimaz_base::PrayerInstantProvider`]
//! using low-precision solar coordinates:
//! - Dhuhr at solar transit
//! - Sunrise and Maghrib at the apparent horizon, optionally lowered by
//!   the observer's height
//! - Fajr and Isha at twilight depression angles, or Isha a fixed interval
//!   after Maghrib
//! - Asr from the shadow-length ratio
//! - High-latitude night-portion bounds for Fajr and Isha

pub mod calculator;
pub mod error;
pub mod high_latitude;
pub mod horizon;
pub mod julian;
pub mod solve;
pub mod sun;

pub use calculator::{DayHours, SolarCalculator, hours_to_utc};
pub use error::SolarError;
pub use horizon::{ElevationRule, SUNRISE_ALTITUDE_DEG};
pub use julian::{J2000_JD, calendar_to_jd, jd_at_midnight};
pub use solve::{Crossing, Side, SolarDay, asr_altitude_deg};
pub use sun::{SolarPosition, solar_position};
