//! Error types for schedule validation and configuration building.

use thiserror::Error;

use crate::prayer::PrayerKind;

/// A set of prayer boundaries that cannot be resolved.
///
/// Raised when the six daily instants (plus the following Fajr) are not
/// strictly increasing, or when a computed set is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedScheduleError {
    /// `later` does not come strictly after `earlier`.
    #[error("{later} is not after {earlier}")]
    NotIncreasing {
        earlier: PrayerKind,
        later: PrayerKind,
    },
    /// The provider returned no instant for this prayer.
    #[error("no time computed for {0}")]
    MissingPrayer(PrayerKind),
    /// The next day's Fajr does not come after today's Isha.
    #[error("tomorrow's Fajr is not after Isha")]
    TomorrowFajrNotAfterIsha,
}

/// Invalid calculation configuration, reported at build time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Custom method selected without an explicit angle for this prayer.
    #[error("custom method requires an explicit {0} angle")]
    MissingCustomAngle(PrayerKind),
    /// Twilight angle outside (0, 90) degrees or not finite.
    #[error("{kind} angle {deg} is outside (0, 90) degrees")]
    AngleOutOfRange { kind: PrayerKind, deg: f64 },
    /// An Isha interval of zero minutes would put Isha at Maghrib.
    #[error("isha interval after maghrib must be positive")]
    ZeroIshaInterval,
}
