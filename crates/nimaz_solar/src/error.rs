//! Error types for the solar solver.

use thiserror::Error;

use nimaz_base::PrayerKind;

/// Why prayer instants could not be computed for a date and place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SolarError {
    /// Polar night: the Sun does not reach the horizon.
    #[error("the sun never rises on this date at this latitude")]
    NeverRises,
    /// Midnight sun: the Sun does not reach the horizon from above.
    #[error("the sun never sets on this date at this latitude")]
    NeverSets,
    /// The Sun never reaches the altitude that defines this prayer and no
    /// high-latitude rule is configured to bound it.
    #[error("{0} is undefined on this date: the sun never reaches its altitude")]
    UndefinedTwilight(PrayerKind),
    /// Latitude or longitude is not finite or out of range.
    #[error("invalid location: latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidLocation,
    /// The date is too close to the representable range.
    #[error("date out of range")]
    DateOutOfRange,
}
