//! Source of raw astronomical prayer instants.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::CalculationConfiguration;
use crate::location::GeoLocation;
use crate::prayer::PrayerKind;

/// Raw (unadjusted) instants for one date, keyed by prayer.
pub type RawPrayerTimes = BTreeMap<PrayerKind, DateTime<Utc>>;

/// Computes the unadjusted prayer instants for a calendar date.
///
/// Implementations return one UTC instant per [`PrayerKind`]. Minute
/// adjustments and rounding are applied afterwards by
/// [`CalculationConfiguration::apply_adjustments`].
pub trait PrayerInstantProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn compute(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Result<RawPrayerTimes, Self::Error>;
}

impl<P: PrayerInstantProvider + ?Sized> PrayerInstantProvider for &P {
    type Error = P::Error;

    fn compute(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Result<RawPrayerTimes, Self::Error> {
        (**self).compute(date, location, config)
    }
}
