//! One day's schedule from a provider and a configuration.

use chrono::NaiveDate;
use nimaz_base::{CalculationConfiguration, DailySchedule, GeoLocation, PrayerInstantProvider};
use tracing::debug;

use crate::error::ScheduleError;

/// Compute, adjust, round and validate the schedule for `date`.
pub fn schedule_for_date<P>(
    provider: &P,
    date: NaiveDate,
    location: &GeoLocation,
    config: &CalculationConfiguration,
) -> Result<DailySchedule, ScheduleError>
where
    P: PrayerInstantProvider + ?Sized,
{
    debug!(
        "computing schedule for {} at ({}, {}) with {}",
        date,
        location.latitude_deg,
        location.longitude_deg,
        config.method()
    );
    let raw = provider
        .compute(date, location, config)
        .map_err(ScheduleError::provider)?;
    Ok(config.apply_adjustments(date, &raw)?)
}
