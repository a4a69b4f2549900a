//! Monthly prayer timetables.

use chrono::{Datelike, NaiveDate};
use nimaz_base::{CalculationConfiguration, DailySchedule, GeoLocation, PrayerInstantProvider};

use crate::daily::schedule_for_date;
use crate::error::ScheduleError;

/// Schedules for every day of `year`-`month`, in date order.
///
/// Stops at the first day that cannot be computed.
pub fn month_schedules<P>(
    provider: &P,
    year: i32,
    month: u32,
    location: &GeoLocation,
    config: &CalculationConfiguration,
) -> Result<Vec<DailySchedule>, ScheduleError>
where
    P: PrayerInstantProvider + ?Sized,
{
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ScheduleError::InvalidDate(format!("{year}-{month:02}")))?;
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| schedule_for_date(provider, date, location, config))
        .collect()
}
