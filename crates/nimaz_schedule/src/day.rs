//! The prayer day containing an instant.
//!
//! A prayer day runs from one Fajr to the next. Before today's Fajr the
//! previous night's Isha is still in effect, so the bracket is yesterday's
//! schedule closed by today's Fajr.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use nimaz_base::{
    CalculationConfiguration, DailySchedule, GeoLocation, PrayerInstantProvider,
    ResolvedPrayerState, resolve_current,
};

use crate::cache::ScheduleCache;
use crate::error::ScheduleError;

/// Steps through adjacent dates before giving up on a bracket.
const MAX_DAY_STEPS: usize = 3;

/// A schedule together with the Fajr that closes its Isha interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrayerDay {
    pub schedule: DailySchedule,
    pub tomorrow_fajr: DateTime<Utc>,
}

impl PrayerDay {
    /// Whether `now` lies in `[Fajr, tomorrow_fajr)`.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.schedule.fajr() <= now && now < self.tomorrow_fajr
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ResolvedPrayerState, ScheduleError> {
        Ok(resolve_current(now, &self.schedule, self.tomorrow_fajr)?)
    }
}

fn pred(date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
    date.pred_opt()
        .ok_or_else(|| ScheduleError::InvalidDate(format!("no day before {date}")))
}

fn succ(date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
    date.succ_opt()
        .ok_or_else(|| ScheduleError::InvalidDate(format!("no day after {date}")))
}

/// Find the prayer day containing `now`.
///
/// The starting date is `now`'s calendar date at `offset`. If `now` is
/// before that date's Fajr the previous date is used; if it is at or past
/// the next date's Fajr the following one is.
pub fn prayer_day_at<P>(
    cache: &mut ScheduleCache,
    provider: &P,
    now: DateTime<Utc>,
    offset: FixedOffset,
    location: &GeoLocation,
    config: &CalculationConfiguration,
) -> Result<PrayerDay, ScheduleError>
where
    P: PrayerInstantProvider + ?Sized,
{
    let mut date = now.with_timezone(&offset).date_naive();
    for _ in 0..MAX_DAY_STEPS {
        let schedule = cache.get_or_compute(provider, date, location, config)?;
        if now < schedule.fajr() {
            date = pred(date)?;
            continue;
        }
        let next = cache.get_or_compute(provider, succ(date)?, location, config)?;
        if now < next.fajr() {
            return Ok(PrayerDay {
                schedule,
                tomorrow_fajr: next.fajr(),
            });
        }
        date = succ(date)?;
    }
    Err(ScheduleError::NoBracket(now))
}

/// Current prayer, next prayer and countdown at `now`.
pub fn resolve_at<P>(
    cache: &mut ScheduleCache,
    provider: &P,
    now: DateTime<Utc>,
    offset: FixedOffset,
    location: &GeoLocation,
    config: &CalculationConfiguration,
) -> Result<ResolvedPrayerState, ScheduleError>
where
    P: PrayerInstantProvider + ?Sized,
{
    prayer_day_at(cache, provider, now, offset, location, config)?.resolve(now)
}
