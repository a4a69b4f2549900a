//! Current/next prayer resolution for an instant.
//!
//! The day is split into half-open intervals
//! `[Fajr, Sunrise) [Sunrise, Dhuhr) .. [Maghrib, Isha) [Isha, tomorrow Fajr)`.
//! Before today's Fajr the previous night's Isha is still current, so the
//! schedule behaves as periodic with a one-day period anchored at Fajr.
//!
//! Pure arithmetic: no clock reads, no allocation.

use chrono::{DateTime, TimeDelta, Utc};

use crate::countdown::Countdown;
use crate::error::MalformedScheduleError;
use crate::prayer::PrayerKind;
use crate::schedule::DailySchedule;

/// Which prayer is in effect at an instant and how long until the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedPrayerState {
    pub current_prayer: PrayerKind,
    pub next_prayer: PrayerKind,
    pub next_prayer_instant: DateTime<Utc>,
    /// Never negative.
    pub time_until_next: TimeDelta,
}

impl ResolvedPrayerState {
    pub fn countdown(&self) -> Countdown {
        Countdown::from_delta(self.time_until_next)
    }
}

/// Resolve the prayer state at `now`.
///
/// `schedule` holds the six boundaries of the day most relevant to `now`
/// and `tomorrow_fajr` the Fajr of the following day. Boundaries must be
/// strictly increasing; otherwise no prayer is picked and
/// [`MalformedScheduleError`] is returned.
///
/// At or after `tomorrow_fajr` the schedule is stale: the state reports
/// Fajr as next with a zero countdown so the caller rolls to the next day.
pub fn resolve_current(
    now: DateTime<Utc>,
    schedule: &DailySchedule,
    tomorrow_fajr: DateTime<Utc>,
) -> Result<ResolvedPrayerState, MalformedScheduleError> {
    schedule.validate()?;
    if tomorrow_fajr <= schedule.isha() {
        return Err(MalformedScheduleError::TomorrowFajrNotAfterIsha);
    }

    // Index of the first boundary strictly after `now` (0..=6, where 6 is
    // tomorrow's Fajr and 7 means past it).
    let upcoming = PrayerKind::ALL
        .iter()
        .position(|&kind| schedule.time_for(kind) > now)
        .unwrap_or(if tomorrow_fajr > now { 6 } else { 7 });

    let (current_prayer, next_prayer, next_prayer_instant) = match upcoming {
        0 => (PrayerKind::Isha, PrayerKind::Fajr, schedule.fajr()),
        6 | 7 => (PrayerKind::Isha, PrayerKind::Fajr, tomorrow_fajr),
        i => {
            let next = PrayerKind::ALL[i];
            (PrayerKind::ALL[i - 1], next, schedule.time_for(next))
        }
    };

    let time_until_next = (next_prayer_instant - now).max(TimeDelta::zero());
    Ok(ResolvedPrayerState {
        current_prayer,
        next_prayer,
        next_prayer_instant,
        time_until_next,
    })
}
