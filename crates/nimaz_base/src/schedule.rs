//! One calendar day of prayer boundaries.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::MalformedScheduleError;
use crate::prayer::{PrayerInstant, PrayerKind};

/// The six prayer instants for one calendar date.
///
/// Indexed by [`PrayerKind::index`]. A schedule assembled with
/// [`DailySchedule::from_instants`] is not checked; [`DailySchedule::new`]
/// and the resolver both enforce `Fajr < Sunrise < Dhuhr < Asr < Maghrib < Isha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailySchedule {
    date: NaiveDate,
    instants: [DateTime<Utc>; 6],
}

impl DailySchedule {
    /// Build a schedule and check its ordering.
    pub fn new(
        date: NaiveDate,
        instants: [DateTime<Utc>; 6],
    ) -> Result<Self, MalformedScheduleError> {
        let schedule = Self::from_instants(date, instants);
        schedule.validate()?;
        Ok(schedule)
    }

    /// Build a schedule without checking its ordering.
    pub fn from_instants(date: NaiveDate, instants: [DateTime<Utc>; 6]) -> Self {
        Self { date, instants }
    }

    /// Calendar date the schedule was computed for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time_for(&self, kind: PrayerKind) -> DateTime<Utc> {
        self.instants[kind.index()]
    }

    pub fn fajr(&self) -> DateTime<Utc> {
        self.time_for(PrayerKind::Fajr)
    }

    pub fn isha(&self) -> DateTime<Utc> {
        self.time_for(PrayerKind::Isha)
    }

    /// The six boundaries in chronological order.
    pub fn instants(&self) -> [PrayerInstant; 6] {
        PrayerKind::ALL.map(|kind| PrayerInstant::new(kind, self.time_for(kind)))
    }

    /// Check that every boundary comes strictly after the previous one.
    pub fn validate(&self) -> Result<(), MalformedScheduleError> {
        for pair in PrayerKind::ALL.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            if self.time_for(later) <= self.time_for(earlier) {
                return Err(MalformedScheduleError::NotIncreasing { earlier, later });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn ordered_schedule_accepted() {
        let s = DailySchedule::new(
            date(),
            [at(5, 0), at(6, 30), at(12, 15), at(15, 40), at(18, 20), at(19, 45)],
        )
        .unwrap();
        assert_eq!(s.date(), date());
        assert_eq!(s.fajr(), at(5, 0));
        assert_eq!(s.isha(), at(19, 45));
        assert_eq!(s.time_for(PrayerKind::Asr), at(15, 40));
    }

    #[test]
    fn instants_carry_kinds() {
        let s = DailySchedule::from_instants(
            date(),
            [at(5, 0), at(6, 30), at(12, 15), at(15, 40), at(18, 20), at(19, 45)],
        );
        let all = s.instants();
        assert_eq!(all[3].kind, PrayerKind::Asr);
        assert_eq!(all[3].timestamp, at(15, 40));
    }

    #[test]
    fn equal_boundaries_rejected() {
        let err = DailySchedule::new(
            date(),
            [at(5, 0), at(6, 30), at(12, 15), at(12, 15), at(18, 20), at(19, 45)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MalformedScheduleError::NotIncreasing {
                earlier: PrayerKind::Dhuhr,
                later: PrayerKind::Asr,
            }
        );
    }

    #[test]
    fn unchecked_build_then_validate() {
        let s = DailySchedule::from_instants(
            date(),
            [at(5, 0), at(4, 30), at(12, 15), at(15, 40), at(18, 20), at(19, 45)],
        );
        assert!(s.validate().is_err());
    }
}
