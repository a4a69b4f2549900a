//! The built-in [`PrayerInstantProvider`]: six prayer instants from solar
//! geometry.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use nimaz_base::{
    CalculationConfiguration, GeoLocation, HighLatitudeRule, IshaRule, PrayerInstantProvider,
    PrayerKind, RawPrayerTimes,
};
use tracing::{debug, trace};

use crate::error::SolarError;
use crate::high_latitude::{
    clamp_to_bound, fajr_bound, isha_bound, moonsighting_seventh, night_hours,
};
use crate::horizon::ElevationRule;
use crate::solve::{Crossing, Side, SolarDay, asr_altitude_deg};

/// Event times in hours after 0h UT of the date, indexed by [`PrayerKind::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayHours([f64; 6]);

impl DayHours {
    pub fn get(&self, kind: PrayerKind) -> f64 {
        self.0[kind.index()]
    }
}

/// Solves prayer times from low-precision solar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolarCalculator {
    elevation: ElevationRule,
}

impl SolarCalculator {
    pub fn new(elevation: ElevationRule) -> Self {
        Self { elevation }
    }

    pub fn elevation_rule(&self) -> ElevationRule {
        self.elevation
    }

    /// Raw event times for `date` before adjustments and rounding.
    pub fn compute_hours(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Result<DayHours, SolarError> {
        if !location.is_valid() {
            return Err(SolarError::InvalidLocation);
        }

        let day = SolarDay::new(date, location);
        let horizon = self.elevation.sunrise_altitude_deg(location.altitude_m);

        let sunrise = horizon_crossing(day.crossing(Side::Morning, |_| horizon))?;
        let sunset = horizon_crossing(day.crossing(Side::Evening, |_| horizon))?;
        let dhuhr = day.transit_hours();

        let ratio = config.asr_rule().shadow_ratio();
        let latitude = day.latitude_rad();
        let asr = day
            .crossing(Side::Evening, |pos| {
                asr_altitude_deg(latitude, pos.declination_rad, ratio)
            })
            .hours()
            .ok_or(SolarError::UndefinedTwilight(PrayerKind::Asr))?;

        let next_date = date.succ_opt().ok_or(SolarError::DateOutOfRange)?;
        let next_sunrise = SolarDay::new(next_date, location)
            .crossing(Side::Morning, |_| horizon)
            .hours()
            .map_or(sunrise + 24.0, |h| h + 24.0);
        let night = night_hours(sunset, next_sunrise);

        let angles = config.effective_angles();
        let rule = config.high_latitude_rule();
        let seventh = moonsighting_seventh(config, location);
        if seventh {
            debug!("Fajr and Isha on {} fixed at a seventh of the night", date);
        }

        let fajr_raw = if seventh {
            Some(fajr_bound(HighLatitudeRule::SeventhOfNight, angles.fajr_deg, sunrise, night))
        } else {
            day.crossing(Side::Morning, |_| -angles.fajr_deg).hours()
        };
        let fajr = match rule {
            Some(rule) => {
                let bound = fajr_bound(rule, angles.fajr_deg, sunrise, night);
                let (t, bounded) = clamp_to_bound(fajr_raw, bound, Side::Morning);
                if bounded {
                    debug!("Fajr on {} bounded by {:?} night portion", date, rule);
                }
                t
            }
            None => fajr_raw.ok_or(SolarError::UndefinedTwilight(PrayerKind::Fajr))?,
        };

        let isha = match angles.isha {
            IshaRule::MinutesAfterMaghrib(minutes) => sunset + f64::from(minutes) / 60.0,
            IshaRule::Angle(deg) => {
                let isha_raw = if seventh {
                    Some(isha_bound(HighLatitudeRule::SeventhOfNight, deg, sunset, night))
                } else {
                    day.crossing(Side::Evening, |_| -deg).hours()
                };
                match rule {
                    Some(rule) => {
                        let bound = isha_bound(rule, deg, sunset, night);
                        let (t, bounded) = clamp_to_bound(isha_raw, bound, Side::Evening);
                        if bounded {
                            debug!("Isha on {} bounded by {:?} night portion", date, rule);
                        }
                        t
                    }
                    None => isha_raw.ok_or(SolarError::UndefinedTwilight(PrayerKind::Isha))?,
                }
            }
        };

        let hours = DayHours([fajr, sunrise, dhuhr, asr, sunset, isha]);
        trace!("solar hours for {}: {:?}", date, hours);
        Ok(hours)
    }
}

fn horizon_crossing(crossing: Crossing) -> Result<f64, SolarError> {
    match crossing {
        Crossing::At(h) => Ok(h),
        Crossing::NeverRises => Err(SolarError::NeverRises),
        Crossing::NeverSets => Err(SolarError::NeverSets),
    }
}

/// Instant `hours` after 0h UT of `date`, to the millisecond.
pub fn hours_to_utc(date: NaiveDate, hours: f64) -> Result<DateTime<Utc>, SolarError> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    let offset = TimeDelta::milliseconds((hours * 3_600_000.0).round() as i64);
    midnight
        .checked_add_signed(offset)
        .ok_or(SolarError::DateOutOfRange)
}

impl PrayerInstantProvider for SolarCalculator {
    type Error = SolarError;

    fn compute(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Result<RawPrayerTimes, SolarError> {
        let hours = self.compute_hours(date, location, config)?;
        PrayerKind::ALL
            .into_iter()
            .map(|kind| Ok((kind, hours_to_utc(date, hours.get(kind))?)))
            .collect()
    }
}
