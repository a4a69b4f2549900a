//! Deterministic providers for unit tests.

use std::cell::Cell;
use std::convert::Infallible;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use nimaz_base::{
    CalculationConfiguration, GeoLocation, PrayerInstantProvider, PrayerKind, RawPrayerTimes,
};

/// Minutes after 0h UT: Fajr 05:00, Sunrise 06:30, Dhuhr 12:00,
/// Asr 15:30, Maghrib 18:00, Isha 19:30.
pub const FIXED_MINUTES: [i64; 6] = [300, 390, 720, 930, 1080, 1170];

pub fn location() -> GeoLocation {
    GeoLocation::new(21.4225, 39.8262, 0.0)
}

/// Same clock times every day; counts calls.
#[derive(Debug, Default)]
pub struct CountingProvider {
    calls: Cell<usize>,
}

impl CountingProvider {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PrayerInstantProvider for CountingProvider {
    type Error = Infallible;

    fn compute(
        &self,
        date: NaiveDate,
        _location: &GeoLocation,
        _config: &CalculationConfiguration,
    ) -> Result<RawPrayerTimes, Infallible> {
        self.calls.set(self.calls.get() + 1);
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        Ok(PrayerKind::ALL
            .into_iter()
            .map(|kind| (kind, midnight + TimeDelta::minutes(FIXED_MINUTES[kind.index()])))
            .collect())
    }
}

/// The fixed clock times moved by `shift`, so a date's schedule need not
/// fall on that date.
#[derive(Debug)]
pub struct ShiftedProvider {
    pub shift: TimeDelta,
    pub inner: CountingProvider,
}

impl ShiftedProvider {
    pub fn new(shift: TimeDelta) -> Self {
        Self {
            shift,
            inner: CountingProvider::default(),
        }
    }
}

impl PrayerInstantProvider for ShiftedProvider {
    type Error = Infallible;

    fn compute(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Result<RawPrayerTimes, Infallible> {
        let raw = self.inner.compute(date, location, config)?;
        Ok(raw.into_iter().map(|(k, t)| (k, t + self.shift)).collect())
    }
}

/// Always fails.
#[derive(Debug, Default)]
pub struct FailingProvider;

impl PrayerInstantProvider for FailingProvider {
    type Error = std::io::Error;

    fn compute(
        &self,
        _date: NaiveDate,
        _location: &GeoLocation,
        _config: &CalculationConfiguration,
    ) -> Result<RawPrayerTimes, std::io::Error> {
        Err(std::io::Error::other("provider offline"))
    }
}
