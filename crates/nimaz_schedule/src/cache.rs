//! Bounded memo of computed daily schedules.
//!
//! Keyed by date, exact location, and configuration fingerprint. When full,
//! the oldest insertion is evicted.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;
use nimaz_base::{
    CalculationConfiguration, ConfigFingerprint, DailySchedule, GeoLocation,
    PrayerInstantProvider,
};
use tracing::{debug, trace};

use crate::daily::schedule_for_date;
use crate::error::ScheduleError;

/// Schedules kept by [`ScheduleCache::default`]: about two months.
pub const DEFAULT_CAPACITY: usize = 64;

/// Identity of one computed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    date: NaiveDate,
    latitude_bits: u64,
    longitude_bits: u64,
    altitude_bits: u64,
    config: ConfigFingerprint,
}

impl ScheduleKey {
    pub fn new(
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Self {
        Self {
            date,
            latitude_bits: location.latitude_deg.to_bits(),
            longitude_bits: location.longitude_deg.to_bits(),
            altitude_bits: location.altitude_m.to_bits(),
            config: config.fingerprint(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Insertion-ordered schedule cache with a fixed capacity.
#[derive(Debug, Clone)]
pub struct ScheduleCache {
    capacity: usize,
    entries: HashMap<ScheduleKey, DailySchedule>,
    order: VecDeque<ScheduleKey>,
}

impl Default for ScheduleCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ScheduleCache {
    /// Create an empty cache. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn get(&self, key: &ScheduleKey) -> Option<DailySchedule> {
        self.entries.get(key).copied()
    }

    /// Cached schedule for the key, or compute and remember it.
    ///
    /// Failures are not cached.
    pub fn get_or_compute<P>(
        &mut self,
        provider: &P,
        date: NaiveDate,
        location: &GeoLocation,
        config: &CalculationConfiguration,
    ) -> Result<DailySchedule, ScheduleError>
    where
        P: PrayerInstantProvider + ?Sized,
    {
        let key = ScheduleKey::new(date, location, config);
        if let Some(schedule) = self.get(&key) {
            trace!("schedule cache hit for {}", date);
            return Ok(schedule);
        }
        debug!("schedule cache miss for {}", date);
        let schedule = schedule_for_date(provider, date, location, config)?;
        self.insert(key, schedule);
        Ok(schedule)
    }

    fn insert(&mut self, key: ScheduleKey, schedule: DailySchedule) {
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!("evicted cached schedule for {}", oldest.date());
            }
        }
        self.entries.insert(key, schedule);
        self.order.push_back(key);
    }
}
