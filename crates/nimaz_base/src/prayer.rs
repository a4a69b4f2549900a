//! The six daily prayer boundaries.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named daily boundaries, in chronological order.
///
/// Sunrise is not an obligatory prayer; it closes the Fajr interval and is
/// treated as a boundary like the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerKind {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKind {
    /// All kinds in chronological order.
    pub const ALL: [PrayerKind; 6] = [
        PrayerKind::Fajr,
        PrayerKind::Sunrise,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ];

    /// 0-based position within the day (Fajr = 0 .. Isha = 5).
    pub const fn index(self) -> usize {
        match self {
            Self::Fajr => 0,
            Self::Sunrise => 1,
            Self::Dhuhr => 2,
            Self::Asr => 3,
            Self::Maghrib => 4,
            Self::Isha => 5,
        }
    }

    /// Kind at a 0-based day position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// Whether this boundary starts one of the five obligatory prayers.
    pub const fn is_obligatory(self) -> bool {
        !matches!(self, Self::Sunrise)
    }

    /// The following boundary, wrapping Isha to Fajr.
    pub const fn following(self) -> Self {
        match self {
            Self::Fajr => Self::Sunrise,
            Self::Sunrise => Self::Dhuhr,
            Self::Dhuhr => Self::Asr,
            Self::Asr => Self::Maghrib,
            Self::Maghrib => Self::Isha,
            Self::Isha => Self::Fajr,
        }
    }
}

impl Display for PrayerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fajr" | "subuh" => Ok(Self::Fajr),
            "sunrise" | "shuruq" => Ok(Self::Sunrise),
            "dhuhr" | "zuhr" => Ok(Self::Dhuhr),
            "asr" => Ok(Self::Asr),
            "maghrib" => Ok(Self::Maghrib),
            "isha" => Ok(Self::Isha),
            other => Err(format!("unknown prayer: {other}")),
        }
    }
}

/// A prayer boundary at an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrayerInstant {
    pub kind: PrayerKind,
    pub timestamp: DateTime<Utc>,
}

impl PrayerInstant {
    pub fn new(kind: PrayerKind, timestamp: DateTime<Utc>) -> Self {
        Self { kind, timestamp }
    }
}
