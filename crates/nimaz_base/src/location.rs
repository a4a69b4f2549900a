//! Observer location on Earth's surface.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location of the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Whether latitude and longitude are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && self.altitude_m.is_finite()
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=180.0).contains(&self.longitude_deg)
    }

    /// Mean solar time offset from UTC, rounded to whole minutes.
    ///
    /// Used to pick the local calendar date when no zone offset is known.
    pub fn mean_solar_offset(&self) -> FixedOffset {
        let minutes = (self.longitude_deg * 4.0).round() as i32;
        FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}
