//! Transit and altitude-crossing times for one calendar day.
//!
//! Times are hours after 0h UT of the date and may fall outside `[0, 24)`
//! for observers far from Greenwich. Each event is estimated with the
//! solar position at local noon and refined once with the position at the
//! estimated event time.

use chrono::NaiveDate;
use nimaz_base::GeoLocation;

use crate::julian::jd_at_midnight;
use crate::sun::{SolarPosition, solar_position};

/// Half of the day an altitude crossing falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Before transit (Sun rising).
    Morning,
    /// After transit (Sun setting).
    Evening,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Self::Morning => -1.0,
            Self::Evening => 1.0,
        }
    }
}

/// Outcome of solving for an altitude crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// Crossing at this many hours after 0h UT.
    At(f64),
    /// The Sun stays below the target altitude all day.
    NeverRises,
    /// The Sun stays above the target altitude all day.
    NeverSets,
}

impl Crossing {
    pub fn hours(self) -> Option<f64> {
        match self {
            Self::At(h) => Some(h),
            Self::NeverRises | Self::NeverSets => None,
        }
    }
}

/// Hour angle in hours at which the Sun reaches `altitude_deg`.
///
/// `cos H = (sin h - sin φ sin δ) / (cos φ cos δ)`
fn hour_angle_hours(latitude_rad: f64, declination_rad: f64, altitude_deg: f64) -> Crossing {
    let cos_h = (altitude_deg.to_radians().sin() - latitude_rad.sin() * declination_rad.sin())
        / (latitude_rad.cos() * declination_rad.cos());
    if cos_h > 1.0 {
        Crossing::NeverRises
    } else if cos_h < -1.0 {
        Crossing::NeverSets
    } else {
        Crossing::At(cos_h.acos().to_degrees() / 15.0)
    }
}

/// Solar geometry of one date at one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    jd_midnight: f64,
    latitude_rad: f64,
    longitude_deg: f64,
}

impl SolarDay {
    pub fn new(date: NaiveDate, location: &GeoLocation) -> Self {
        Self {
            jd_midnight: jd_at_midnight(date),
            latitude_rad: location.latitude_rad(),
            longitude_deg: location.longitude_deg,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    /// Mean local noon in hours UT: `12 - lon/15`.
    pub fn mean_noon_hours(&self) -> f64 {
        12.0 - self.longitude_deg / 15.0
    }

    fn position_at(&self, hours: f64) -> SolarPosition {
        solar_position(self.jd_midnight + hours / 24.0)
    }

    fn transit_for(&self, pos: &SolarPosition) -> f64 {
        self.mean_noon_hours() - pos.equation_of_time_h
    }

    /// Solar transit (Dhuhr) in hours UT: `12 - lon/15 - EqT`.
    pub fn transit_hours(&self) -> f64 {
        let first = self.transit_for(&self.position_at(self.mean_noon_hours()));
        self.transit_for(&self.position_at(first))
    }

    /// Time the Sun's center crosses an altitude on one side of transit.
    ///
    /// `altitude_deg` receives the solar position so that targets that
    /// depend on declination (Asr) are re-evaluated on refinement.
    pub fn crossing<F>(&self, side: Side, altitude_deg: F) -> Crossing
    where
        F: Fn(&SolarPosition) -> f64,
    {
        let estimate = |pos: SolarPosition| -> Crossing {
            match hour_angle_hours(self.latitude_rad, pos.declination_rad, altitude_deg(&pos)) {
                Crossing::At(h) => Crossing::At(self.transit_for(&pos) + side.sign() * h),
                other => other,
            }
        };

        match estimate(self.position_at(self.mean_noon_hours())) {
            Crossing::At(first) => estimate(self.position_at(first)),
            other => other,
        }
    }
}

/// Sun altitude in degrees when a shadow reaches `shadow_ratio` times the
/// object's height plus its noon shadow.
///
/// `h = atan(1 / (ratio + tan|φ - δ|))`
pub fn asr_altitude_deg(latitude_rad: f64, declination_rad: f64, shadow_ratio: f64) -> f64 {
    let noon_shadow = (latitude_rad - declination_rad).abs().tan();
    (1.0 / (shadow_ratio + noon_shadow)).atan().to_degrees()
}
