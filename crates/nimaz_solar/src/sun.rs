//! Low-precision apparent solar coordinates.
//!
//! Accuracy is about 0.01 degree in declination and a few seconds in the
//! equation of time between 1950 and 2050, which is well below the
//! minute resolution of prayer times.
//!
//! Source: Astronomical Almanac, "Low precision formulas for the Sun".

use std::f64::consts::TAU;

use crate::julian::days_since_j2000;

/// Solar declination and equation of time at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Declination in radians.
    pub declination_rad: f64,
    /// Equation of time in hours (apparent minus mean solar time).
    pub equation_of_time_h: f64,
}

/// Solar position at a Julian Date (UT).
pub fn solar_position(jd: f64) -> SolarPosition {
    let d = days_since_j2000(jd);

    let mean_anomaly = (357.529 + 0.985_600_28 * d).to_radians();
    let mean_longitude_deg = (280.459 + 0.985_647_36 * d).rem_euclid(360.0);
    let ecliptic_longitude = (mean_longitude_deg
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let obliquity = (23.439 - 0.000_000_36 * d).to_radians();

    let right_ascension = (obliquity.cos() * ecliptic_longitude.sin())
        .atan2(ecliptic_longitude.cos())
        .rem_euclid(TAU);
    let declination_rad = (obliquity.sin() * ecliptic_longitude.sin()).asin();

    // Both terms in hours; wrap into [-12, 12).
    let eqt = mean_longitude_deg / 15.0 - right_ascension.to_degrees() / 15.0;
    let equation_of_time_h = (eqt + 12.0).rem_euclid(24.0) - 12.0;

    SolarPosition {
        declination_rad,
        equation_of_time_h,
    }
}
