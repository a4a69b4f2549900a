//! Safe bounds for Fajr and Isha when twilight lasts all night or ends
//! unreasonably close to sunrise.
//!
//! The night runs from sunset to the next sunrise. A rule fixes the
//! portion of it that may separate Fajr from sunrise (and Isha from
//! sunset); a computed time beyond that bound, or no computed time at
//! all, is replaced by the bound.

use nimaz_base::{CalculationConfiguration, CalculationMethod, GeoLocation, HighLatitudeRule};

use crate::solve::Side;

/// Latitude from which the Moonsighting Committee places Fajr and Isha
/// exactly a seventh of the night from sunrise and sunset. The rule is
/// defined for northern latitudes only.
const MOONSIGHTING_SEVENTH_LATITUDE: f64 = 55.0;

/// Whether Fajr and Isha are fixed at a seventh of the night instead of
/// solved from twilight angles.
pub fn moonsighting_seventh(config: &CalculationConfiguration, location: &GeoLocation) -> bool {
    config.method() == CalculationMethod::MoonsightingCommittee
        && location.latitude_deg >= MOONSIGHTING_SEVENTH_LATITUDE
}

/// Night length in hours between sunset and the following sunrise.
pub fn night_hours(sunset_h: f64, next_sunrise_h: f64) -> f64 {
    next_sunrise_h - sunset_h
}

/// Earliest acceptable Fajr: `sunrise - portion * night`.
pub fn fajr_bound(rule: HighLatitudeRule, angle_deg: f64, sunrise_h: f64, night_h: f64) -> f64 {
    sunrise_h - rule.night_portion(angle_deg) * night_h
}

/// Latest acceptable Isha: `sunset + portion * night`.
pub fn isha_bound(rule: HighLatitudeRule, angle_deg: f64, sunset_h: f64, night_h: f64) -> f64 {
    sunset_h + rule.night_portion(angle_deg) * night_h
}

/// Keep `computed` if it lies between the bound and the Sun's crossing of
/// the horizon, otherwise use the bound. Morning times must not precede
/// their bound; evening times must not follow it.
///
/// Returns the time and whether the bound was applied.
pub fn clamp_to_bound(computed: Option<f64>, bound: f64, side: Side) -> (f64, bool) {
    match (computed, side) {
        (Some(t), Side::Morning) if t >= bound => (t, false),
        (Some(t), Side::Evening) if t <= bound => (t, false),
        _ => (bound, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_night_portion() {
        // 10 h night, seventh of the night = 85.7 min.
        let night = night_hours(18.0, 28.0);
        assert_eq!(night, 10.0);
        let fajr = fajr_bound(HighLatitudeRule::SeventhOfNight, 18.0, 4.0, night);
        assert!((fajr - (4.0 - 10.0 / 7.0)).abs() < 1e-12);
        let isha = isha_bound(HighLatitudeRule::MiddleOfNight, 17.0, 18.0, night);
        assert_eq!(isha, 23.0);
    }

    #[test]
    fn twilight_angle_portion() {
        let fajr = fajr_bound(HighLatitudeRule::TwilightAngle, 18.0, 4.0, 6.0);
        assert!((fajr - (4.0 - 1.8)).abs() < 1e-12);
    }

    #[test]
    fn clamp_keeps_times_inside_bound() {
        assert_eq!(clamp_to_bound(Some(3.0), 2.5, Side::Morning), (3.0, false));
        assert_eq!(clamp_to_bound(Some(2.0), 2.5, Side::Morning), (2.5, true));
        assert_eq!(clamp_to_bound(None, 2.5, Side::Morning), (2.5, true));
        assert_eq!(clamp_to_bound(Some(20.0), 21.0, Side::Evening), (20.0, false));
        assert_eq!(clamp_to_bound(Some(22.0), 21.0, Side::Evening), (21.0, true));
    }

    #[test]
    fn moonsighting_seventh_in_the_north_only() {
        let config = CalculationConfiguration::builder(CalculationMethod::MoonsightingCommittee)
            .high_latitude_rule(None)
            .build()
            .unwrap();
        let edinburgh = GeoLocation::new(55.9533, -3.1883, 0.0);
        assert!(moonsighting_seventh(&config, &edinburgh));
        let london = GeoLocation::new(51.5074, -0.1278, 0.0);
        assert!(!moonsighting_seventh(&config, &london));
        let south = GeoLocation::new(-56.0, -68.0, 0.0);
        assert!(!moonsighting_seventh(&config, &south));

        let mwl = CalculationConfiguration::default();
        assert!(!moonsighting_seventh(&mwl, &edinburgh));
    }
}
