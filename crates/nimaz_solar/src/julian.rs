//! Julian Date arithmetic for the proleptic Gregorian calendar.
//!
//! Source: Meeus, *Astronomical Algorithms*, 2nd ed., ch. 7.

use chrono::{Datelike, NaiveDate};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of a Gregorian calendar date with fractional day.
///
/// `day` may carry a fraction: `1.5` is noon on the first of the month.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * f64::from(y + 4716)).floor() + (30.6001 * f64::from(m + 1)).floor() + day
        + f64::from(b)
        - 1524.5
}

/// Julian Date at 0h UT of a calendar date.
pub fn jd_at_midnight(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), f64::from(date.day()))
}

/// Days elapsed since J2000.0.
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}
