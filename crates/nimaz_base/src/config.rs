//! Calculation configuration: method, Asr rule, high-latitude policy,
//! explicit twilight angles, and per-prayer minute adjustments.
//!
//! A configuration is validated once when built. Afterwards it is an
//! immutable value; changes produce a new configuration.

use std::collections::BTreeMap;

use chrono::{DateTime, DurationRound, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, MalformedScheduleError};
use crate::method::{AsrRule, CalculationMethod, HighLatitudeRule, IshaRule};
use crate::prayer::PrayerKind;
use crate::schedule::DailySchedule;

/// Signed minute offsets added after astronomical computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerAdjustments {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl PrayerAdjustments {
    pub fn get(&self, kind: PrayerKind) -> i32 {
        match kind {
            PrayerKind::Fajr => self.fajr,
            PrayerKind::Sunrise => self.sunrise,
            PrayerKind::Dhuhr => self.dhuhr,
            PrayerKind::Asr => self.asr,
            PrayerKind::Maghrib => self.maghrib,
            PrayerKind::Isha => self.isha,
        }
    }

    /// Copy with one offset replaced.
    pub fn with(mut self, kind: PrayerKind, minutes: i32) -> Self {
        let slot = match kind {
            PrayerKind::Fajr => &mut self.fajr,
            PrayerKind::Sunrise => &mut self.sunrise,
            PrayerKind::Dhuhr => &mut self.dhuhr,
            PrayerKind::Asr => &mut self.asr,
            PrayerKind::Maghrib => &mut self.maghrib,
            PrayerKind::Isha => &mut self.isha,
        };
        *slot = minutes;
        self
    }

    fn as_array(&self) -> [i32; 6] {
        PrayerKind::ALL.map(|kind| self.get(kind))
    }
}

/// Final rounding applied to every adjusted instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Keep sub-minute precision.
    None,
    /// Round to the nearest minute, half a minute rounding up.
    #[default]
    NearestMinute,
}

impl Rounding {
    fn apply(self, t: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::None => t,
            Self::NearestMinute => t.duration_round(TimeDelta::minutes(1)).unwrap_or(t),
        }
    }
}

/// Angles actually used for Fajr and Isha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwilightAngles {
    /// Sun depression for Fajr in degrees.
    pub fajr_deg: f64,
    pub isha: IshaRule,
}

/// Hashable identity of a configuration, for schedule caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigFingerprint {
    method: CalculationMethod,
    asr_rule: AsrRule,
    high_latitude_rule: Option<HighLatitudeRule>,
    fajr_bits: u64,
    isha_bits: u64,
    isha_is_interval: bool,
    adjustments: [i32; 6],
    rounding: Rounding,
}

/// Validated calculation settings for one resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationConfiguration {
    method: CalculationMethod,
    asr_rule: AsrRule,
    high_latitude_rule: Option<HighLatitudeRule>,
    fajr_angle: Option<f64>,
    isha_angle: Option<f64>,
    isha_interval: Option<u32>,
    adjustments: PrayerAdjustments,
    rounding: Rounding,
    angles: TwilightAngles,
}

impl Default for CalculationConfiguration {
    /// Muslim World League, standard Asr, twilight-angle fallback.
    fn default() -> Self {
        Self {
            method: CalculationMethod::MuslimWorldLeague,
            asr_rule: AsrRule::Standard,
            high_latitude_rule: Some(HighLatitudeRule::TwilightAngle),
            fajr_angle: None,
            isha_angle: None,
            isha_interval: None,
            adjustments: PrayerAdjustments::default(),
            rounding: Rounding::NearestMinute,
            angles: TwilightAngles {
                fajr_deg: 18.0,
                isha: IshaRule::Angle(17.0),
            },
        }
    }
}

impl CalculationConfiguration {
    pub fn builder(method: CalculationMethod) -> ConfigurationBuilder {
        ConfigurationBuilder::new(method)
    }

    /// Builder pre-filled with this configuration's settings.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder {
            method: self.method,
            asr_rule: self.asr_rule,
            high_latitude_rule: self.high_latitude_rule,
            fajr_angle: self.fajr_angle,
            isha_angle: self.isha_angle,
            isha_interval: self.isha_interval,
            adjustments: self.adjustments,
            rounding: self.rounding,
        }
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn asr_rule(&self) -> AsrRule {
        self.asr_rule
    }

    pub fn high_latitude_rule(&self) -> Option<HighLatitudeRule> {
        self.high_latitude_rule
    }

    /// User offsets, excluding any delay built into the method.
    pub fn adjustments(&self) -> PrayerAdjustments {
        self.adjustments
    }

    /// Offset applied to `kind`: the user's minutes plus the method's own
    /// Maghrib delay.
    pub fn total_adjustment(&self, kind: PrayerKind) -> i32 {
        let built_in = match kind {
            PrayerKind::Maghrib => self.method.maghrib_offset_minutes(),
            _ => 0,
        };
        self.adjustments.get(kind) + built_in
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// New configuration with one prayer's offset replaced.
    pub fn with_adjustment(&self, kind: PrayerKind, minutes: i32) -> Self {
        Self {
            adjustments: self.adjustments.with(kind, minutes),
            ..*self
        }
    }

    /// New configuration under another method, revalidated.
    pub fn with_method(&self, method: CalculationMethod) -> Result<Self, ConfigurationError> {
        self.to_builder().method(method).build()
    }

    /// New configuration with a different rounding policy.
    pub fn with_rounding(&self, rounding: Rounding) -> Self {
        Self { rounding, ..*self }
    }

    /// Fajr and Isha rules in effect.
    ///
    /// Explicit angles apply when the method is custom or the high-latitude
    /// rule is [`HighLatitudeRule::TwilightAngle`]; otherwise the method's
    /// preset is used. An explicit Isha interval always wins.
    pub fn effective_angles(&self) -> TwilightAngles {
        self.angles
    }

    /// Add each prayer's offset to its raw instant, round, and validate.
    ///
    /// `raw` must hold all six kinds. Adjustments that reorder prayers are
    /// reported, not accepted.
    pub fn apply_adjustments(
        &self,
        date: NaiveDate,
        raw: &BTreeMap<PrayerKind, DateTime<Utc>>,
    ) -> Result<DailySchedule, MalformedScheduleError> {
        let mut instants = [DateTime::<Utc>::MIN_UTC; 6];
        for kind in PrayerKind::ALL {
            let t = raw
                .get(&kind)
                .copied()
                .ok_or(MalformedScheduleError::MissingPrayer(kind))?;
            let adjusted = t + TimeDelta::minutes(i64::from(self.total_adjustment(kind)));
            instants[kind.index()] = self.rounding.apply(adjusted);
        }
        DailySchedule::new(date, instants)
    }

    pub fn fingerprint(&self) -> ConfigFingerprint {
        let (isha_bits, isha_is_interval) = match self.angles.isha {
            IshaRule::Angle(deg) => (deg.to_bits(), false),
            IshaRule::MinutesAfterMaghrib(min) => (u64::from(min), true),
        };
        ConfigFingerprint {
            method: self.method,
            asr_rule: self.asr_rule,
            high_latitude_rule: self.high_latitude_rule,
            fajr_bits: self.angles.fajr_deg.to_bits(),
            isha_bits,
            isha_is_interval,
            adjustments: self.adjustments.as_array(),
            rounding: self.rounding,
        }
    }
}

/// Collects settings and validates them into a [`CalculationConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationBuilder {
    method: CalculationMethod,
    asr_rule: AsrRule,
    high_latitude_rule: Option<HighLatitudeRule>,
    fajr_angle: Option<f64>,
    isha_angle: Option<f64>,
    isha_interval: Option<u32>,
    adjustments: PrayerAdjustments,
    rounding: Rounding,
}

impl ConfigurationBuilder {
    /// Start from a method's defaults.
    pub fn new(method: CalculationMethod) -> Self {
        Self {
            method,
            asr_rule: AsrRule::Standard,
            high_latitude_rule: Some(HighLatitudeRule::TwilightAngle),
            fajr_angle: None,
            isha_angle: None,
            isha_interval: None,
            adjustments: PrayerAdjustments::default(),
            rounding: Rounding::NearestMinute,
        }
    }

    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn asr_rule(mut self, rule: AsrRule) -> Self {
        self.asr_rule = rule;
        self
    }

    pub fn high_latitude_rule(mut self, rule: Option<HighLatitudeRule>) -> Self {
        self.high_latitude_rule = rule;
        self
    }

    pub fn fajr_angle(mut self, deg: f64) -> Self {
        self.fajr_angle = Some(deg);
        self
    }

    pub fn isha_angle(mut self, deg: f64) -> Self {
        self.isha_angle = Some(deg);
        self
    }

    pub fn isha_interval_minutes(mut self, minutes: u32) -> Self {
        self.isha_interval = Some(minutes);
        self
    }

    pub fn adjustments(mut self, adjustments: PrayerAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn adjustment(mut self, kind: PrayerKind, minutes: i32) -> Self {
        self.adjustments = self.adjustments.with(kind, minutes);
        self
    }

    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn build(self) -> Result<CalculationConfiguration, ConfigurationError> {
        check_angle(PrayerKind::Fajr, self.fajr_angle)?;
        check_angle(PrayerKind::Isha, self.isha_angle)?;
        if self.isha_interval == Some(0) {
            return Err(ConfigurationError::ZeroIshaInterval);
        }

        let use_explicit = self.method == CalculationMethod::Custom
            || self.high_latitude_rule == Some(HighLatitudeRule::TwilightAngle);
        let explicit_fajr = self.fajr_angle.filter(|_| use_explicit);
        let explicit_isha = self.isha_angle.filter(|_| use_explicit);

        let fajr_deg = explicit_fajr
            .or(self.method.fajr_angle_deg())
            .ok_or(ConfigurationError::MissingCustomAngle(PrayerKind::Fajr))?;
        let isha = match self.isha_interval {
            Some(minutes) => IshaRule::MinutesAfterMaghrib(minutes),
            None => explicit_isha
                .map(IshaRule::Angle)
                .or(self.method.isha_rule())
                .ok_or(ConfigurationError::MissingCustomAngle(PrayerKind::Isha))?,
        };

        Ok(CalculationConfiguration {
            method: self.method,
            asr_rule: self.asr_rule,
            high_latitude_rule: self.high_latitude_rule,
            fajr_angle: self.fajr_angle,
            isha_angle: self.isha_angle,
            isha_interval: self.isha_interval,
            adjustments: self.adjustments,
            rounding: self.rounding,
            angles: TwilightAngles { fajr_deg, isha },
        })
    }
}

fn check_angle(kind: PrayerKind, deg: Option<f64>) -> Result<(), ConfigurationError> {
    match deg {
        Some(d) if !(d.is_finite() && d > 0.0 && d < 90.0) => {
            Err(ConfigurationError::AngleOutOfRange { kind, deg: d })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn raw_times() -> BTreeMap<PrayerKind, DateTime<Utc>> {
        let hm = |h, m, s| Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap();
        BTreeMap::from([
            (PrayerKind::Fajr, hm(1, 17, 10)),
            (PrayerKind::Sunrise, hm(2, 38, 40)),
            (PrayerKind::Dhuhr, hm(7, 44, 29)),
            (PrayerKind::Asr, hm(10, 59, 30)),
            (PrayerKind::Maghrib, hm(12, 51, 0)),
            (PrayerKind::Isha, hm(14, 11, 59)),
        ])
    }

    #[test]
    fn preset_angles() {
        let c = CalculationConfiguration::builder(CalculationMethod::Egyptian)
            .build()
            .unwrap();
        let a = c.effective_angles();
        assert_eq!(a.fajr_deg, 19.5);
        assert_eq!(a.isha, IshaRule::Angle(17.5));
    }

    #[test]
    fn explicit_angles_ignored_without_twilight_rule() {
        let c = CalculationConfiguration::builder(CalculationMethod::Karachi)
            .high_latitude_rule(Some(HighLatitudeRule::MiddleOfNight))
            .fajr_angle(15.0)
            .isha_angle(15.0)
            .build()
            .unwrap();
        assert_eq!(c.effective_angles().fajr_deg, 18.0);
        assert_eq!(c.effective_angles().isha, IshaRule::Angle(18.0));
    }

    #[test]
    fn explicit_angles_used_with_twilight_rule() {
        let c = CalculationConfiguration::builder(CalculationMethod::Karachi)
            .high_latitude_rule(Some(HighLatitudeRule::TwilightAngle))
            .fajr_angle(15.0)
            .isha_angle(16.0)
            .build()
            .unwrap();
        assert_eq!(c.effective_angles().fajr_deg, 15.0);
        assert_eq!(c.effective_angles().isha, IshaRule::Angle(16.0));
    }

    #[test]
    fn twilight_rule_without_explicit_angles_uses_preset() {
        let c = CalculationConfiguration::builder(CalculationMethod::NorthAmerica)
            .build()
            .unwrap();
        assert_eq!(c.effective_angles().fajr_deg, 15.0);
    }

    #[test]
    fn custom_requires_both_angles() {
        let err = CalculationConfiguration::builder(CalculationMethod::Custom)
            .high_latitude_rule(None)
            .isha_angle(17.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingCustomAngle(PrayerKind::Fajr));

        let err = CalculationConfiguration::builder(CalculationMethod::Custom)
            .fajr_angle(17.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingCustomAngle(PrayerKind::Isha));
    }

    #[test]
    fn custom_with_interval_isha() {
        let c = CalculationConfiguration::builder(CalculationMethod::Custom)
            .high_latitude_rule(None)
            .fajr_angle(17.0)
            .isha_interval_minutes(75)
            .build()
            .unwrap();
        assert_eq!(c.effective_angles().fajr_deg, 17.0);
        assert_eq!(c.effective_angles().isha, IshaRule::MinutesAfterMaghrib(75));
    }

    #[test]
    fn out_of_range_angles_rejected() {
        for bad in [0.0, -3.0, 90.0, f64::INFINITY] {
            let err = CalculationConfiguration::builder(CalculationMethod::Custom)
                .fajr_angle(bad)
                .isha_angle(17.0)
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigurationError::AngleOutOfRange {
                    kind: PrayerKind::Fajr,
                    ..
                }
            ));
        }
    }

    #[test]
    fn zero_interval_rejected() {
        let err = CalculationConfiguration::builder(CalculationMethod::MuslimWorldLeague)
            .isha_interval_minutes(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroIshaInterval);
    }

    #[test]
    fn tehran_maghrib_delay_belongs_to_method() {
        let c = CalculationConfiguration::builder(CalculationMethod::Tehran)
            .adjustment(PrayerKind::Maghrib, 1)
            .build()
            .unwrap();
        assert_eq!(c.adjustments().maghrib, 1);
        assert_eq!(c.total_adjustment(PrayerKind::Maghrib), 5);
        assert_eq!(c.total_adjustment(PrayerKind::Isha), 0);

        let late = CalculationConfiguration::builder(CalculationMethod::MuslimWorldLeague)
            .method(CalculationMethod::Tehran)
            .build()
            .unwrap();
        assert_eq!(late.total_adjustment(PrayerKind::Maghrib), 4);
    }

    #[test]
    fn with_method_moves_maghrib_delay() {
        let into = CalculationConfiguration::default()
            .with_method(CalculationMethod::Tehran)
            .unwrap();
        assert_eq!(into.total_adjustment(PrayerKind::Maghrib), 4);

        let out = CalculationConfiguration::builder(CalculationMethod::Tehran)
            .build()
            .unwrap()
            .with_method(CalculationMethod::MuslimWorldLeague)
            .unwrap();
        assert_eq!(out.total_adjustment(PrayerKind::Maghrib), 0);
        assert_eq!(out, CalculationConfiguration::default());

        let raw = raw_times();
        let s = into
            .with_rounding(Rounding::None)
            .apply_adjustments(date(), &raw)
            .unwrap();
        assert_eq!(
            s.time_for(PrayerKind::Maghrib),
            raw[&PrayerKind::Maghrib] + TimeDelta::minutes(4)
        );
    }

    #[test]
    fn with_adjustment_returns_copy() {
        let base = CalculationConfiguration::default();
        let changed = base.with_adjustment(PrayerKind::Asr, -3);
        assert_eq!(base.adjustments().asr, 0);
        assert_eq!(changed.adjustments().asr, -3);
        assert_ne!(base.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn with_method_revalidates() {
        let base = CalculationConfiguration::default();
        let karachi = base.with_method(CalculationMethod::Karachi).unwrap();
        assert_eq!(karachi.effective_angles().isha, IshaRule::Angle(18.0));
        assert_eq!(
            base.with_method(CalculationMethod::Custom).unwrap_err(),
            ConfigurationError::MissingCustomAngle(PrayerKind::Fajr)
        );
    }

    #[test]
    fn default_matches_built_mwl() {
        let built = CalculationConfiguration::builder(CalculationMethod::MuslimWorldLeague)
            .build()
            .unwrap();
        assert_eq!(built, CalculationConfiguration::default());
    }

    #[test]
    fn apply_adjustments_rounds_to_nearest_minute() {
        let c = CalculationConfiguration::default();
        let s = c.apply_adjustments(date(), &raw_times()).unwrap();
        let hm = |h, m| Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap();
        assert_eq!(s.time_for(PrayerKind::Fajr), hm(1, 17));
        assert_eq!(s.time_for(PrayerKind::Sunrise), hm(2, 39));
        assert_eq!(s.time_for(PrayerKind::Dhuhr), hm(7, 44));
        assert_eq!(s.time_for(PrayerKind::Asr), hm(11, 0));
        assert_eq!(s.time_for(PrayerKind::Isha), hm(14, 12));
    }

    #[test]
    fn apply_adjustments_adds_signed_minutes() {
        let c = CalculationConfiguration::default()
            .with_rounding(Rounding::None)
            .with_adjustment(PrayerKind::Dhuhr, 5)
            .with_adjustment(PrayerKind::Isha, -2);
        let raw = raw_times();
        let s = c.apply_adjustments(date(), &raw).unwrap();
        assert_eq!(
            s.time_for(PrayerKind::Dhuhr),
            raw[&PrayerKind::Dhuhr] + TimeDelta::minutes(5)
        );
        assert_eq!(
            s.time_for(PrayerKind::Isha),
            raw[&PrayerKind::Isha] - TimeDelta::minutes(2)
        );
        assert_eq!(s.time_for(PrayerKind::Asr), raw[&PrayerKind::Asr]);
    }

    #[test]
    fn reordering_adjustment_reported() {
        let c = CalculationConfiguration::default().with_adjustment(PrayerKind::Sunrise, -120);
        let err = c.apply_adjustments(date(), &raw_times()).unwrap_err();
        assert_eq!(
            err,
            MalformedScheduleError::NotIncreasing {
                earlier: PrayerKind::Fajr,
                later: PrayerKind::Sunrise,
            }
        );
    }

    #[test]
    fn missing_kind_reported() {
        let mut raw = raw_times();
        raw.remove(&PrayerKind::Maghrib);
        let err = CalculationConfiguration::default()
            .apply_adjustments(date(), &raw)
            .unwrap_err();
        assert_eq!(err, MalformedScheduleError::MissingPrayer(PrayerKind::Maghrib));
    }
}
