//! Settings file support.
//!
//! ```toml
//! [location]
//! latitude = 53.3498
//! longitude = -6.2603
//! altitude_m = 20.0
//! utc_offset_minutes = 0
//!
//! [calculation]
//! method = "ireland"
//! asr = "standard"
//! high_latitude_rule = "twilight_angle"
//! fajr_angle = 14.0
//! isha_angle = 14.0
//! rounding = "nearest_minute"
//!
//! [adjustments]
//! fajr = 2
//! maghrib = 2
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::FixedOffset;
use nimaz_base::{
    AsrRule, CalculationConfiguration, CalculationMethod, GeoLocation, HighLatitudeRule,
    PrayerAdjustments, Rounding,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Whole settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub location: LocationSettings,
    #[serde(default)]
    pub calculation: CalculationSettings,
    /// Added on top of any offset built into the method.
    #[serde(default)]
    pub adjustments: PrayerAdjustments,
}

/// Observer position and display zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_m: f64,
    /// Minutes east of UTC. Defaults to the longitude's mean solar offset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// High-latitude rule as written in the file; `none` disables bounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighLatitudeSetting {
    None,
    #[serde(alias = "middle_of_the_night")]
    MiddleOfNight,
    #[serde(alias = "seventh_of_the_night")]
    SeventhOfNight,
    #[default]
    TwilightAngle,
}

impl From<HighLatitudeSetting> for Option<HighLatitudeRule> {
    fn from(setting: HighLatitudeSetting) -> Self {
        match setting {
            HighLatitudeSetting::None => None,
            HighLatitudeSetting::MiddleOfNight => Some(HighLatitudeRule::MiddleOfNight),
            HighLatitudeSetting::SeventhOfNight => Some(HighLatitudeRule::SeventhOfNight),
            HighLatitudeSetting::TwilightAngle => Some(HighLatitudeRule::TwilightAngle),
        }
    }
}

/// Calculation method and overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSettings {
    #[serde(default = "default_method")]
    pub method: CalculationMethod,
    #[serde(default)]
    pub asr: AsrRule,
    #[serde(default)]
    pub high_latitude_rule: HighLatitudeSetting,
    #[serde(default)]
    pub fajr_angle: Option<f64>,
    #[serde(default)]
    pub isha_angle: Option<f64>,
    #[serde(default)]
    pub isha_interval_minutes: Option<u32>,
    #[serde(default)]
    pub rounding: Rounding,
}

fn default_method() -> CalculationMethod {
    CalculationMethod::MuslimWorldLeague
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            method: default_method(),
            asr: AsrRule::default(),
            high_latitude_rule: HighLatitudeSetting::default(),
            fajr_angle: None,
            isha_angle: None,
            isha_interval_minutes: None,
            rounding: Rounding::default(),
        }
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Settings for a location with every calculation default.
    pub fn for_location(location: GeoLocation) -> Self {
        Self {
            location: LocationSettings {
                latitude: location.latitude_deg,
                longitude: location.longitude_deg,
                altitude_m: location.altitude_m,
                utc_offset_minutes: None,
            },
            calculation: CalculationSettings::default(),
            adjustments: PrayerAdjustments::default(),
        }
    }

    /// Check the location and offset; called by [`FromStr`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.location().is_valid() {
            return Err(ConfigError::InvalidLocation {
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            });
        }
        self.utc_offset()?;
        Ok(())
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(
            self.location.latitude,
            self.location.longitude,
            self.location.altitude_m,
        )
    }

    /// Explicit offset if configured, otherwise the mean solar offset.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        match self.location.utc_offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or(ConfigError::InvalidOffset(minutes)),
            None => Ok(self.location().mean_solar_offset()),
        }
    }

    /// Build and validate the calculation configuration. The method's own
    /// Maghrib delay is applied by the configuration, not stored here.
    pub fn to_configuration(&self) -> Result<CalculationConfiguration, ConfigError> {
        let calc = &self.calculation;
        let mut builder = CalculationConfiguration::builder(calc.method)
            .asr_rule(calc.asr)
            .high_latitude_rule(calc.high_latitude_rule.into())
            .rounding(calc.rounding);
        if let Some(deg) = calc.fajr_angle {
            builder = builder.fajr_angle(deg);
        }
        if let Some(deg) = calc.isha_angle {
            builder = builder.isha_angle(deg);
        }
        if let Some(minutes) = calc.isha_interval_minutes {
            builder = builder.isha_interval_minutes(minutes);
        }
        Ok(builder.adjustments(self.adjustments).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimaz_base::{ConfigurationError, IshaRule, PrayerKind};

    const DUBLIN: &str = r#"
[location]
latitude = 53.3498
longitude = -6.2603
altitude_m = 20.0
utc_offset_minutes = 0

[calculation]
method = "ireland"
asr = "standard"
high_latitude_rule = "twilight_angle"
fajr_angle = 14.0
isha_angle = 14.0
rounding = "nearest_minute"

[adjustments]
fajr = 2
maghrib = 2
"#;

    #[test]
    fn parse_full_file() {
        let s: Settings = DUBLIN.parse().unwrap();
        assert_eq!(s.location().latitude_deg, 53.3498);
        assert_eq!(s.location().altitude_m, 20.0);
        assert_eq!(s.utc_offset().unwrap().local_minus_utc(), 0);

        let c = s.to_configuration().unwrap();
        assert_eq!(c.method(), CalculationMethod::Ireland);
        assert_eq!(c.effective_angles().fajr_deg, 14.0);
        assert_eq!(c.effective_angles().isha, IshaRule::Angle(14.0));
        assert_eq!(c.adjustments().fajr, 2);
        assert_eq!(c.adjustments().maghrib, 2);
        assert_eq!(c.adjustments().isha, 0);
    }

    #[test]
    fn minimal_file_uses_defaults() {
        let s: Settings = "[location]\nlatitude = 24.8607\nlongitude = 67.0011\n"
            .parse()
            .unwrap();
        assert_eq!(s.calculation, CalculationSettings::default());
        assert_eq!(s.utc_offset().unwrap().local_minus_utc(), 268 * 60);
        let c = s.to_configuration().unwrap();
        assert_eq!(c, CalculationConfiguration::default());
    }

    #[test]
    fn method_aliases_accepted() {
        for (alias, method) in [
            ("mwl", CalculationMethod::MuslimWorldLeague),
            ("isna", CalculationMethod::NorthAmerica),
            ("makkah", CalculationMethod::UmmAlQura),
            ("moonsighting", CalculationMethod::MoonsightingCommittee),
        ] {
            let text = format!(
                "[location]\nlatitude = 0.0\nlongitude = 0.0\n[calculation]\nmethod = \"{alias}\"\n"
            );
            let s: Settings = text.parse().unwrap();
            assert_eq!(s.calculation.method, method, "{alias}");
        }
    }

    #[test]
    fn tehran_delay_added_to_file_adjustment() {
        let s: Settings = r#"
[location]
latitude = 35.6892
longitude = 51.389
[calculation]
method = "tehran"
[adjustments]
maghrib = 1
"#
        .parse()
        .unwrap();
        let c = s.to_configuration().unwrap();
        assert_eq!(c.adjustments().maghrib, 1);
        assert_eq!(c.total_adjustment(PrayerKind::Maghrib), 5);
    }

    #[test]
    fn high_latitude_none() {
        let s: Settings = r#"
[location]
latitude = 60.0
longitude = 10.0
[calculation]
high_latitude_rule = "none"
"#
        .parse()
        .unwrap();
        assert_eq!(s.to_configuration().unwrap().high_latitude_rule(), None);
    }

    #[test]
    fn custom_without_angles_rejected() {
        let s: Settings = "[location]\nlatitude = 0.0\nlongitude = 0.0\n[calculation]\nmethod = \"custom\"\nhigh_latitude_rule = \"none\"\n"
            .parse()
            .unwrap();
        let err = s.to_configuration().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Configuration(ConfigurationError::MissingCustomAngle(PrayerKind::Fajr))
        ));
    }

    #[test]
    fn bad_offset_rejected() {
        let err = "[location]\nlatitude = 0.0\nlongitude = 0.0\nutc_offset_minutes = 1500\n"
            .parse::<Settings>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOffset(1500)));
    }

    #[test]
    fn bad_location_rejected() {
        let err = "[location]\nlatitude = 123.0\nlongitude = 0.0\n"
            .parse::<Settings>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLocation { .. }));
    }

    #[test]
    fn unknown_method_is_parse_error() {
        let err = "[location]\nlatitude = 0.0\nlongitude = 0.0\n[calculation]\nmethod = \"atlantis\"\n"
            .parse::<Settings>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn for_location_round_trip() {
        let loc = GeoLocation::new(21.4225, 39.8262, 277.0);
        let s = Settings::for_location(loc);
        assert_eq!(s.location(), loc);
        assert!(s.to_configuration().is_ok());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nimaz.toml");
        std::fs::write(&path, DUBLIN).unwrap();
        let s = Settings::load(&path).unwrap();
        assert_eq!(s.calculation.method, CalculationMethod::Ireland);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
