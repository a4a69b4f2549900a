//! Observer site from a settings file and command-line overrides.

use std::path::PathBuf;

use chrono::FixedOffset;
use clap::Args;
use nimaz_base::{
    AsrRule, CalculationConfiguration, CalculationMethod, GeoLocation, HighLatitudeRule,
};
use nimaz_config::{ConfigError, HighLatitudeSetting, Settings};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("either --config or both --lat and --lon are required")]
    MissingLocation,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Location and calculation flags shared by every subcommand.
///
/// Flags override the matching values from `--config`.
#[derive(Debug, Clone, Default, Args)]
pub struct SiteArgs {
    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Latitude in degrees (north positive)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude in degrees (east positive)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,
    /// Altitude above sea level in meters
    #[arg(long, global = true)]
    pub alt: Option<f64>,
    /// Calculation method (mwl, isna, karachi, umm_al_qura, ...)
    #[arg(long, global = true)]
    pub method: Option<CalculationMethod>,
    /// Asr rule: standard or hanafi
    #[arg(long, global = true)]
    pub asr: Option<AsrRule>,
    /// High-latitude rule: none, middle_of_night, seventh_of_night, twilight_angle
    #[arg(long = "high-lat", global = true, value_parser = parse_high_lat)]
    pub high_lat: Option<HighLatitudeSetting>,
    /// Fajr depression angle in degrees
    #[arg(long, global = true)]
    pub fajr_angle: Option<f64>,
    /// Isha depression angle in degrees
    #[arg(long, global = true)]
    pub isha_angle: Option<f64>,
    /// Isha as a fixed number of minutes after Maghrib
    #[arg(long, global = true)]
    pub isha_interval: Option<u32>,
    /// Display offset from UTC, e.g. +05:00
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub utc_offset: Option<FixedOffset>,
}

fn parse_high_lat(s: &str) -> Result<HighLatitudeSetting, String> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(HighLatitudeSetting::None);
    }
    Ok(match s.parse::<HighLatitudeRule>()? {
        HighLatitudeRule::MiddleOfNight => HighLatitudeSetting::MiddleOfNight,
        HighLatitudeRule::SeventhOfNight => HighLatitudeSetting::SeventhOfNight,
        HighLatitudeRule::TwilightAngle => HighLatitudeSetting::TwilightAngle,
    })
}

/// Everything a subcommand needs to compute schedules.
#[derive(Debug, Clone)]
pub struct Site {
    pub location: GeoLocation,
    pub offset: FixedOffset,
    pub config: CalculationConfiguration,
}

impl SiteArgs {
    /// File settings (if any) with flags applied on top, validated.
    pub fn to_settings(&self) -> Result<Settings, SiteError> {
        let mut settings = match (&self.config, self.lat, self.lon) {
            (Some(path), _, _) => Settings::load(path)?,
            (None, Some(lat), Some(lon)) => {
                Settings::for_location(GeoLocation::new(lat, lon, self.alt.unwrap_or(0.0)))
            }
            _ => return Err(SiteError::MissingLocation),
        };

        let loc = &mut settings.location;
        if let Some(lat) = self.lat {
            loc.latitude = lat;
        }
        if let Some(lon) = self.lon {
            loc.longitude = lon;
        }
        if let Some(alt) = self.alt {
            loc.altitude_m = alt;
        }
        if let Some(offset) = self.utc_offset {
            loc.utc_offset_minutes = Some(offset.local_minus_utc() / 60);
        }

        let calc = &mut settings.calculation;
        if let Some(method) = self.method {
            calc.method = method;
        }
        if let Some(asr) = self.asr {
            calc.asr = asr;
        }
        if let Some(rule) = self.high_lat {
            calc.high_latitude_rule = rule;
        }
        if let Some(deg) = self.fajr_angle {
            calc.fajr_angle = Some(deg);
        }
        if let Some(deg) = self.isha_angle {
            calc.isha_angle = Some(deg);
        }
        if let Some(minutes) = self.isha_interval {
            calc.isha_interval_minutes = Some(minutes);
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn to_site(&self) -> Result<Site, SiteError> {
        let settings = self.to_settings()?;
        let site = Site {
            location: settings.location(),
            offset: settings.utc_offset()?,
            config: settings.to_configuration()?,
        };
        debug!(
            "site lat={} lon={} offset={} method={}",
            site.location.latitude_deg,
            site.location.longitude_deg,
            site.offset,
            site.config.method().code()
        );
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimaz_base::{IshaRule, PrayerKind};

    fn at(lat: f64, lon: f64) -> SiteArgs {
        SiteArgs {
            lat: Some(lat),
            lon: Some(lon),
            ..SiteArgs::default()
        }
    }

    #[test]
    fn flags_only() {
        let site = at(24.8607, 67.0011).to_site().unwrap();
        assert_eq!(site.location, GeoLocation::new(24.8607, 67.0011, 0.0));
        assert_eq!(site.config, CalculationConfiguration::default());
        // Mean solar offset of 67.0011 E.
        assert_eq!(site.offset.local_minus_utc(), 268 * 60);
    }

    #[test]
    fn missing_location() {
        let args = SiteArgs {
            lat: Some(10.0),
            ..SiteArgs::default()
        };
        assert!(matches!(args.to_site(), Err(SiteError::MissingLocation)));
    }

    #[test]
    fn calculation_overrides() {
        let args = SiteArgs {
            method: Some(CalculationMethod::Karachi),
            asr: Some(AsrRule::Hanafi),
            high_lat: Some(HighLatitudeSetting::None),
            isha_interval: Some(75),
            utc_offset: FixedOffset::east_opt(5 * 3600),
            ..at(24.8607, 67.0011)
        };
        let site = args.to_site().unwrap();
        assert_eq!(site.config.method(), CalculationMethod::Karachi);
        assert_eq!(site.config.asr_rule(), AsrRule::Hanafi);
        assert_eq!(site.config.high_latitude_rule(), None);
        assert_eq!(
            site.config.effective_angles().isha,
            IshaRule::MinutesAfterMaghrib(75)
        );
        assert_eq!(site.offset.local_minus_utc(), 5 * 3600);
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nimaz.toml");
        std::fs::write(
            &path,
            "[location]\nlatitude = 53.3498\nlongitude = -6.2603\nutc_offset_minutes = 0\n\
             [calculation]\nmethod = \"ireland\"\n[adjustments]\nmaghrib = 2\n",
        )
        .unwrap();

        let args = SiteArgs {
            config: Some(path),
            alt: Some(50.0),
            method: Some(CalculationMethod::MuslimWorldLeague),
            ..SiteArgs::default()
        };
        let site = args.to_site().unwrap();
        assert_eq!(site.location.latitude_deg, 53.3498);
        assert_eq!(site.location.altitude_m, 50.0);
        assert_eq!(site.offset.local_minus_utc(), 0);
        assert_eq!(site.config.method(), CalculationMethod::MuslimWorldLeague);
        // File adjustments survive a method override.
        assert_eq!(site.config.adjustments().get(PrayerKind::Maghrib), 2);
    }

    #[test]
    fn out_of_range_override_rejected() {
        let err = at(95.0, 0.0).to_site().unwrap_err();
        assert!(matches!(
            err,
            SiteError::Config(ConfigError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn high_lat_values() {
        assert_eq!(parse_high_lat("none"), Ok(HighLatitudeSetting::None));
        assert_eq!(
            parse_high_lat("seventh-of-night"),
            Ok(HighLatitudeSetting::SeventhOfNight)
        );
        assert_eq!(
            parse_high_lat("angle"),
            Ok(HighLatitudeSetting::TwilightAngle)
        );
        assert!(parse_high_lat("polar").is_err());
    }
}
