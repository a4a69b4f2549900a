//! Error types for settings loading.

use std::path::PathBuf;

use nimaz_base::ConfigurationError;
use thiserror::Error;

/// Errors from reading or interpreting a settings file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid calculation settings: {0}")]
    Configuration(#[from] ConfigurationError),
    /// Offset beyond +/-24 hours.
    #[error("utc offset of {0} minutes is out of range")]
    InvalidOffset(i32),
    #[error("invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },
}
