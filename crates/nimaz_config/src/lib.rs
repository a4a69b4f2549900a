//! TOML settings: observer location, display offset, and the prayer
//! calculation configuration.

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{CalculationSettings, HighLatitudeSetting, LocationSettings, Settings};
