//! Sun altitude that marks sunrise and Maghrib.

/// Altitude of the Sun's center when its upper limb touches a sea-level
/// horizon: 34' of refraction plus a 16' semidiameter, rounded the way
/// prayer tables round it.
pub const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Degrees of horizon dip per square root of meter of height.
const DIP_DEG_PER_SQRT_M: f64 = 0.0347;

/// How the observer's height moves sunrise and Maghrib.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevationRule {
    /// Same horizon at every height.
    SeaLevel,
    /// Lower the horizon by `0.0347 * sqrt(h)` degrees, so sunrise comes
    /// earlier and Maghrib later on a mountain or a tower.
    #[default]
    Dip,
}

impl ElevationRule {
    /// Sun altitude in degrees at sunrise and Maghrib for an observer
    /// `altitude_m` above sea level. Heights below sea level count as zero.
    pub fn sunrise_altitude_deg(self, altitude_m: f64) -> f64 {
        match self {
            Self::SeaLevel => SUNRISE_ALTITUDE_DEG,
            Self::Dip => SUNRISE_ALTITUDE_DEG - DIP_DEG_PER_SQRT_M * altitude_m.max(0.0).sqrt(),
        }
    }
}
