//! Distance units and conversion constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kilometres in one statute mile.
pub const KM_PER_MI: f64 = 1.609344;

/// Miles in one kilometre (~0.621371).
pub const MI_PER_KM: f64 = 1.0 / KM_PER_MI;

/// Feet in one statute mile. Elevation profiles store rise in feet and run in
/// miles, so grades multiply the run by this.
pub const FEET_PER_MILE: f64 = 5280.0;

/// Feet in one metre.
pub const FEET_PER_METER: f64 = 3.28084;

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Unit for race distances and paces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Mi,
    Km,
}

impl DistanceUnit {
    /// Short suffix used in labels ("mi" / "km").
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistanceUnit::Mi => "mi",
            DistanceUnit::Km => "km",
        }
    }

    /// Converts `value` expressed in `self` into `target`.
    pub fn convert_to(self, target: DistanceUnit, value: f64) -> f64 {
        convert_distance(target, value, self)
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Mi),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(DistanceUnit::Km),
            other => Err(format!("unknown distance unit: {other}")),
        }
    }
}

/// Converts `value` from `from` into `target`.
///
/// Non-finite input stays non-finite (NaN), so invalid distances propagate to
/// the validation layer instead of being silently coerced.
pub fn convert_distance(target: DistanceUnit, value: f64, from: DistanceUnit) -> f64 {
    if !value.is_finite() {
        return f64::NAN;
    }
    if target == from {
        return value;
    }
    match target {
        DistanceUnit::Mi => value * MI_PER_KM,
        DistanceUnit::Km => value * KM_PER_MI,
    }
}

/// Converts a distance in `unit` into miles, the native unit of elevation profiles.
pub fn to_miles(value: f64, unit: DistanceUnit) -> f64 {
    convert_distance(DistanceUnit::Mi, value, unit)
}
