//! Distance units used to tag positions
//!
//! A [`DistanceUnit`] is a pure conversion factor to meters. Positions carry
//! their unit alongside the numbers so that values from different models
//! (series tables in AU, observer locations in meters) are never mixed by
//! accident.

use crate::constants::{AU_M, LIGHT_SECOND_M, LIGHT_YEAR_M};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length unit with its size in meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    LightYear,
    AstronomicalUnit,
    Meter,
    Kilometer,
    LightSecond,
}

impl DistanceUnit {
    /// Size of one unit in meters
    pub fn to_meters(&self) -> f64 {
        match self {
            DistanceUnit::LightYear => LIGHT_YEAR_M,
            DistanceUnit::AstronomicalUnit => AU_M,
            DistanceUnit::Meter => 1.0,
            DistanceUnit::Kilometer => 1e3,
            DistanceUnit::LightSecond => LIGHT_SECOND_M,
        }
    }

    /// Convert a length expressed in `self` into `target` units
    pub fn convert(&self, value: f64, target: DistanceUnit) -> f64 {
        if *self == target {
            return value;
        }
        value * self.to_meters() / target.to_meters()
    }

    /// Short symbol, e.g. `AU` or `km`
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::LightYear => "ly",
            DistanceUnit::AstronomicalUnit => "AU",
            DistanceUnit::Meter => "m",
            DistanceUnit::Kilometer => "km",
            DistanceUnit::LightSecond => "ls",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
