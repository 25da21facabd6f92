//! # Angle Representation Module
//!
//! This module provides an angle type that remembers the unit it was created
//! in (radians, degrees or hours of right ascension) and converts only on
//! request.
//!
//! ## Internal Storage
//!
//! The `Angle` struct uses an enum-based storage system:
//! - Values provided in degrees are stored exactly as degrees
//! - Values provided in radians are stored exactly as radians
//! - Values provided in hours are stored exactly as hours
//! - Conversion only occurs when explicitly requested via `to_degrees()`,
//!   `to_radians()` or `to_hours()`
//!
//! ## Normalization
//!
//! Stored values are never wrapped. [`Angle::normalized`] folds into one full
//! turn starting at zero, [`Angle::standardized`] into the half-open turn
//! around zero. Both keep the original unit.
//!
//! ## Examples
//!
//! ```rust
//! use ephemeris::coordinates::angle::Angle;
//!
//! let angle = Angle::from_degrees(-90.0).normalized();
//! assert_eq!(angle.to_degrees(), 270.0);
//!
//! let lst = Angle::from_hours(21.138611);
//! assert_eq!(lst.sexagesimal().to_string(), "21:08:19");
//! ```

use crate::constants::{DEG2RAD, HOUR2RAD, RAD2DEG, RAD2HOUR, TAU};
use std::fmt;

/// Internal representation format for angle values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleFormat {
    /// Angle stored in degrees
    Degrees(f64),
    /// Angle stored in radians
    Radians(f64),
    /// Angle stored in hours (15 degrees per hour)
    Hours(f64),
}

impl AngleFormat {
    fn value(&self) -> f64 {
        match *self {
            AngleFormat::Degrees(v) | AngleFormat::Radians(v) | AngleFormat::Hours(v) => v,
        }
    }

    /// Length of a full turn in this format's unit
    fn full_turn(&self) -> f64 {
        match self {
            AngleFormat::Degrees(_) => 360.0,
            AngleFormat::Radians(_) => TAU,
            AngleFormat::Hours(_) => 24.0,
        }
    }

    fn with_value(&self, value: f64) -> AngleFormat {
        match self {
            AngleFormat::Degrees(_) => AngleFormat::Degrees(value),
            AngleFormat::Radians(_) => AngleFormat::Radians(value),
            AngleFormat::Hours(_) => AngleFormat::Hours(value),
        }
    }
}

/// Represents an angular measurement with exact precision preservation
///
/// The `Angle` type stores angular values in their original format
/// (degrees, radians or hours) to maintain maximum precision. Conversion
/// between formats only occurs when explicitly requested.
///
/// Two angles compare equal only when both the format and the stored value
/// match; `Angle::from_degrees(180.0) != Angle::from_radians(PI)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    /// Internal storage maintaining original format and value
    angle: AngleFormat,
}

impl Angle {
    /// Zero radians
    pub const ZERO: Angle = Angle {
        angle: AngleFormat::Radians(0.0),
    };

    /// Creates an angle from a value in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ephemeris::coordinates::angle::Angle;
    ///
    /// let right_angle = Angle::from_degrees(90.0);
    /// assert_eq!(right_angle.to_degrees(), 90.0);
    /// ```
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            angle: AngleFormat::Degrees(degrees),
        }
    }

    /// Creates an angle from a value in radians
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ephemeris::coordinates::angle::Angle;
    ///
    /// let right_angle = Angle::from_radians(std::f64::consts::PI / 2.0);
    /// assert_eq!(right_angle.to_radians(), std::f64::consts::PI / 2.0);
    /// ```
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            angle: AngleFormat::Radians(radians),
        }
    }

    /// Creates an angle from a value in hours, where 24h is a full turn
    pub fn from_hours(hours: f64) -> Self {
        Angle {
            angle: AngleFormat::Hours(hours),
        }
    }

    /// Returns the angle value in degrees
    ///
    /// Angles stored as degrees return the exact original value.
    pub fn to_degrees(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg,
            AngleFormat::Radians(rad) => rad * RAD2DEG,
            AngleFormat::Hours(h) => h * 15.0,
        }
    }

    /// Returns the angle value in radians
    ///
    /// Angles stored as radians return the exact original value.
    pub fn to_radians(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg * DEG2RAD,
            AngleFormat::Radians(rad) => rad,
            AngleFormat::Hours(h) => h * HOUR2RAD,
        }
    }

    /// Returns the angle value in hours
    pub fn to_hours(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg / 15.0,
            AngleFormat::Radians(rad) => rad * RAD2HOUR,
            AngleFormat::Hours(h) => h,
        }
    }

    /// Returns the internal format of this angle
    pub fn format(&self) -> AngleFormat {
        self.angle
    }

    /// `true` unless the stored value is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.angle.value().is_finite()
    }

    /// Folds the angle into `[0, full turn)`, keeping its unit
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ephemeris::coordinates::angle::Angle;
    ///
    /// assert_eq!(Angle::from_hours(-1.0).normalized().to_hours(), 23.0);
    /// assert_eq!(Angle::from_degrees(725.0).normalized().to_degrees(), 5.0);
    /// ```
    pub fn normalized(&self) -> Angle {
        let turn = self.angle.full_turn();
        Angle {
            angle: self.angle.with_value(wrap_positive(self.angle.value(), turn)),
        }
    }

    /// Folds the angle into `(-half turn, half turn]`, keeping its unit
    pub fn standardized(&self) -> Angle {
        let turn = self.angle.full_turn();
        let mut value = wrap_positive(self.angle.value(), turn);
        if value > turn / 2.0 {
            value -= turn;
        }
        Angle {
            angle: self.angle.with_value(value),
        }
    }

    /// Sexagesimal split in the angle's natural unit
    ///
    /// Hour angles split into hours, minutes and seconds; everything else
    /// into degrees, arcminutes and arcseconds.
    pub fn sexagesimal(&self) -> Sexagesimal {
        match self.angle {
            AngleFormat::Hours(h) => Sexagesimal::new(h, SexagesimalUnit::Hours),
            _ => Sexagesimal::new(self.to_degrees(), SexagesimalUnit::Degrees),
        }
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::ZERO
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;

    /// Sums in the unit of the left operand
    fn add(self, other: Angle) -> Angle {
        let rhs = match self.angle {
            AngleFormat::Degrees(_) => other.to_degrees(),
            AngleFormat::Radians(_) => other.to_radians(),
            AngleFormat::Hours(_) => other.to_hours(),
        };
        Angle {
            angle: self.angle.with_value(self.angle.value() + rhs),
        }
    }
}

impl std::ops::Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle {
            angle: self.angle.with_value(-self.angle.value()),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle {
            AngleFormat::Radians(rad) => write!(f, "{:.6} rad", rad),
            _ => write!(f, "{}", self.sexagesimal()),
        }
    }
}

/// Reduce `value` into `[0, turn)`
pub(crate) fn wrap_positive(value: f64, turn: f64) -> f64 {
    let wrapped = value.rem_euclid(turn);
    // rem_euclid can round up to exactly `turn` for tiny negative inputs
    if wrapped >= turn {
        0.0
    } else {
        wrapped
    }
}

/// Unit of the leading field of a [`Sexagesimal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexagesimalUnit {
    Degrees,
    Hours,
}

/// An angle split into sign, integral part, minutes and whole seconds
///
/// Seconds are rounded to the nearest integer before splitting, so
/// `23:59:59.6` becomes `24:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub integral: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub unit: SexagesimalUnit,
}

impl Sexagesimal {
    /// Split a decimal value (degrees or hours) into its sexagesimal parts
    pub fn new(value: f64, unit: SexagesimalUnit) -> Self {
        let total = (value.abs() * 3600.0).round() as u64;
        Sexagesimal {
            negative: value < 0.0 && total > 0,
            integral: (total / 3600) as u32,
            minutes: ((total / 60) % 60) as u32,
            seconds: (total % 60) as u32,
            unit,
        }
    }

    /// Back to a decimal value in the leading unit
    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            self.integral as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        match self.unit {
            SexagesimalUnit::Hours => write!(
                f,
                "{}{:02}:{:02}:{:02}",
                sign, self.integral, self.minutes, self.seconds
            ),
            SexagesimalUnit::Degrees => write!(
                f,
                "{}{:02}d {:02}' {:02}\"",
                sign, self.integral, self.minutes, self.seconds
            ),
        }
    }
}
