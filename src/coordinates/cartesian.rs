//! # Cartesian Coordinate Module
//!
//! `Cartesian3` is the working representation for every frame transform in
//! the crate: rotations are plain matrix products here, while spherical
//! values are converted in, rotated and converted back out.
//!
//! The same type holds positions `(x, y, z)` and velocities
//! `(dx/dt, dy/dt, dz/dt)`. Which frame and unit the numbers refer to is
//! tracked by the caller (see [`crate::planetlib::StateVector`]).
//!
//! ## Examples
//!
//! ```rust
//! use ephemeris::coordinates::{Axis, Cartesian3};
//! use std::f64::consts::PI;
//!
//! let mut v = Cartesian3::new(1.0, 0.0, 0.0);
//! v.rotate(Axis::Z, PI / 2.0);
//! assert!((v.y - 1.0).abs() < 1e-15);
//! ```

use super::spherical::Spherical;
use super::{rotation_matrix, Axis};
use crate::units::DistanceUnit;
use nalgebra::Vector3;
use std::fmt;

/// Three-dimensional Cartesian coordinate representation
///
/// In the ecliptical frame +X points at the vernal equinox and +Z at the
/// ecliptic north pole; in the equatorial frame +Z is the celestial north
/// pole; in the horizontal frame +X is south, +Y east and +Z the zenith.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian3 {
    /// The origin
    pub const ZERO: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new Cartesian coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Overwrite all three components
    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Creates a Cartesian coordinate from a spherical one
    ///
    /// See [`Spherical::to_cartesian`] for the formulas.
    pub fn from_spherical(spherical: &Spherical) -> Self {
        spherical.to_cartesian()
    }

    /// Converts to spherical coordinates (radius, longitude, latitude)
    ///
    /// At the origin no direction is defined; the result then has zero
    /// longitude and latitude. Use [`Cartesian3::to_spherical_into`] to keep
    /// an existing direction instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ephemeris::coordinates::Cartesian3;
    ///
    /// let s = Cartesian3::new(0.0, -2.0, 0.0).to_spherical();
    /// assert_eq!(s.radius(), 2.0);
    /// assert!((s.longitude() - 1.5 * std::f64::consts::PI).abs() < 1e-15);
    /// ```
    pub fn to_spherical(&self) -> Spherical {
        let mut out = Spherical::default();
        self.to_spherical_into(&mut out);
        out
    }

    /// Converts into an existing spherical buffer
    ///
    /// `radius = |v|`, `longitude = atan2(y, x)`, `latitude = asin(z / r)`.
    /// When `r == 0` only the radius is written; longitude and latitude keep
    /// whatever `out` held before. This is a defined fallback, not an error.
    pub fn to_spherical_into(&self, out: &mut Spherical) {
        let radius = self.magnitude();
        if radius == 0.0 {
            log::trace!("spherical conversion at the origin keeps previous direction");
            out.set_radius(0.0);
            return;
        }
        let lat = (self.z / radius).clamp(-1.0, 1.0).asin();
        let lon = self.y.atan2(self.x);
        out.set_raw(radius, lon, lat);
    }

    /// Calculates the magnitude (length) of the coordinate vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Length expressed in `target` units, given that the components are in `unit`
    pub fn distance(&self, unit: DistanceUnit, target: DistanceUnit) -> f64 {
        unit.convert(self.magnitude(), target)
    }

    /// Returns a unit vector in the same direction, or `None` at the origin
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }


    /// Rotate in place by `angle` radians about `axis`
    ///
    /// Non-finite angles propagate as NaN components; callers that accept
    /// user input validate angles first (see [`crate::framelib`]).
    pub fn rotate(&mut self, axis: Axis, angle: f64) -> &mut Self {
        let rotated = rotation_matrix(axis, angle) * self.to_vector3();
        self.set(rotated.x, rotated.y, rotated.z)
    }

    /// Rotated copy, leaving `self` untouched
    pub fn rotated(&self, axis: Axis, angle: f64) -> Cartesian3 {
        let mut out = *self;
        out.rotate(axis, angle);
        out
    }

    /// Write the rotated vector into `out`
    pub fn rotate_into(&self, axis: Axis, angle: f64, out: &mut Cartesian3) {
        *out = *self;
        out.rotate(axis, angle);
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl From<Vector3<f64>> for Cartesian3 {
    fn from(vec: Vector3<f64>) -> Self {
        Cartesian3::from_vector3(vec)
    }
}

impl fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cartesian [ x={}, y={}, z={} ]", self.x, self.y, self.z)
    }
}

impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}
