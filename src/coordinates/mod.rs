//! Coordinate primitives: angles, Cartesian and spherical points, axis rotations
//!
//! Rotations use the same matrices for every frame in the crate. About X and
//! Z they are the usual right-handed rotations. About Y the sign of the sine
//! terms is flipped, so that rotating an equatorial vector about Z by the
//! negative local sidereal time and then about Y by `π/2 - latitude` lands
//! the observer's zenith on +Z, south on +X and east on +Y.

pub mod angle;
pub mod cartesian;
pub mod spherical;

pub use angle::{Angle, AngleFormat, Sexagesimal, SexagesimalUnit};
pub use cartesian::Cartesian3;
pub use spherical::{PolarSpherical, Spherical, SphericalVelocity};

use nalgebra::Matrix3;

/// Coordinate axis for elementary rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation matrix for `angle` radians about `axis`
///
/// `rotation_matrix(a, α) * rotation_matrix(a, β)` equals
/// `rotation_matrix(a, α + β)` and a zero angle yields the exact identity.
pub fn rotation_matrix(axis: Axis, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        ),
        Axis::Y => Matrix3::new(
            c, 0.0, -s, //
            0.0, 1.0, 0.0, //
            s, 0.0, c,
        ),
        Axis::Z => Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        ),
    }
}
