//! Spherical coordinates in two conventions
//!
//! - [`Spherical`]: radius, longitude, **latitude** measured from the
//!   reference plane. Used for ecliptic, equatorial, horizontal and
//!   geographic positions.
//! - [`PolarSpherical`]: radius, azimuth `phi`, **colatitude** `theta`
//!   measured from the +Z pole.
//!
//! The two are separate types; convert explicitly with
//! [`Spherical::to_polar`] and [`PolarSpherical::to_geographic`].
//!
//! Rates of change live in [`SphericalVelocity`], which is never wrapped
//! into an angular range.

use super::angle::{wrap_positive, Angle};
use super::cartesian::Cartesian3;
use crate::constants::TAU;
use crate::units::DistanceUnit;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// Radius, longitude and latitude
///
/// The stored longitude is kept as given and may be negative (series output
/// and `atan2` both produce values below zero). [`Spherical::longitude`]
/// always reports it in `[0, 2π)`.
///
/// ```text
/// x = r cos(lat) cos(lon)
/// y = r cos(lat) sin(lon)
/// z = r sin(lat)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    radius: f64,
    lon: f64,
    lat: f64,
}

impl Spherical {
    /// Create from radius and angles in radians
    pub fn new(radius: f64, lon: f64, lat: f64) -> Self {
        Spherical { radius, lon, lat }
    }

    /// Create from radius and [`Angle`]s
    pub fn from_angles(radius: f64, lon: Angle, lat: Angle) -> Self {
        Spherical::new(radius, lon.to_radians(), lat.to_radians())
    }

    /// Convert a Cartesian vector, see [`Cartesian3::to_spherical_into`]
    pub fn from_cartesian(cartesian: &Cartesian3) -> Self {
        cartesian.to_spherical()
    }

    pub fn set(&mut self, radius: f64, lon: f64, lat: f64) -> &mut Self {
        self.radius = radius;
        self.lon = lon;
        self.lat = lat;
        self
    }

    pub(crate) fn set_raw(&mut self, radius: f64, lon: f64, lat: f64) {
        self.set(radius, lon, lat);
    }

    pub(crate) fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Longitude in radians, `[0, 2π)`
    pub fn longitude(&self) -> f64 {
        wrap_positive(self.lon, TAU)
    }

    /// Longitude exactly as stored
    pub fn raw_longitude(&self) -> f64 {
        self.lon
    }

    /// Latitude in radians
    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude_angle(&self) -> Angle {
        Angle::from_radians(self.longitude())
    }

    pub fn latitude_angle(&self) -> Angle {
        Angle::from_radians(self.lat)
    }

    /// Length in `target` units, given that the radius is in `unit`
    pub fn distance(&self, unit: DistanceUnit, target: DistanceUnit) -> f64 {
        unit.convert(self.radius, target)
    }

    /// Fold latitude back into `[-π/2, π/2]` and longitude into `(-π, π]`
    ///
    /// A latitude past a pole is mirrored and the longitude turned by π,
    /// so the Cartesian point is unchanged.
    pub fn standardize(&mut self) -> &mut Self {
        let mut lat = standardize_half_turn(self.lat);
        let mut lon = self.lon;
        if lat > FRAC_PI_2 {
            lat = PI - lat;
            lon += PI;
        } else if lat < -FRAC_PI_2 {
            lat = -PI - lat;
            lon += PI;
        }
        self.lat = lat;
        self.lon = standardize_half_turn(lon);
        self
    }

    /// Convert to Cartesian coordinates
    pub fn to_cartesian(&self) -> Cartesian3 {
        let mut out = Cartesian3::ZERO;
        self.to_cartesian_into(&mut out);
        out
    }

    /// Convert into an existing Cartesian buffer
    pub fn to_cartesian_into(&self, out: &mut Cartesian3) {
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        out.set(
            self.radius * cos_lat * cos_lon,
            self.radius * cos_lat * sin_lon,
            self.radius * sin_lat,
        );
    }

    /// Same point with colatitude `π/2 - lat`
    pub fn to_polar(&self) -> PolarSpherical {
        PolarSpherical {
            r: self.radius,
            phi: self.lon,
            theta: FRAC_PI_2 - self.lat,
        }
    }
}

impl fmt::Display for Spherical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Spherical [ r={}, lon={} ({}), lat={} ({}) ]",
            self.radius,
            self.longitude(),
            Angle::from_degrees(self.longitude().to_degrees()).sexagesimal(),
            self.lat,
            Angle::from_degrees(self.lat.to_degrees()).sexagesimal()
        )
    }
}

/// Radius, azimuth `phi` and colatitude `theta`
///
/// ```text
/// x = r sin(theta) cos(phi)
/// y = r sin(theta) sin(phi)
/// z = r cos(theta)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarSpherical {
    pub r: f64,
    pub phi: f64,
    pub theta: f64,
}

impl PolarSpherical {
    pub fn new(r: f64, phi: f64, theta: f64) -> Self {
        PolarSpherical { r, phi, theta }
    }

    pub fn to_cartesian(&self) -> Cartesian3 {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Cartesian3::new(
            self.r * sin_theta * cos_phi,
            self.r * sin_theta * sin_phi,
            self.r * cos_theta,
        )
    }

    /// Convert a Cartesian vector; the origin maps to all zeros
    pub fn from_cartesian(cartesian: &Cartesian3) -> Self {
        let r = cartesian.magnitude();
        if r == 0.0 {
            return PolarSpherical::default();
        }
        PolarSpherical {
            r,
            phi: cartesian.y.atan2(cartesian.x),
            theta: (cartesian.z / r).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Same point with latitude `π/2 - theta`
    pub fn to_geographic(&self) -> Spherical {
        Spherical::new(self.r, self.phi, FRAC_PI_2 - self.theta)
    }
}

/// Time derivatives of (radius, longitude, latitude)
///
/// Angular rates are in radians per day; the radial rate is in the distance
/// unit of the accompanying position per day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalVelocity {
    pub radius_rate: f64,
    pub longitude_rate: f64,
    pub latitude_rate: f64,
}

impl SphericalVelocity {
    pub fn new(radius_rate: f64, longitude_rate: f64, latitude_rate: f64) -> Self {
        SphericalVelocity {
            radius_rate,
            longitude_rate,
            latitude_rate,
        }
    }

    /// Cartesian velocity of a point moving with these rates through `position`
    pub fn to_cartesian(&self, position: &Spherical) -> Cartesian3 {
        let r = position.radius();
        let (sl, cl) = position.raw_longitude().sin_cos();
        let (sb, cb) = position.latitude().sin_cos();
        let (dr, dl, db) = (self.radius_rate, self.longitude_rate, self.latitude_rate);
        Cartesian3::new(
            dr * cl * cb - r * (dl * sl * cb + db * cl * sb),
            dr * sl * cb + r * (dl * cl * cb - db * sl * sb),
            dr * sb + r * db * cb,
        )
    }

    /// Rates of a point at `position` moving with Cartesian `velocity`
    ///
    /// On the polar axis the angular rates are undefined and reported as zero.
    pub fn from_cartesian(position: &Cartesian3, velocity: &Cartesian3) -> Self {
        let r = position.magnitude();
        if r == 0.0 {
            return SphericalVelocity::new(velocity.magnitude(), 0.0, 0.0);
        }
        let radius_rate = position.dot(velocity) / r;
        let rho_sq = position.x * position.x + position.y * position.y;
        if rho_sq == 0.0 {
            return SphericalVelocity::new(radius_rate, 0.0, 0.0);
        }
        let rho = rho_sq.sqrt();
        SphericalVelocity {
            radius_rate,
            longitude_rate: (position.x * velocity.y - position.y * velocity.x) / rho_sq,
            latitude_rate: (velocity.z - position.z * radius_rate / r) / rho,
        }
    }
}

fn standardize_half_turn(angle: f64) -> f64 {
    let wrapped = wrap_positive(angle, TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_longitude_accessor_range() {
        for lon in [-0.1, -PI, -3.0 * PI, -1e-17, 0.0, 7.0] {
            let s = Spherical::new(1.0, lon, 0.0);
            let l = s.longitude();
            assert!((0.0..TAU).contains(&l), "lon {} -> {}", lon, l);
            assert_eq!(s.raw_longitude(), lon);
        }
        assert_relative_eq!(Spherical::new(1.0, -0.1, 0.0).longitude(), TAU - 0.1);
    }

    #[test]
    fn test_latitude_convention() {
        let north = Spherical::new(2.0, 0.3, FRAC_PI_2).to_cartesian();
        assert_relative_eq!(north.z, 2.0, epsilon = 1e-15);
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_colatitude_convention() {
        let pole = PolarSpherical::new(2.0, 0.3, 0.0).to_cartesian();
        assert_relative_eq!(pole.z, 2.0, epsilon = 1e-15);

        let equator = PolarSpherical::new(1.0, FRAC_PI_2, FRAC_PI_2).to_cartesian();
        assert_relative_eq!(equator.y, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_polar_geographic_conversion() {
        let geo = Spherical::new(3.0, 1.1, 0.4);
        let polar = geo.to_polar();
        assert_relative_eq!(polar.theta, FRAC_PI_2 - 0.4);

        let a = geo.to_cartesian();
        let b = polar.to_cartesian();
        assert_relative_eq!(a.x, b.x, epsilon = 1e-14);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-14);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-14);

        let back = polar.to_geographic();
        assert_relative_eq!(back.latitude(), 0.4, epsilon = 1e-15);
    }

    #[test]
    fn test_polar_round_trip() {
        let v = Cartesian3::new(-1.0, 2.0, -0.5);
        let back = PolarSpherical::from_cartesian(&v).to_cartesian();
        assert_relative_eq!(back.x, v.x, epsilon = 1e-14);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-14);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-14);
        assert_eq!(PolarSpherical::from_cartesian(&Cartesian3::ZERO), PolarSpherical::default());
    }

    #[test]
    fn test_standardize_past_pole() {
        let mut s = Spherical::new(1.0, 0.2, PI / 2.0 + 0.3);
        let before = s.to_cartesian();
        s.standardize();
        assert_relative_eq!(s.latitude(), PI / 2.0 - 0.3, epsilon = 1e-15);
        assert_relative_eq!(s.raw_longitude(), 0.2 + PI - TAU, epsilon = 1e-15);
        let after = s.to_cartesian();
        assert_relative_eq!(before.x, after.x, epsilon = 1e-15);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-15);
        assert_relative_eq!(before.z, after.z, epsilon = 1e-15);
    }

    #[test]
    fn test_velocity_round_trip() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let position = Cartesian3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let velocity = Cartesian3::new(
                rng.gen_range(-0.1..0.1),
                rng.gen_range(-0.1..0.1),
                rng.gen_range(-0.1..0.1),
            );
            let rates = SphericalVelocity::from_cartesian(&position, &velocity);
            let back = rates.to_cartesian(&position.to_spherical());
            assert_relative_eq!(back.x, velocity.x, epsilon = 1e-12);
            assert_relative_eq!(back.y, velocity.y, epsilon = 1e-12);
            assert_relative_eq!(back.z, velocity.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let p0 = Spherical::new(1.5, 0.7, 0.2);
        let rates = SphericalVelocity::new(0.01, 0.02, -0.005);
        let h = 1e-6;
        let p1 = Spherical::new(
            1.5 + 0.01 * h,
            0.7 + 0.02 * h,
            0.2 - 0.005 * h,
        );
        let numeric = (p1.to_cartesian() - p0.to_cartesian()) / h;
        let analytic = rates.to_cartesian(&p0);
        assert_relative_eq!(numeric.x, analytic.x, epsilon = 1e-8);
        assert_relative_eq!(numeric.y, analytic.y, epsilon = 1e-8);
        assert_relative_eq!(numeric.z, analytic.z, epsilon = 1e-8);
    }

    #[test]
    fn test_velocity_on_polar_axis() {
        let rates = SphericalVelocity::from_cartesian(
            &Cartesian3::new(0.0, 0.0, 2.0),
            &Cartesian3::new(0.1, 0.0, 0.3),
        );
        assert_relative_eq!(rates.radius_rate, 0.3);
        assert_eq!(rates.longitude_rate, 0.0);
        assert_eq!(rates.latitude_rate, 0.0);
    }
}
