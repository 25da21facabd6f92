//! Reference frames and the observer description needed to reach them
//!
//! Three frames are supported:
//!
//! - [`Frame::Ecliptical`]: heliocentric, ecliptic plane, +X at the vernal
//!   equinox. Orbital series produce this frame.
//! - [`Frame::Equatorial`]: Earth's equatorial plane, +Z at the celestial
//!   north pole.
//! - [`Frame::Horizontal`]: observer-local, +X south, +Y east, +Z zenith.
//!
//! Transforms live in [`transform`]; this module holds the parameters they
//! take and the accessors that read horizontal and equatorial angles.

pub mod ecliptic;
pub mod transform;

pub use ecliptic::mean_obliquity;
pub use transform::FrameTransformer;

use crate::constants::RAD2HOUR;
use crate::coordinates::{Angle, Spherical};
use crate::time::Time;
use crate::{EphemerisError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// Reference frame tag carried by every [`crate::planetlib::StateVector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frame {
    Ecliptical,
    Equatorial,
    Horizontal,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frame::Ecliptical => "ecliptical",
            Frame::Equatorial => "equatorial",
            Frame::Horizontal => "horizontal",
        };
        f.write_str(name)
    }
}

/// Orientation of an observer's horizontal frame
///
/// Holds the local sidereal time in the longitude role and the geographic
/// latitude in the latitude role. Read as an equatorial direction this is
/// the observer's zenith: right ascension equal to the local sidereal time,
/// declination equal to the latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverFrame {
    sidereal_time: Angle,
    latitude: Angle,
}

impl ObserverFrame {
    /// Fails with [`EphemerisError::InvalidArgument`] for non-finite angles
    /// or a latitude beyond the poles.
    pub fn new(sidereal_time: Angle, latitude: Angle) -> Result<Self> {
        if !sidereal_time.is_finite() || !latitude.is_finite() {
            return Err(EphemerisError::InvalidArgument(format!(
                "observer angles must be finite (sidereal time {}, latitude {})",
                sidereal_time, latitude
            )));
        }
        if latitude.to_radians().abs() > FRAC_PI_2 + 1e-12 {
            return Err(EphemerisError::InvalidArgument(format!(
                "latitude {} is beyond the pole",
                latitude
            )));
        }
        Ok(Self {
            sidereal_time,
            latitude,
        })
    }

    /// Observer at geographic `longitude` (east positive) and `latitude`,
    /// oriented by the local mean sidereal time at `time`
    pub fn at(time: &Time, longitude: Angle, latitude: Angle) -> Result<Self> {
        if !longitude.is_finite() {
            return Err(EphemerisError::InvalidArgument(format!(
                "longitude {} is not finite",
                longitude
            )));
        }
        Self::new(time.local_mean_sidereal_time(longitude), latitude)
    }

    pub fn sidereal_time(&self) -> Angle {
        self.sidereal_time
    }

    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    /// The zenith as a unit equatorial direction
    pub fn zenith(&self) -> Spherical {
        Spherical::new(
            1.0,
            self.sidereal_time.to_radians(),
            self.latitude.to_radians(),
        )
    }
}

/// Everything frame transforms may need besides the coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParameters {
    pub obliquity: Angle,
    pub observer: Option<ObserverFrame>,
}

impl FrameParameters {
    pub fn new(obliquity: Angle) -> Self {
        Self {
            obliquity,
            observer: None,
        }
    }

    /// Mean obliquity at `time`, no observer
    pub fn mean_of_date(time: &Time) -> Self {
        Self::new(mean_obliquity(time))
    }

    pub fn with_observer(mut self, observer: ObserverFrame) -> Self {
        self.observer = Some(observer);
        self
    }
}

/// Azimuth of a horizontal position, measured from north through east
pub fn azimuth(horizontal: &Spherical) -> Angle {
    Angle::from_radians(PI - horizontal.raw_longitude()).normalized()
}

/// Altitude of a horizontal position above the horizon
pub fn altitude(horizontal: &Spherical) -> Angle {
    Angle::from_radians(horizontal.latitude())
}

/// Right ascension of an equatorial position, in hours
pub fn right_ascension(equatorial: &Spherical) -> Angle {
    Angle::from_hours(equatorial.longitude() * RAD2HOUR)
}

/// Declination of an equatorial position
pub fn declination(equatorial: &Spherical) -> Angle {
    Angle::from_radians(equatorial.latitude())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Cartesian3;
    use approx::assert_relative_eq;

    #[test]
    fn test_observer_validation() {
        assert!(ObserverFrame::new(Angle::from_hours(3.0), Angle::from_degrees(48.0)).is_ok());
        assert!(ObserverFrame::new(Angle::from_hours(f64::NAN), Angle::ZERO).is_err());
        assert!(ObserverFrame::new(Angle::ZERO, Angle::from_degrees(91.0)).is_err());
        assert!(ObserverFrame::at(
            &Time::J2000,
            Angle::from_degrees(f64::INFINITY),
            Angle::ZERO
        )
        .is_err());
    }

    #[test]
    fn test_observer_at_uses_local_sidereal_time() {
        let time = Time::parse("2016.01.22 13:03:01").unwrap();
        let longitude = Angle::from_degrees(-71.0);
        let observer = ObserverFrame::at(&time, longitude, Angle::from_degrees(-33.4)).unwrap();
        assert_relative_eq!(
            observer.sidereal_time().to_hours(),
            time.local_mean_sidereal_time(longitude).to_hours()
        );
        assert_relative_eq!(observer.zenith().latitude(), (-33.4f64).to_radians());
    }

    #[test]
    fn test_horizontal_accessors() {
        let north = Cartesian3::new(-1.0, 0.0, 0.0).to_spherical();
        assert_relative_eq!(azimuth(&north).to_degrees(), 0.0, epsilon = 1e-12);

        let east = Cartesian3::new(0.0, 1.0, 0.0).to_spherical();
        assert_relative_eq!(azimuth(&east).to_degrees(), 90.0, epsilon = 1e-12);

        let south = Cartesian3::new(1.0, 0.0, 1.0).to_spherical();
        assert_relative_eq!(azimuth(&south).to_degrees(), 180.0, epsilon = 1e-12);
        assert_relative_eq!(altitude(&south).to_degrees(), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_equatorial_accessors() {
        let p = Spherical::new(1.0, -PI / 2.0, 0.3);
        assert_relative_eq!(right_ascension(&p).to_hours(), 18.0, epsilon = 1e-12);
        assert_relative_eq!(declination(&p).to_radians(), 0.3);
    }

    #[test]
    fn test_frame_display() {
        assert_eq!(Frame::Horizontal.to_string(), "horizontal");
    }
}
