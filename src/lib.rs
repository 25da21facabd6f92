//! Ephemeris: solar-system body positions and astronomical frame transforms
//!
//! This crate evaluates VSOP87-style orbital series for heliocentric
//! positions and velocities, and moves them between the ecliptical,
//! equatorial and horizontal frames using an observer's location and the
//! mean sidereal time.
//!
//! ```rust
//! use ephemeris::coordinates::Angle;
//! use ephemeris::framelib::ObserverFrame;
//! use ephemeris::time::Time;
//!
//! let time = Time::parse("2016.01.22 13:03:01").unwrap();
//! let observer = ObserverFrame::at(&time, Angle::from_degrees(11.58), Angle::from_degrees(48.14)).unwrap();
//! assert!(observer.sidereal_time().to_hours() < 24.0);
//! ```

use thiserror::Error;

pub mod celestial;
pub mod constants;
pub mod coordinates;
pub mod framelib;
pub mod planetlib;
pub mod time;
pub mod units;

// Re-export commonly used types
pub use celestial::CelestialObject;
pub use coordinates::{Angle, Cartesian3, Spherical};
pub use framelib::{Frame, FrameTransformer, ObserverFrame};
pub use planetlib::{Body, CoefficientRegistry, StateVector};
pub use time::{CalendarTuple, Time, Timescale};
pub use units::DistanceUnit;

/// Main error type for the ephemeris library
///
/// A position at the origin is not an error; see
/// [`Cartesian3::to_spherical_into`] for the fallback.
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for ephemeris operations
pub type Result<T> = std::result::Result<T, EphemerisError>;
