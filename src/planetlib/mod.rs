//! Planetary ephemeris calculations module
//!
//! Heliocentric positions come from VSOP87-style series ([`vsop87`]) fed by
//! coefficient tables held in a [`CoefficientRegistry`]. Results are
//! returned as a [`StateVector`] tagged with frame and distance unit.

pub mod coefficients;
pub mod model;
pub mod registry;
pub mod vsop87;

pub use coefficients::{CoefficientTable, Term};
pub use model::{BodyModel, StationaryModel};
pub use registry::CoefficientRegistry;
pub use vsop87::{SeriesEvaluator, SeriesLayout};

use crate::coordinates::{Cartesian3, Spherical, SphericalVelocity};
use crate::framelib::Frame;
use crate::units::DistanceUnit;
use crate::{EphemerisError, Result};
use std::fmt;
use std::str::FromStr;

/// Enum representing the major solar system bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EphemerisError;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EphemerisError::UnknownBody(s.to_string()))
    }
}

/// Position and optional velocity in one representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinates {
    Cartesian {
        position: Cartesian3,
        velocity: Option<Cartesian3>,
    },
    Spherical {
        position: Spherical,
        velocity: Option<SphericalVelocity>,
    },
}

/// A body's state at one instant, tagged with its frame and distance unit
///
/// Velocities are per day: unit/day for lengths, rad/day for angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub coordinates: Coordinates,
    pub frame: Frame,
    pub unit: DistanceUnit,
}

impl StateVector {
    pub fn new(coordinates: Coordinates, frame: Frame, unit: DistanceUnit) -> Self {
        Self {
            coordinates,
            frame,
            unit,
        }
    }

    pub fn cartesian(
        position: Cartesian3,
        velocity: Option<Cartesian3>,
        frame: Frame,
        unit: DistanceUnit,
    ) -> Self {
        Self::new(Coordinates::Cartesian { position, velocity }, frame, unit)
    }

    pub fn spherical(
        position: Spherical,
        velocity: Option<SphericalVelocity>,
        frame: Frame,
        unit: DistanceUnit,
    ) -> Self {
        Self::new(Coordinates::Spherical { position, velocity }, frame, unit)
    }

    pub fn has_velocity(&self) -> bool {
        match &self.coordinates {
            Coordinates::Cartesian { velocity, .. } => velocity.is_some(),
            Coordinates::Spherical { velocity, .. } => velocity.is_some(),
        }
    }

    pub fn cartesian_position(&self) -> Cartesian3 {
        match &self.coordinates {
            Coordinates::Cartesian { position, .. } => *position,
            Coordinates::Spherical { position, .. } => position.to_cartesian(),
        }
    }

    pub fn cartesian_velocity(&self) -> Option<Cartesian3> {
        match &self.coordinates {
            Coordinates::Cartesian { velocity, .. } => *velocity,
            Coordinates::Spherical { position, velocity } => {
                velocity.map(|rates| rates.to_cartesian(position))
            }
        }
    }

    pub fn spherical_position(&self) -> Spherical {
        match &self.coordinates {
            Coordinates::Cartesian { position, .. } => position.to_spherical(),
            Coordinates::Spherical { position, .. } => *position,
        }
    }

    /// Same state in Cartesian form
    pub fn to_cartesian(&self) -> StateVector {
        StateVector::cartesian(
            self.cartesian_position(),
            self.cartesian_velocity(),
            self.frame,
            self.unit,
        )
    }

    /// Same state in spherical form
    pub fn to_spherical(&self) -> StateVector {
        match &self.coordinates {
            Coordinates::Spherical { .. } => *self,
            Coordinates::Cartesian { position, velocity } => StateVector::spherical(
                position.to_spherical(),
                velocity.map(|v| SphericalVelocity::from_cartesian(position, &v)),
                self.frame,
                self.unit,
            ),
        }
    }

    /// State of `self` as seen from `origin`, in Cartesian form
    ///
    /// Subtracting Earth's heliocentric state from a planet's gives the
    /// planet's geocentric state. Both states must share frame and unit.
    /// The result carries a velocity only when both inputs do.
    pub fn relative_to(&self, origin: &StateVector) -> Result<StateVector> {
        if self.frame != origin.frame || self.unit != origin.unit {
            return Err(EphemerisError::InvalidArgument(format!(
                "cannot combine a {} state in {} with a {} state in {}",
                self.frame, self.unit, origin.frame, origin.unit
            )));
        }
        let position = self.cartesian_position() - origin.cartesian_position();
        let velocity = match (self.cartesian_velocity(), origin.cartesian_velocity()) {
            (Some(v), Some(o)) => Some(v - o),
            _ => None,
        };
        Ok(StateVector::cartesian(position, velocity, self.frame, self.unit))
    }
}
