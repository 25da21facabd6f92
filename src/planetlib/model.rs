//! Per-body models behind the [`CelestialObject`] interface

use super::vsop87::{SeriesEvaluator, SeriesLayout};
use super::{Body, Coordinates, StateVector};
use crate::celestial::CelestialObject;
use crate::coordinates::{Cartesian3, Spherical, SphericalVelocity};
use crate::framelib::Frame;
use crate::time::Time;
use crate::units::DistanceUnit;

/// A body that sits at the origin of the heliocentric frame
///
/// Always yields zero position and zero velocity without consulting any
/// coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationaryModel {
    body: Body,
    layout: SeriesLayout,
}

impl StationaryModel {
    pub fn new(body: Body, layout: SeriesLayout) -> Self {
        Self { body, layout }
    }

    pub fn body(&self) -> Body {
        self.body
    }
}

impl CelestialObject for StationaryModel {
    fn evaluate(&mut self, _time: &Time, want_velocity: bool) -> StateVector {
        let coordinates = match self.layout {
            SeriesLayout::Rectangular => Coordinates::Cartesian {
                position: Cartesian3::ZERO,
                velocity: want_velocity.then_some(Cartesian3::ZERO),
            },
            SeriesLayout::Spherical => Coordinates::Spherical {
                position: Spherical::default(),
                velocity: want_velocity.then_some(SphericalVelocity::default()),
            },
        };
        StateVector::new(coordinates, Frame::Ecliptical, DistanceUnit::AstronomicalUnit)
    }

    fn distance_unit(&self) -> DistanceUnit {
        DistanceUnit::AstronomicalUnit
    }

    fn frame(&self) -> Frame {
        Frame::Ecliptical
    }
}

/// The model chosen for a body when it is looked up in a registry
#[derive(Debug, Clone)]
pub enum BodyModel {
    Stationary(StationaryModel),
    Series(SeriesEvaluator),
}

impl BodyModel {
    pub fn body(&self) -> Body {
        match self {
            BodyModel::Stationary(model) => model.body(),
            BodyModel::Series(model) => model.body(),
        }
    }
}

impl CelestialObject for BodyModel {
    fn evaluate(&mut self, time: &Time, want_velocity: bool) -> StateVector {
        match self {
            BodyModel::Stationary(model) => model.evaluate(time, want_velocity),
            BodyModel::Series(model) => model.evaluate(time, want_velocity),
        }
    }

    fn distance_unit(&self) -> DistanceUnit {
        match self {
            BodyModel::Stationary(model) => model.distance_unit(),
            BodyModel::Series(model) => model.distance_unit(),
        }
    }

    fn frame(&self) -> Frame {
        match self {
            BodyModel::Stationary(model) => model.frame(),
            BodyModel::Series(model) => model.frame(),
        }
    }
}
