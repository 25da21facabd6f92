//! Celestial body capability shared by every model

use crate::framelib::Frame;
use crate::planetlib::StateVector;
use crate::time::Time;
use crate::units::DistanceUnit;
use crate::Result;

/// Anything that can report its state at a given time
///
/// Implementations may cache between calls, hence `&mut self`.
pub trait CelestialObject {
    /// State at `time`; velocity is filled only when `want_velocity` is set
    fn evaluate(&mut self, time: &Time, want_velocity: bool) -> StateVector;

    /// Distance unit of returned positions
    fn distance_unit(&self) -> DistanceUnit;

    /// Frame of returned positions
    fn frame(&self) -> Frame;
}

/// State of `target` as seen from `observer` at `time`
///
/// With heliocentric models for both, passing Earth as the observer yields
/// the geocentric ecliptic state of the target.
pub fn state_relative_to<T, O>(
    target: &mut T,
    observer: &mut O,
    time: &Time,
    want_velocity: bool,
) -> Result<StateVector>
where
    T: CelestialObject + ?Sized,
    O: CelestialObject + ?Sized,
{
    let target_state = target.evaluate(time, want_velocity);
    let observer_state = observer.evaluate(time, want_velocity);
    target_state.relative_to(&observer_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Cartesian3;
    use crate::planetlib::{Body, SeriesLayout, StationaryModel};

    /// Moves along +X at one unit per day from J2000
    struct Drifter;

    impl CelestialObject for Drifter {
        fn evaluate(&mut self, time: &Time, want_velocity: bool) -> StateVector {
            let days = time.julian_days_since(&Time::J2000);
            StateVector::cartesian(
                Cartesian3::new(days, 0.0, 0.0),
                want_velocity.then_some(Cartesian3::new(1.0, 0.0, 0.0)),
                Frame::Ecliptical,
                DistanceUnit::AstronomicalUnit,
            )
        }

        fn distance_unit(&self) -> DistanceUnit {
            DistanceUnit::AstronomicalUnit
        }

        fn frame(&self) -> Frame {
            Frame::Ecliptical
        }
    }

    #[test]
    fn test_state_relative_to_stationary_origin() {
        let mut sun = StationaryModel::new(Body::Sun, SeriesLayout::Rectangular);
        let time = Time::J2000 + 3.0;
        let state = state_relative_to(&mut Drifter, &mut sun, &time, true).unwrap();
        assert_eq!(state.cartesian_position(), Cartesian3::new(3.0, 0.0, 0.0));
        assert_eq!(state.cartesian_velocity(), Some(Cartesian3::new(1.0, 0.0, 0.0)));

        // and the other way around
        let inverse = state_relative_to(&mut sun, &mut Drifter, &time, false).unwrap();
        assert_eq!(inverse.cartesian_position(), Cartesian3::new(-3.0, 0.0, 0.0));
    }

    #[test]
    fn test_trait_objects() {
        let mut models: Vec<Box<dyn CelestialObject>> = vec![
            Box::new(Drifter),
            Box::new(StationaryModel::new(Body::Sun, SeriesLayout::Spherical)),
        ];
        for model in models.iter_mut() {
            assert_eq!(model.frame(), Frame::Ecliptical);
            assert_eq!(model.evaluate(&Time::J2000, false).unit, model.distance_unit());
        }
    }
}
