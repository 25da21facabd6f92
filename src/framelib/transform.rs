//! Ecliptical ↔ Equatorial ↔ Horizontal transforms
//!
//! Every transform is a short chain of axis rotations:
//!
//! | from → to                 | rotations                                   |
//! |---------------------------|---------------------------------------------|
//! | ecliptical → equatorial   | X by `+ε`                                   |
//! | equatorial → ecliptical   | X by `-ε`                                   |
//! | equatorial → horizontal   | Z by `-LST`, then Y by `π/2 - φ`            |
//! | horizontal → equatorial   | Y by `φ - π/2`, then Z by `+LST`            |
//!
//! with `ε` the obliquity, `LST` the local sidereal time and `φ` the
//! geographic latitude. Ecliptical ↔ horizontal chains the two legs.
//!
//! Spherical inputs are converted into a scratch Cartesian buffer owned by
//! the [`FrameTransformer`], rotated there, and converted out into a
//! caller-supplied [`Spherical`]. The scratch buffer is never handed out.

use super::{Frame, FrameParameters, ObserverFrame};
use crate::coordinates::{Angle, Axis, Cartesian3, Spherical};
use crate::planetlib::{Coordinates, StateVector};
use crate::{EphemerisError, Result};
use std::f64::consts::FRAC_PI_2;

fn checked_radians(angle: Angle, what: &str) -> Result<f64> {
    if angle.is_finite() {
        Ok(angle.to_radians())
    } else {
        Err(EphemerisError::InvalidArgument(format!(
            "{} must be finite, got {}",
            what, angle
        )))
    }
}

fn rotate_ecliptical_to_equatorial(v: &mut Cartesian3, obliquity: f64) {
    v.rotate(Axis::X, obliquity);
}

fn rotate_equatorial_to_ecliptical(v: &mut Cartesian3, obliquity: f64) {
    v.rotate(Axis::X, -obliquity);
}

fn rotate_equatorial_to_horizontal(v: &mut Cartesian3, observer: &ObserverFrame) {
    v.rotate(Axis::Z, -observer.sidereal_time().to_radians())
        .rotate(Axis::Y, FRAC_PI_2 - observer.latitude().to_radians());
}

fn rotate_horizontal_to_equatorial(v: &mut Cartesian3, observer: &ObserverFrame) {
    v.rotate(Axis::Y, observer.latitude().to_radians() - FRAC_PI_2)
        .rotate(Axis::Z, observer.sidereal_time().to_radians());
}

/// One step between adjacent frames
fn rotate_leg(
    v: &mut Cartesian3,
    from: Frame,
    to: Frame,
    obliquity: f64,
    observer: Option<&ObserverFrame>,
) -> Result<()> {
    match (from, to, observer) {
        (Frame::Ecliptical, Frame::Equatorial, _) => rotate_ecliptical_to_equatorial(v, obliquity),
        (Frame::Equatorial, Frame::Ecliptical, _) => rotate_equatorial_to_ecliptical(v, obliquity),
        (Frame::Equatorial, Frame::Horizontal, Some(observer)) => {
            rotate_equatorial_to_horizontal(v, observer)
        }
        (Frame::Horizontal, Frame::Equatorial, Some(observer)) => {
            rotate_horizontal_to_equatorial(v, observer)
        }
        (Frame::Equatorial, Frame::Horizontal, None)
        | (Frame::Horizontal, Frame::Equatorial, None) => {
            return Err(EphemerisError::InvalidArgument(format!(
                "transforming {} to {} requires an observer",
                from, to
            )))
        }
        _ => {
            return Err(EphemerisError::InvalidArgument(format!(
                "{} and {} are not adjacent frames",
                from, to
            )))
        }
    }
    Ok(())
}

/// Frame transforms with a reusable scratch buffer for spherical input
///
/// Cheap to create; keep one per thread and reuse it.
#[derive(Debug, Clone, Default)]
pub struct FrameTransformer {
    scratch: Cartesian3,
}

impl FrameTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ecliptical_to_equatorial(
        &self,
        ecliptical: &Cartesian3,
        obliquity: Angle,
    ) -> Result<Cartesian3> {
        let eps = checked_radians(obliquity, "obliquity")?;
        let mut v = *ecliptical;
        rotate_ecliptical_to_equatorial(&mut v, eps);
        Ok(v)
    }

    pub fn equatorial_to_ecliptical(
        &self,
        equatorial: &Cartesian3,
        obliquity: Angle,
    ) -> Result<Cartesian3> {
        let eps = checked_radians(obliquity, "obliquity")?;
        let mut v = *equatorial;
        rotate_equatorial_to_ecliptical(&mut v, eps);
        Ok(v)
    }

    pub fn equatorial_to_horizontal(
        &self,
        equatorial: &Cartesian3,
        observer: &ObserverFrame,
    ) -> Cartesian3 {
        let mut v = *equatorial;
        rotate_equatorial_to_horizontal(&mut v, observer);
        v
    }

    pub fn horizontal_to_equatorial(
        &self,
        horizontal: &Cartesian3,
        observer: &ObserverFrame,
    ) -> Cartesian3 {
        let mut v = *horizontal;
        rotate_horizontal_to_equatorial(&mut v, observer);
        v
    }

    /// Equatorial leg followed by the horizontal leg
    pub fn ecliptical_to_horizontal(
        &self,
        ecliptical: &Cartesian3,
        obliquity: Angle,
        observer: &ObserverFrame,
    ) -> Result<Cartesian3> {
        let equatorial = self.ecliptical_to_equatorial(ecliptical, obliquity)?;
        Ok(self.equatorial_to_horizontal(&equatorial, observer))
    }

    pub fn horizontal_to_ecliptical(
        &self,
        horizontal: &Cartesian3,
        obliquity: Angle,
        observer: &ObserverFrame,
    ) -> Result<Cartesian3> {
        let equatorial = self.horizontal_to_equatorial(horizontal, observer);
        self.equatorial_to_ecliptical(&equatorial, obliquity)
    }

    /// Convert `source` into the scratch buffer, rotate it, write into `out`
    ///
    /// `out` keeps its previous direction when the source radius is zero.
    fn via_scratch<F>(&mut self, source: &Spherical, out: &mut Spherical, rotate: F)
    where
        F: FnOnce(&mut Cartesian3),
    {
        source.to_cartesian_into(&mut self.scratch);
        rotate(&mut self.scratch);
        self.scratch.to_spherical_into(out);
    }

    pub fn ecliptical_to_equatorial_spherical(
        &mut self,
        ecliptical: &Spherical,
        obliquity: Angle,
        out: &mut Spherical,
    ) -> Result<()> {
        let eps = checked_radians(obliquity, "obliquity")?;
        self.via_scratch(ecliptical, out, |v| rotate_ecliptical_to_equatorial(v, eps));
        Ok(())
    }

    pub fn equatorial_to_ecliptical_spherical(
        &mut self,
        equatorial: &Spherical,
        obliquity: Angle,
        out: &mut Spherical,
    ) -> Result<()> {
        let eps = checked_radians(obliquity, "obliquity")?;
        self.via_scratch(equatorial, out, |v| rotate_equatorial_to_ecliptical(v, eps));
        Ok(())
    }

    pub fn equatorial_to_horizontal_spherical(
        &mut self,
        equatorial: &Spherical,
        observer: &ObserverFrame,
        out: &mut Spherical,
    ) {
        self.via_scratch(equatorial, out, |v| rotate_equatorial_to_horizontal(v, observer));
    }

    pub fn horizontal_to_equatorial_spherical(
        &mut self,
        horizontal: &Spherical,
        observer: &ObserverFrame,
        out: &mut Spherical,
    ) {
        self.via_scratch(horizontal, out, |v| rotate_horizontal_to_equatorial(v, observer));
    }

    pub fn ecliptical_to_horizontal_spherical(
        &mut self,
        ecliptical: &Spherical,
        obliquity: Angle,
        observer: &ObserverFrame,
        out: &mut Spherical,
    ) -> Result<()> {
        let eps = checked_radians(obliquity, "obliquity")?;
        self.via_scratch(ecliptical, out, |v| {
            rotate_ecliptical_to_equatorial(v, eps);
            rotate_equatorial_to_horizontal(v, observer);
        });
        Ok(())
    }

    pub fn horizontal_to_ecliptical_spherical(
        &mut self,
        horizontal: &Spherical,
        obliquity: Angle,
        observer: &ObserverFrame,
        out: &mut Spherical,
    ) -> Result<()> {
        let eps = checked_radians(obliquity, "obliquity")?;
        self.via_scratch(horizontal, out, |v| {
            rotate_horizontal_to_equatorial(v, observer);
            rotate_equatorial_to_ecliptical(v, eps);
        });
        Ok(())
    }

    /// Move a state (position and velocity) into `target`
    ///
    /// Steps through the frames one leg at a time. Velocities are rotated
    /// like positions; the rotation of the horizontal frame itself is not
    /// added. The result keeps the input's representation (Cartesian or
    /// spherical). The horizontal leg needs `params.observer`, otherwise
    /// this fails with [`EphemerisError::InvalidArgument`].
    pub fn transform_state(
        &mut self,
        state: &StateVector,
        target: Frame,
        params: &FrameParameters,
    ) -> Result<StateVector> {
        if state.frame == target {
            return Ok(*state);
        }
        let eps = checked_radians(params.obliquity, "obliquity")?;
        let observer = params.observer.as_ref();

        let mut position = state.cartesian_position();
        let mut velocity = state.cartesian_velocity();
        let mut frame = state.frame;
        while frame != target {
            let next = match frame {
                Frame::Ecliptical | Frame::Horizontal => Frame::Equatorial,
                Frame::Equatorial if target == Frame::Ecliptical => Frame::Ecliptical,
                Frame::Equatorial => Frame::Horizontal,
            };
            rotate_leg(&mut position, frame, next, eps, observer)?;
            if let Some(v) = velocity.as_mut() {
                rotate_leg(v, frame, next, eps, observer)?;
            }
            frame = next;
        }

        let result = StateVector::cartesian(position, velocity, target, state.unit);
        Ok(match state.coordinates {
            Coordinates::Cartesian { .. } => result,
            Coordinates::Spherical { .. } => result.to_spherical(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framelib::{altitude, azimuth};
    use crate::units::DistanceUnit;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn assert_close(a: &Cartesian3, b: &Cartesian3, eps: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = eps);
        assert_relative_eq!(a.y, b.y, epsilon = eps);
        assert_relative_eq!(a.z, b.z, epsilon = eps);
    }

    fn munich() -> ObserverFrame {
        ObserverFrame::new(Angle::from_hours(21.138611), Angle::from_degrees(48.1351)).unwrap()
    }

    #[test]
    fn test_ecliptic_pole_in_equatorial_frame() {
        let transformer = FrameTransformer::new();
        let eps = Angle::from_degrees(23.44);
        let pole = transformer
            .ecliptical_to_equatorial(&Cartesian3::new(0.0, 0.0, 1.0), eps)
            .unwrap()
            .to_spherical();
        // ecliptic north pole sits at RA 18h, Dec 90° - ε
        assert_relative_eq!(pole.longitude(), 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(pole.latitude().to_degrees(), 90.0 - 23.44, epsilon = 1e-10);
    }

    #[test]
    fn test_ecliptical_equatorial_round_trip() {
        let transformer = FrameTransformer::new();
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..100 {
            let v = Cartesian3::new(
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
            );
            let eps = Angle::from_degrees(rng.gen_range(22.0..25.0));
            let equatorial = transformer.ecliptical_to_equatorial(&v, eps).unwrap();
            let back = transformer.equatorial_to_ecliptical(&equatorial, eps).unwrap();
            assert_close(&v, &back, 1e-12);
        }
    }

    #[test]
    fn test_zenith_maps_to_plus_z() {
        let mut transformer = FrameTransformer::new();
        let observer = munich();
        let zenith = observer.zenith();
        let mut scaled = zenith;
        scaled.set(3.0, zenith.raw_longitude(), zenith.latitude());

        let mut out = Spherical::default();
        transformer.equatorial_to_horizontal_spherical(&scaled, &observer, &mut out);
        assert_relative_eq!(out.radius(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(altitude(&out).to_degrees(), 90.0, epsilon = 1e-6);

        let h = transformer.equatorial_to_horizontal(&scaled.to_cartesian(), &observer);
        assert_relative_eq!(h.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_north_and_east_points() {
        let mut transformer = FrameTransformer::new();
        let observer = munich();
        let lst = observer.sidereal_time().to_radians();
        let lat = observer.latitude().to_radians();

        // north point of the horizon: hour angle 12h, declination 90° - φ
        let north = Spherical::new(1.0, lst + PI, FRAC_PI_2 - lat.abs());
        let mut out = Spherical::default();
        transformer.equatorial_to_horizontal_spherical(&north, &observer, &mut out);
        assert_close(&out.to_cartesian(), &Cartesian3::new(-1.0, 0.0, 0.0), 1e-12);
        // azimuth 0 may come out as 0 or a hair under 360°
        assert_relative_eq!(azimuth(&out).to_radians().cos(), 1.0, epsilon = 1e-12);

        // east point: hour angle 18h on the equator
        let east = Spherical::new(1.0, lst + PI / 2.0, 0.0);
        transformer.equatorial_to_horizontal_spherical(&east, &observer, &mut out);
        assert_close(&out.to_cartesian(), &Cartesian3::new(0.0, 1.0, 0.0), 1e-12);
        assert_relative_eq!(azimuth(&out).to_degrees(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_horizontal_round_trip() {
        let mut transformer = FrameTransformer::new();
        let observer = munich();
        let eps = Angle::from_degrees(23.437);
        let mut rng = StdRng::seed_from_u64(55);
        for _ in 0..50 {
            let source = Spherical::new(
                rng.gen_range(0.5..40.0),
                rng.gen_range(0.0..2.0 * PI),
                rng.gen_range(-1.5..1.5),
            );
            let mut horizontal = Spherical::default();
            let mut back = Spherical::default();
            transformer
                .ecliptical_to_horizontal_spherical(&source, eps, &observer, &mut horizontal)
                .unwrap();
            transformer
                .horizontal_to_ecliptical_spherical(&horizontal, eps, &observer, &mut back)
                .unwrap();
            assert_close(&source.to_cartesian(), &back.to_cartesian(), 1e-10);

            // chaining by hand gives the same result
            let chained = transformer
                .ecliptical_to_horizontal(&source.to_cartesian(), eps, &observer)
                .unwrap();
            assert_close(&chained, &horizontal.to_cartesian(), 1e-10);
        }
    }

    #[test]
    fn test_spherical_output_is_not_scratch() {
        let mut transformer = FrameTransformer::new();
        let eps = Angle::from_degrees(23.44);
        let mut first = Spherical::default();
        let mut second = Spherical::default();
        transformer
            .ecliptical_to_equatorial_spherical(&Spherical::new(1.0, 0.3, 0.1), eps, &mut first)
            .unwrap();
        let saved = first;
        transformer
            .ecliptical_to_equatorial_spherical(&Spherical::new(2.0, 2.0, -0.4), eps, &mut second)
            .unwrap();
        assert_eq!(first, saved);
        assert_ne!(first, second);
    }

    #[test]
    fn test_origin_keeps_previous_direction() {
        let mut transformer = FrameTransformer::new();
        let mut out = Spherical::new(5.0, 1.0, 0.5);
        transformer
            .ecliptical_to_equatorial_spherical(
                &Spherical::new(0.0, 0.2, 0.2),
                Angle::from_degrees(23.44),
                &mut out,
            )
            .unwrap();
        assert_eq!(out.radius(), 0.0);
        assert_eq!(out.raw_longitude(), 1.0);
        assert_eq!(out.latitude(), 0.5);
    }

    #[test]
    fn test_non_finite_obliquity_is_rejected() {
        let mut transformer = FrameTransformer::new();
        let v = Cartesian3::new(1.0, 0.0, 0.0);
        assert!(matches!(
            transformer.ecliptical_to_equatorial(&v, Angle::from_degrees(f64::NAN)),
            Err(EphemerisError::InvalidArgument(_))
        ));
        let mut out = Spherical::default();
        assert!(transformer
            .equatorial_to_ecliptical_spherical(
                &Spherical::new(1.0, 0.0, 0.0),
                Angle::from_radians(f64::INFINITY),
                &mut out
            )
            .is_err());
    }

    #[test]
    fn test_transform_state_round_trip_with_velocity() {
        let mut transformer = FrameTransformer::new();
        let params = FrameParameters::new(Angle::from_degrees(23.44)).with_observer(munich());
        let state = StateVector::cartesian(
            Cartesian3::new(0.3, -0.9, 0.05),
            Some(Cartesian3::new(0.015, 0.005, -1e-4)),
            Frame::Ecliptical,
            DistanceUnit::AstronomicalUnit,
        );

        let horizontal = transformer
            .transform_state(&state, Frame::Horizontal, &params)
            .unwrap();
        assert_eq!(horizontal.frame, Frame::Horizontal);
        let direct = transformer
            .ecliptical_to_horizontal(&state.cartesian_position(), params.obliquity, &munich())
            .unwrap();
        assert_close(&horizontal.cartesian_position(), &direct, 1e-14);

        let back = transformer
            .transform_state(&horizontal, Frame::Ecliptical, &params)
            .unwrap();
        assert_close(&back.cartesian_position(), &state.cartesian_position(), 1e-12);
        assert_close(
            &back.cartesian_velocity().unwrap(),
            &state.cartesian_velocity().unwrap(),
            1e-14,
        );
    }

    #[test]
    fn test_transform_state_keeps_representation() {
        let mut transformer = FrameTransformer::new();
        let params = FrameParameters::new(Angle::from_degrees(23.44));
        let state = StateVector::spherical(
            Spherical::new(1.0, 0.4, 0.0),
            None,
            Frame::Ecliptical,
            DistanceUnit::AstronomicalUnit,
        );
        let equatorial = transformer
            .transform_state(&state, Frame::Equatorial, &params)
            .unwrap();
        assert!(matches!(equatorial.coordinates, Coordinates::Spherical { .. }));
        assert!(!equatorial.has_velocity());

        let same = transformer
            .transform_state(&state, Frame::Ecliptical, &params)
            .unwrap();
        assert_eq!(same, state);
    }

    #[test]
    fn test_transform_state_requires_observer() {
        let mut transformer = FrameTransformer::new();
        let params = FrameParameters::new(Angle::from_degrees(23.44));
        let state = StateVector::cartesian(
            Cartesian3::new(1.0, 0.0, 0.0),
            None,
            Frame::Equatorial,
            DistanceUnit::AstronomicalUnit,
        );
        assert!(matches!(
            transformer.transform_state(&state, Frame::Horizontal, &params),
            Err(EphemerisError::InvalidArgument(_))
        ));
    }
}
