//! VSOP87-style orbital series evaluation
//!
//! Each coordinate is a polynomial in `t` (Julian millennia since J2000)
//! whose coefficients are sums of cosine terms:
//!
//! ```text
//! q(t) = Σ_n t^n C_n(t),   C_n(t) = Σ_k a_k cos(φ_k + ω_k t)
//! ```
//!
//! The polynomial is evaluated with Horner's scheme. The derivative is
//! accumulated in the same pass via the product rule, using
//! `S_n(t) = Σ_k -a_k ω_k sin(φ_k + ω_k t)`:
//!
//! ```text
//! q'(t) = Σ_n t^n (S_n(t) + (n + 1) C_{n+1}(t))
//! ```
//!
//! Rectangular tables (VSOP87A/C style) produce x, y, z directly;
//! spherical tables (VSOP87B/D style) produce longitude, latitude and
//! radius, which are remapped into a [`Spherical`].

use super::coefficients::{CoefficientTable, Term, DIMENSIONS};
use super::{Body, Coordinates, StateVector};
use crate::celestial::CelestialObject;
use crate::constants::DAYS_PER_MILLENNIUM;
use crate::coordinates::{Cartesian3, Spherical, SphericalVelocity};
use crate::framelib::Frame;
use crate::time::Time;
use crate::units::DistanceUnit;
use std::sync::Arc;

/// How the three series dimensions are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesLayout {
    /// Dimensions are x, y, z
    Rectangular,
    /// Dimensions are longitude, latitude, radius
    Spherical,
}

/// Result of the most recent evaluation
///
/// Time stamp, velocity flag and values are replaced together so they can
/// never describe different instants.
#[derive(Debug, Clone, Copy)]
struct CachedState {
    epoch_ms: i64,
    with_velocity: bool,
    /// Three position values followed by three per-day rates
    results: [f64; 2 * DIMENSIONS],
}

/// Series evaluator for a single body with a one-slot result cache
///
/// Create one per body and reuse it; a repeated query at the same instant
/// costs no series summation. Not thread-safe by itself: use one instance
/// per thread.
#[derive(Debug, Clone)]
pub struct SeriesEvaluator {
    body: Body,
    table: Arc<CoefficientTable>,
    layout: SeriesLayout,
    cache: Option<CachedState>,
    terms_evaluated: u64,
}

impl SeriesEvaluator {
    pub fn new(body: Body, table: Arc<CoefficientTable>, layout: SeriesLayout) -> Self {
        Self {
            body,
            table,
            layout,
            cache: None,
            terms_evaluated: 0,
        }
    }

    pub fn body(&self) -> Body {
        self.body
    }

    pub fn layout(&self) -> SeriesLayout {
        self.layout
    }

    pub fn table(&self) -> &Arc<CoefficientTable> {
        &self.table
    }

    /// Number of periodic terms summed since construction
    pub fn terms_evaluated(&self) -> u64 {
        self.terms_evaluated
    }

    fn cos_series(&mut self, terms: &[Term], t: f64) -> f64 {
        self.terms_evaluated += terms.len() as u64;
        terms
            .iter()
            .map(|[amplitude, phase, frequency]| amplitude * (phase + frequency * t).cos())
            .sum()
    }

    fn sin_series(&mut self, terms: &[Term], t: f64) -> f64 {
        self.terms_evaluated += terms.len() as u64;
        terms
            .iter()
            .map(|[amplitude, phase, frequency]| {
                -amplitude * frequency * (phase + frequency * t).sin()
            })
            .sum()
    }

    /// Position and, if requested, velocity of one dimension at `t`
    ///
    /// Velocity is in units per Julian millennium.
    fn evaluate_dimension(&mut self, dimension: usize, t: f64, want_velocity: bool) -> (f64, f64) {
        let table = Arc::clone(&self.table);
        let powers = table.powers(dimension);
        let Some(top) = powers.len().checked_sub(1) else {
            return (0.0, 0.0);
        };

        let mut pos = 0.0;
        let mut vel = if want_velocity {
            self.sin_series(&powers[top], t)
        } else {
            0.0
        };
        for n in (1..=top).rev() {
            let c = self.cos_series(&powers[n], t);
            pos = pos * t + c;
            if want_velocity {
                let s = self.sin_series(&powers[n - 1], t);
                vel = vel * t + s + n as f64 * c;
            }
        }
        let c0 = self.cos_series(&powers[0], t);
        (pos * t + c0, vel)
    }

    /// Raw series values at `time`, served from the cache when possible
    fn compute(&mut self, time: &Time, want_velocity: bool) -> [f64; 2 * DIMENSIONS] {
        let epoch_ms = time.epoch_millis();
        if let Some(cached) = &self.cache {
            if cached.epoch_ms == epoch_ms && (!want_velocity || cached.with_velocity) {
                log::trace!("{} series cache hit at {}", self.body, time);
                return cached.results;
            }
        }

        log::debug!(
            "evaluating {} series at {} (velocity: {})",
            self.body,
            time,
            want_velocity
        );
        let t = time.julian_millennia();
        let mut results = [0.0; 2 * DIMENSIONS];
        for dimension in 0..DIMENSIONS {
            let (pos, vel) = self.evaluate_dimension(dimension, t, want_velocity);
            results[dimension] = pos;
            results[dimension + DIMENSIONS] = vel / DAYS_PER_MILLENNIUM;
        }

        self.cache = Some(CachedState {
            epoch_ms,
            with_velocity: want_velocity,
            results,
        });
        results
    }
}

impl CelestialObject for SeriesEvaluator {
    /// Heliocentric ecliptic state in AU, velocity per day
    fn evaluate(&mut self, time: &Time, want_velocity: bool) -> StateVector {
        let r = self.compute(time, want_velocity);
        let coordinates = match self.layout {
            SeriesLayout::Rectangular => Coordinates::Cartesian {
                position: Cartesian3::new(r[0], r[1], r[2]),
                velocity: want_velocity.then(|| Cartesian3::new(r[3], r[4], r[5])),
            },
            SeriesLayout::Spherical => Coordinates::Spherical {
                position: Spherical::new(r[2], r[0], r[1]),
                velocity: want_velocity.then(|| SphericalVelocity::new(r[5], r[3], r[4])),
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table(dimensions: Vec<Vec<Vec<Term>>>) -> Arc<CoefficientTable> {
        Arc::new(CoefficientTable::new(dimensions).unwrap())
    }

    /// x = 1 + 2t, y = cos(1 + 3t), z = t^2 cos(0.5 t)
    fn polynomial_table() -> Arc<CoefficientTable> {
        table(vec![
            vec![vec![[1.0, 0.0, 0.0]], vec![[2.0, 0.0, 0.0]]],
            vec![vec![[1.0, 1.0, 3.0]]],
            vec![vec![], vec![], vec![[1.0, 0.0, 0.5]]],
        ])
    }

    #[test]
    fn test_horner_matches_direct_sum() {
        let mut evaluator =
            SeriesEvaluator::new(Body::Mars, polynomial_table(), SeriesLayout::Rectangular);
        let time = Time::J2000 + 100_000.0;
        let t = time.julian_millennia();

        let state = evaluator.evaluate(&time, true);
        let p = state.cartesian_position();
        assert_relative_eq!(p.x, 1.0 + 2.0 * t, epsilon = 1e-14);
        assert_relative_eq!(p.y, (1.0 + 3.0 * t).cos(), epsilon = 1e-14);
        assert_relative_eq!(p.z, t * t * (0.5 * t).cos(), epsilon = 1e-14);

        let v = state.cartesian_velocity().unwrap();
        let per_day = 1.0 / DAYS_PER_MILLENNIUM;
        assert_relative_eq!(v.x, 2.0 * per_day, epsilon = 1e-18);
        assert_relative_eq!(v.y, -3.0 * (1.0 + 3.0 * t).sin() * per_day, epsilon = 1e-18);
        let dz = 2.0 * t * (0.5 * t).cos() - 0.5 * t * t * (0.5 * t).sin();
        assert_relative_eq!(v.z, dz * per_day, epsilon = 1e-18);
    }

    #[test]
    fn test_spherical_layout_remaps_dimensions() {
        // longitude = 1.0, latitude = 0.25, radius = 2.0
        let lbr = table(vec![
            vec![vec![[1.0, 0.0, 0.0]]],
            vec![vec![[0.25, 0.0, 0.0]]],
            vec![vec![[2.0, 0.0, 0.0]]],
        ]);
        let mut evaluator = SeriesEvaluator::new(Body::Venus, lbr, SeriesLayout::Spherical);
        let state = evaluator.evaluate(&Time::J2000, true);
        match state.coordinates {
            Coordinates::Spherical { position, velocity } => {
                assert_eq!(position.radius(), 2.0);
                assert_eq!(position.longitude(), 1.0);
                assert_eq!(position.latitude(), 0.25);
                assert_eq!(velocity, Some(SphericalVelocity::default()));
            }
            other => panic!("expected spherical coordinates, got {:?}", other),
        }
    }

    #[test]
    fn test_cache_skips_summation() {
        let mut evaluator =
            SeriesEvaluator::new(Body::Mars, polynomial_table(), SeriesLayout::Rectangular);
        let time = Time::parse("2016.01.22 13:03:01").unwrap();

        let first = evaluator.evaluate(&time, false);
        let after_first = evaluator.terms_evaluated();
        assert!(after_first > 0);

        let second = evaluator.evaluate(&time, false);
        assert_eq!(evaluator.terms_evaluated(), after_first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_velocity_request_recomputes_once() {
        let mut evaluator =
            SeriesEvaluator::new(Body::Mars, polynomial_table(), SeriesLayout::Rectangular);
        let time = Time::J2000 + 12.5;

        evaluator.evaluate(&time, false);
        let position_only = evaluator.terms_evaluated();

        // velocity was not cached, so this sums again
        let with_velocity = evaluator.evaluate(&time, true);
        let after_velocity = evaluator.terms_evaluated();
        assert!(after_velocity > position_only);

        // a cached velocity result also serves position-only requests
        let again = evaluator.evaluate(&time, true);
        let position = evaluator.evaluate(&time, false);
        assert_eq!(evaluator.terms_evaluated(), after_velocity);
        assert_eq!(again, with_velocity);
        assert_eq!(position.cartesian_position(), with_velocity.cartesian_position());
        assert!(position.cartesian_velocity().is_none());
    }

    #[test]
    fn test_new_time_invalidates_cache() {
        let mut evaluator =
            SeriesEvaluator::new(Body::Mars, polynomial_table(), SeriesLayout::Rectangular);
        let a = evaluator.evaluate(&Time::J2000, false);
        let count = evaluator.terms_evaluated();
        let b = evaluator.evaluate(&(Time::J2000 + 1000.0), false);
        assert!(evaluator.terms_evaluated() > count);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_table_is_zero() {
        let mut evaluator = SeriesEvaluator::new(
            Body::Pluto,
            table(vec![vec![], vec![], vec![]]),
            SeriesLayout::Rectangular,
        );
        let state = evaluator.evaluate(&Time::J2000, true);
        assert_eq!(state.cartesian_position(), Cartesian3::ZERO);
        assert_eq!(state.cartesian_velocity(), Some(Cartesian3::ZERO));
        assert_eq!(evaluator.terms_evaluated(), 0);
    }
}
