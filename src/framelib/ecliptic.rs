//! Obliquity of the ecliptic

use crate::constants::MEAN_OBLIQUITY_DEG;
use crate::coordinates::Angle;
use crate::time::Time;

/// Mean obliquity of the ecliptic at `time`
///
/// Astronomical Almanac 1984 polynomial in Julian centuries since J2000,
/// returned in degrees.
///
/// ```rust
/// use ephemeris::framelib::mean_obliquity;
/// use ephemeris::time::Time;
///
/// let eps = mean_obliquity(&Time::J2000);
/// assert!((eps.to_degrees() - 23.4392911111).abs() < 1e-12);
/// ```
pub fn mean_obliquity(time: &Time) -> Angle {
    let t = time.julian_centuries();
    let degrees = MEAN_OBLIQUITY_DEG
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * t + c);
    Angle::from_degrees(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_obliquity_decreases() {
        let now = Time::parse("2016.11.10 08:00:00").unwrap();
        let eps = mean_obliquity(&now);
        assert_relative_eq!(eps.to_degrees(), 23.437099, epsilon = 1e-6);
        assert!(eps.to_degrees() < mean_obliquity(&Time::J2000).to_degrees());
    }

    #[test]
    fn test_obliquity_one_century_out() {
        let t = Time::J2000 + 36_525.0;
        let expected = 23.439_291_111_1 - 1.300_416_67e-2 - 1.638_888e-7 + 5.036_111e-7;
        assert_relative_eq!(mean_obliquity(&t).to_degrees(), expected, epsilon = 1e-12);
    }
}
