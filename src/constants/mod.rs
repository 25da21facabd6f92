//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in meters
pub const AU_M: f64 = 1.495_978_707e11;
/// Light year in meters
pub const LIGHT_YEAR_M: f64 = 9.460_730_472_580_800e15;
/// Light second in meters
pub const LIGHT_SECOND_M: f64 = 2.998e8;

// Time constants
/// Milliseconds in an hour
pub const HOUR_MS: i64 = 3_600_000;
/// Milliseconds in a day
pub const DAY_MS: i64 = 86_400_000;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// J2000.0 epoch (2000-01-01 12:00:00 UTC) in milliseconds since the Unix epoch
pub const J2000_EPOCH_MS: i64 = 946_728_000_000;
/// Julian Day Number of the calendar date 1970-01-01
pub const UNIX_EPOCH_JDN: i64 = 2_440_588;
/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Days in a Julian millennium
pub const DAYS_PER_MILLENNIUM: f64 = 365_250.0;
/// Offset of Terrestrial Dynamical Time against the J2000 day count
pub const TDT_OFFSET: f64 = 1.5;

// Sidereal time
/// Sidereal days elapsed per solar day
pub const SIDEREAL_PER_SOLAR: f64 = 1.002_737_909_35;
/// Solar days elapsed per sidereal day
pub const SOLAR_PER_SIDEREAL: f64 = 1.0 / SIDEREAL_PER_SOLAR;
/// Greenwich mean sidereal time at 0h UT in revolutions, highest power of
/// Julian centuries first
pub const GMST_COEFF_REVOLUTIONS: [f64; 4] = [
    1.0 / 38_710_000.0 / 360.0,
    0.000_387_933 / 360.0,
    36_000.770_053_608 / 360.0,
    100.460_618_37 / 360.0,
];

// Obliquity of the ecliptic (Astronomical Almanac 1984), degrees, constant term first
pub const MEAN_OBLIQUITY_DEG: [f64; 4] = [23.439_291_111_1, -1.300_416_67e-2, -1.638_888e-7, 5.036_111e-7];

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Hours to radians conversion factor
pub const HOUR2RAD: f64 = PI / 12.0;
/// Radians to hours conversion factor
pub const RAD2HOUR: f64 = 12.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i64 = 2_299_161;
