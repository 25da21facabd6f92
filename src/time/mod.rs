//! Time module for astronomical time calculations
//!
//! A [`Time`] is an instant in UTC, stored as integer milliseconds since the
//! Unix epoch. Everything else derives from that count: the Julian Day
//! Number, the Julian-millennia offset that drives the orbital series, and
//! Greenwich mean sidereal time.
//!
//! Calendar input goes through a [`Timescale`], which decides how dates are
//! read (proleptic Gregorian, or Julian before a configurable cutoff).

pub mod calendar;

use crate::constants::{
    DAYS_PER_CENTURY, DAYS_PER_MILLENNIUM, DAY_MS, GMST_COEFF_REVOLUTIONS, HOUR_MS, J2000,
    J2000_EPOCH_MS, SIDEREAL_PER_SOLAR, SOLAR_PER_SIDEREAL, TDT_OFFSET, UNIX_EPOCH_JDN,
};
use crate::coordinates::angle::{wrap_positive, Angle};
use crate::{EphemerisError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::fmt;
use std::ops::{Add, Sub};

/// Date format used by [`Time::parse`] and `Display`
pub const DATE_FORMAT: &str = "%Y.%m.%d %H:%M:%S";
/// Alternative day-first format with only an hour field
pub const DAY_HOUR_FORMAT: &str = "%d/%m/%Y";

/// Calendar tuple for representing a date and time
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl From<(i32, u32, u32, u32, u32, f64)> for CalendarTuple {
    fn from(tuple: (i32, u32, u32, u32, u32, f64)) -> Self {
        CalendarTuple {
            year: tuple.0,
            month: tuple.1,
            day: tuple.2,
            hour: tuple.3,
            minute: tuple.4,
            second: tuple.5,
        }
    }
}

impl From<(i32, u32, u32)> for CalendarTuple {
    fn from(date: (i32, u32, u32)) -> Self {
        (date.0, date.1, date.2, 0, 0, 0.0).into()
    }
}

impl From<NaiveDateTime> for CalendarTuple {
    fn from(dt: NaiveDateTime) -> Self {
        CalendarTuple {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second() as f64 + dt.nanosecond() as f64 / 1e9,
        }
    }
}

/// Calendar configuration for turning dates into [`Time`]s
///
/// The default reads every date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timescale {
    /// Julian Day Number before which dates are in the Julian calendar
    julian_calendar_cutoff: Option<i64>,
}

impl Timescale {
    pub fn new(julian_calendar_cutoff: Option<i64>) -> Self {
        Self {
            julian_calendar_cutoff,
        }
    }

    /// Read dates before day number `jdn` in the Julian calendar
    ///
    /// `Timescale::with_julian_calendar_before(GREGORIAN_START)` reproduces
    /// the 1582 reform.
    pub fn with_julian_calendar_before(jdn: i64) -> Self {
        Self::new(Some(jdn))
    }

    pub fn julian_calendar_cutoff(&self) -> Option<i64> {
        self.julian_calendar_cutoff
    }

    /// Julian Day Number of a calendar date under this timescale's rules
    pub fn julian_day(&self, year: i32, month: u32, day: u32) -> i64 {
        calendar::julian_day_number(year, month, day, self.julian_calendar_cutoff)
    }

    /// Create a time from a UTC date and time
    ///
    /// Fails with [`EphemerisError::InvalidDate`] for a month, day or
    /// time-of-day outside its calendar range, for days dropped at the
    /// Julian calendar cutoff, and for years whose millisecond count does
    /// not fit in an `i64`.
    pub fn utc<T: Into<CalendarTuple>>(&self, date: T) -> Result<Time> {
        let cal = date.into();
        let julian = match self.julian_calendar_cutoff {
            Some(cutoff) => calendar::gregorian_day_number(cal.year, cal.month, 1) < cutoff,
            None => false,
        };
        let month_days = calendar::days_in_month(cal.year, cal.month, julian)
            .ok_or_else(|| EphemerisError::InvalidDate(format!("month {} out of range", cal.month)))?;
        if cal.day == 0 || cal.day > month_days {
            return Err(EphemerisError::InvalidDate(format!(
                "day {} out of range for {:04}-{:02}",
                cal.day, cal.year, cal.month
            )));
        }
        if cal.hour > 23 || cal.minute > 59 || !(0.0..60.0).contains(&cal.second) {
            return Err(EphemerisError::InvalidDate(format!(
                "time of day {:02}:{:02}:{} out of range",
                cal.hour, cal.minute, cal.second
            )));
        }

        if let Some(cutoff) = self.julian_calendar_cutoff {
            if calendar::gregorian_day_number(cal.year, cal.month, cal.day) < cutoff
                && calendar::julian_calendar_day_number(cal.year, cal.month, cal.day) >= cutoff
            {
                return Err(EphemerisError::InvalidDate(format!(
                    "{:04}-{:02}-{:02} was skipped by the calendar reform",
                    cal.year, cal.month, cal.day
                )));
            }
        }

        let jdn = self.julian_day(cal.year, cal.month, cal.day);
        let ms_of_day = cal.hour as i64 * HOUR_MS
            + cal.minute as i64 * 60_000
            + (cal.second * 1000.0).round() as i64;
        let epoch_ms = jdn
            .checked_sub(UNIX_EPOCH_JDN)
            .and_then(|days| days.checked_mul(DAY_MS))
            .and_then(|ms| ms.checked_add(ms_of_day))
            .ok_or_else(|| {
                EphemerisError::InvalidDate(format!(
                    "year {} outside the representable range",
                    cal.year
                ))
            })?;
        Ok(Time { epoch_ms })
    }

    /// Create a time from a UTC datetime
    pub fn from_datetime(&self, dt: DateTime<Utc>) -> Time {
        Time::from(dt)
    }

    /// Parse `yyyy.MM.dd HH:mm:ss` or `dd/MM/yyyy HH` as UTC
    pub fn parse(&self, s: &str) -> Result<Time> {
        let s = s.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATE_FORMAT) {
            return self.utc(CalendarTuple::from(dt));
        }
        if let Some((date, hour)) = s.split_once(' ') {
            if let (Ok(date), Ok(hour)) = (
                NaiveDate::parse_from_str(date, DAY_HOUR_FORMAT),
                hour.trim().parse::<u32>(),
            ) {
                return self.utc((date.year(), date.month(), date.day(), hour, 0, 0.0));
            }
        }
        Err(EphemerisError::InvalidDate(format!(
            "unrecognized date '{}'",
            s
        )))
    }

    /// Split a time back into its calendar fields under this timescale's rules
    pub fn to_calendar(&self, time: &Time) -> CalendarTuple {
        let days = time.epoch_ms.div_euclid(DAY_MS);
        let ms_of_day = time.epoch_ms.rem_euclid(DAY_MS);
        let (year, month, day) =
            calendar::calendar_date(days + UNIX_EPOCH_JDN, self.julian_calendar_cutoff);

        CalendarTuple {
            year,
            month,
            day,
            hour: (ms_of_day / HOUR_MS) as u32,
            minute: ((ms_of_day % HOUR_MS) / 60_000) as u32,
            second: (ms_of_day % 60_000) as f64 / 1000.0,
        }
    }
}

/// Which way [`Time::adjust_to_time_of_passage`] searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDirection {
    Past,
    Future,
}

/// An instant in UTC with millisecond resolution
///
/// Two `Time`s are equal exactly when their millisecond counts match, which
/// is what the series evaluator cache keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    epoch_ms: i64,
}

impl Time {
    /// 2000-01-01 12:00:00 UTC, Julian Day Number 2451545.0
    pub const J2000: Time = Time {
        epoch_ms: J2000_EPOCH_MS,
    };

    pub fn from_epoch_millis(epoch_ms: i64) -> Self {
        Time { epoch_ms }
    }

    /// Create from a (fractional) Julian Day Number
    pub fn from_julian_day(jd: f64) -> Result<Self> {
        if !jd.is_finite() {
            return Err(EphemerisError::InvalidArgument(format!(
                "julian day {} is not finite",
                jd
            )));
        }
        let ms = ((jd - J2000) * DAY_MS as f64).round();
        if ms.abs() > i64::MAX as f64 / 2.0 {
            return Err(EphemerisError::InvalidDate(format!(
                "julian day {} out of range",
                jd
            )));
        }
        Ok(Time {
            epoch_ms: J2000_EPOCH_MS + ms as i64,
        })
    }

    /// Add a number of days, failing instead of saturating
    ///
    /// Non-finite offsets are an [`EphemerisError::InvalidArgument`]; a sum
    /// outside the millisecond range is an [`EphemerisError::InvalidDate`].
    pub fn checked_add_days(&self, days: f64) -> Result<Time> {
        if !days.is_finite() {
            return Err(EphemerisError::InvalidArgument(format!(
                "day offset {} is not finite",
                days
            )));
        }
        let ms = (days * DAY_MS as f64).round();
        let out_of_range = || {
            EphemerisError::InvalidDate(format!(
                "{} days from {} ms leaves the representable range",
                days, self.epoch_ms
            ))
        };
        if ms < i64::MIN as f64 || ms >= i64::MAX as f64 {
            return Err(out_of_range());
        }
        self.epoch_ms
            .checked_add(ms as i64)
            .map(|epoch_ms| Time { epoch_ms })
            .ok_or_else(out_of_range)
    }

    /// Get the current time
    pub fn now() -> Self {
        Time::from(Utc::now())
    }

    /// Parse a date string with the default [`Timescale`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ephemeris::time::Time;
    ///
    /// let t = Time::parse("2000.01.01 12:00:00").unwrap();
    /// assert_eq!(t, Time::J2000);
    /// assert!(Time::parse("2000-01-01").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        Timescale::default().parse(s)
    }

    pub fn epoch_millis(&self) -> i64 {
        self.epoch_ms
    }

    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.epoch_ms).ok_or_else(|| {
            EphemerisError::InvalidDate(format!(
                "{} ms is outside the supported datetime range",
                self.epoch_ms
            ))
        })
    }

    /// Julian Day Number as a floating-point value
    pub fn julian_day(&self) -> f64 {
        self.julian_days_since(&Time::J2000) + J2000
    }

    /// Signed number of days from `epoch` to `self`
    pub fn julian_days_since(&self, epoch: &Time) -> f64 {
        (self.epoch_ms as i128 - epoch.epoch_ms as i128) as f64 / DAY_MS as f64
    }

    pub fn julian_centuries_since(&self, epoch: &Time) -> f64 {
        self.julian_days_since(epoch) / DAYS_PER_CENTURY
    }

    pub fn julian_millennia_since(&self, epoch: &Time) -> f64 {
        self.julian_days_since(epoch) / DAYS_PER_MILLENNIUM
    }

    /// Julian centuries since J2000
    pub fn julian_centuries(&self) -> f64 {
        self.julian_centuries_since(&Time::J2000)
    }

    /// Julian millennia since J2000, the time argument of the orbital series
    pub fn julian_millennia(&self) -> f64 {
        self.julian_millennia_since(&Time::J2000)
    }

    /// Days since J2000 on the terrestrial dynamical time scale
    pub fn terrestrial_dynamical_time(&self) -> f64 {
        self.julian_days_since(&Time::J2000) + TDT_OFFSET
    }

    fn midnight_ms(&self) -> i64 {
        self.epoch_ms.div_euclid(DAY_MS) * DAY_MS
    }

    /// Greenwich mean sidereal time in hours, `[0, 24)`
    ///
    /// Cubic polynomial in Julian centuries at 0h UT, plus the sidereal
    /// rotation since midnight.
    pub fn mean_sidereal_time(&self) -> f64 {
        let midnight = self.midnight_ms();
        let centuries = (midnight - J2000_EPOCH_MS) as f64 / DAY_MS as f64 / DAYS_PER_CENTURY;

        let days_base = GMST_COEFF_REVOLUTIONS
            .iter()
            .fold(0.0, |acc, c| acc * centuries + c);
        let day_fraction = (self.epoch_ms - midnight) as f64 * SIDEREAL_PER_SOLAR / DAY_MS as f64;

        wrap_positive(days_base + day_fraction, 1.0) * 24.0
    }

    /// Greenwich mean sidereal time as an hour angle
    pub fn mean_sidereal_angle(&self) -> Angle {
        Angle::from_hours(self.mean_sidereal_time())
    }

    /// Mean sidereal time at geographic `longitude` (east positive), `[0, 24h)`
    pub fn local_mean_sidereal_time(&self, longitude: Angle) -> Angle {
        Angle::from_hours(self.mean_sidereal_time() + longitude.to_hours()).normalized()
    }

    /// Mean solar time at geographic `longitude`, `[0, 24h)`
    pub fn mean_solar_time(&self, longitude: Angle) -> Angle {
        let hours = (self.epoch_ms - self.midnight_ms()) as f64 / HOUR_MS as f64;
        Angle::from_hours(hours + longitude.to_hours()).normalized()
    }

    /// Nearest time at which an earth meridian passes a celestial meridian
    ///
    /// `hour_angle` is the earth meridian relative to Greenwich and
    /// `right_ascension` the celestial meridian relative to the vernal
    /// equinox, both positive eastward. The sidereal offset is scaled to
    /// solar time before it is applied. Fails with
    /// [`EphemerisError::InvalidArgument`] for non-finite angles.
    pub fn adjust_to_time_of_passage(
        &self,
        hour_angle: Angle,
        right_ascension: Angle,
        direction: TimeDirection,
    ) -> Result<Time> {
        if !hour_angle.is_finite() || !right_ascension.is_finite() {
            return Err(EphemerisError::InvalidArgument(format!(
                "passage angles must be finite (hour angle {}, right ascension {})",
                hour_angle, right_ascension
            )));
        }
        let mut sidereal_hours =
            (right_ascension.to_hours() - hour_angle.to_hours() - self.mean_sidereal_time()) % 24.0;
        match direction {
            TimeDirection::Past if sidereal_hours > 0.0 => sidereal_hours -= 24.0,
            TimeDirection::Future if sidereal_hours < 0.0 => sidereal_hours += 24.0,
            _ => {}
        }
        let solar_ms = (sidereal_hours * HOUR_MS as f64 * SOLAR_PER_SIDEREAL) as i64;
        Ok(Time {
            epoch_ms: self.epoch_ms.saturating_add(solar_ms),
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cal = Timescale::default().to_calendar(self);
        write!(
            f,
            "{:04}.{:02}.{:02} {:02}:{:02}:{:02}",
            cal.year,
            cal.month,
            cal.day,
            cal.hour,
            cal.minute,
            cal.second.floor() as u32
        )
    }
}

impl std::str::FromStr for Time {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self> {
        Time::parse(s)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Time {
            epoch_ms: dt.timestamp_millis(),
        }
    }
}

impl Add<f64> for Time {
    type Output = Time;

    /// Add a number of days, rounded to the millisecond
    ///
    /// Saturates at the ends of the `i64` range; NaN adds nothing. Use
    /// [`Time::checked_add_days`] to detect either case.
    fn add(self, days: f64) -> Self::Output {
        Time {
            epoch_ms: self
                .epoch_ms
                .saturating_add((days * DAY_MS as f64).round() as i64),
        }
    }
}

impl Sub<f64> for Time {
    type Output = Time;

    fn sub(self, days: f64) -> Self::Output {
        self + (-days)
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    fn add(self, duration: Duration) -> Self::Output {
        Time {
            epoch_ms: self.epoch_ms.saturating_add(duration.num_milliseconds()),
        }
    }
}

impl Sub<Time> for Time {
    type Output = f64;

    /// Difference in days
    fn sub(self, other: Time) -> Self::Output {
        self.julian_days_since(&other)
    }
}
