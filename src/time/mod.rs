//! Time module for element-set switching
//!
//! This module converts UTC-naive calendar timestamps to and from the two-part
//! Julian representation consumed by SGP4-style propagators. All arithmetic is
//! carried on integer microsecond counts anchored at 1957-01-01T00:00:00, so a
//! round trip through [`to_julian`] and [`from_julian`] is exact at microsecond
//! resolution anywhere in the supported range (1957-01-01 to 2056-12-31).

use crate::constants::{
    DAY_S, DAY_US, JD_MIDNIGHT_OFFSET, MICROS_PER_DAY, MICROS_PER_SECOND, REFERENCE_DAY_NUMBER,
    REFERENCE_UNIX_MICROS, SUPPORTED_SPAN_DAYS,
};
use crate::errors::{Result, SwitchError};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use std::fmt;

/// A two-part Julian time value
///
/// `day` is an integer day number and `fraction` the elapsed part of that day,
/// always in `[0, 1)`. Days begin at midnight: the Julian date of the start of
/// `day` is `day + 0.5`, which is what [`JulianMoment::jd`] hands to a
/// propagator alongside [`JulianMoment::fr`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianMoment {
    /// Integer day number (Julian date of the day's midnight minus one half)
    pub day: i64,
    /// Fraction of the day elapsed since midnight, in `[0, 1)`
    pub fraction: f64,
}

impl JulianMoment {
    /// Create a moment from a day number and a fraction, carrying whole days
    /// out of the fraction so it lands in `[0, 1)`
    pub fn new(day: i64, fraction: f64) -> Self {
        let carry = fraction.floor();
        let mut day = day + carry as i64;
        let mut fraction = fraction - carry;

        // A tiny negative fraction can round up to exactly 1.0 after the carry
        if fraction >= 1.0 {
            day += 1;
            fraction = 0.0;
        }

        Self { day, fraction }
    }

    /// Create a moment from a propagator-style `(jd, fr)` split
    ///
    /// `jd` is normally a midnight Julian date such as `2452163.5`, but any
    /// split whose sum is the intended Julian date is accepted.
    pub fn from_parts(jd: f64, fr: f64) -> Self {
        let midnight = jd - JD_MIDNIGHT_OFFSET;
        let whole = midnight.floor();
        Self::new(whole as i64, (midnight - whole) + fr)
    }

    /// Julian date of this moment's midnight, the whole part passed to a propagator
    pub fn jd(&self) -> f64 {
        self.day as f64 + JD_MIDNIGHT_OFFSET
    }

    /// Fraction of the day, the fractional part passed to a propagator
    pub fn fr(&self) -> f64 {
        self.fraction
    }

    /// Single-float Julian date (loses sub-millisecond precision)
    pub fn julian_date(&self) -> f64 {
        self.jd() + self.fraction
    }
}

impl fmt::Display for JulianMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.1} + {:.12}", self.jd(), self.fraction)
    }
}

impl From<NaiveDateTime> for JulianMoment {
    fn from(time: NaiveDateTime) -> Self {
        to_julian(time)
    }
}

/// Microseconds elapsed since 1957-01-01T00:00:00 (negative before it)
pub fn to_micros(time: NaiveDateTime) -> i64 {
    time.and_utc().timestamp_micros() - REFERENCE_UNIX_MICROS
}

/// Timestamp lying `micros` microseconds after 1957-01-01T00:00:00
///
/// Saturates at chrono's representable limits far outside the supported range.
pub fn from_micros(micros: i64) -> NaiveDateTime {
    let unix = micros.saturating_add(REFERENCE_UNIX_MICROS);
    match DateTime::<Utc>::from_timestamp_micros(unix) {
        Some(dt) => dt.naive_utc(),
        None if unix < 0 => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

/// Earliest supported timestamp, 1957-01-01T00:00:00
pub fn supported_min() -> NaiveDateTime {
    from_micros(0)
}

/// Latest supported timestamp, 2056-12-31T23:59:59.999999
pub fn supported_max() -> NaiveDateTime {
    from_micros(SUPPORTED_SPAN_DAYS * MICROS_PER_DAY - 1)
}

/// Check whether a timestamp lies in the supported calendar range
pub fn is_supported(time: NaiveDateTime) -> bool {
    (0..SUPPORTED_SPAN_DAYS * MICROS_PER_DAY).contains(&to_micros(time))
}

/// Convert a timestamp to its two-part Julian representation
pub fn to_julian(time: NaiveDateTime) -> JulianMoment {
    let micros = to_micros(time);

    let mut whole_days = micros / MICROS_PER_DAY;
    let mut residual = micros % MICROS_PER_DAY;

    // Borrow a day so the fraction stays non-negative before the reference
    if residual < 0 {
        whole_days -= 1;
        residual += MICROS_PER_DAY;
    }

    JulianMoment {
        day: whole_days + REFERENCE_DAY_NUMBER,
        fraction: residual as f64 / DAY_US,
    }
}

/// Convert a two-part Julian value back to a timestamp at microsecond resolution
pub fn from_julian(moment: JulianMoment) -> NaiveDateTime {
    // Whole days stay in integer arithmetic; only the fraction is rounded
    let days = moment.day - REFERENCE_DAY_NUMBER;
    let residual = (moment.fraction * DAY_US).round() as i64;
    from_micros(days * MICROS_PER_DAY + residual)
}

/// Convert a batch of timestamps into parallel `(jd, fr)` arrays
pub fn to_julian_arrays(times: &[NaiveDateTime]) -> (Vec<f64>, Vec<f64>) {
    times
        .iter()
        .map(|&time| {
            let moment = to_julian(time);
            (moment.jd(), moment.fr())
        })
        .unzip()
}

/// Convert a step in seconds into a positive microsecond count
pub(crate) fn step_to_micros(step_seconds: f64) -> Result<i64> {
    let step = (step_seconds * MICROS_PER_SECOND as f64).round();
    if !step.is_finite() || step < 1.0 {
        return Err(SwitchError::InvalidStep(step_seconds));
    }
    Ok(step as i64)
}

/// Evenly spaced timestamps over the half-open interval `[start, stop)`
///
/// The step is quantised to whole microseconds.
pub fn trange(
    start: NaiveDateTime,
    stop: NaiveDateTime,
    step_seconds: f64,
) -> Result<Vec<NaiveDateTime>> {
    let step = step_to_micros(step_seconds)?;
    let t0 = to_micros(start);
    let t1 = to_micros(stop);

    let mut times = Vec::with_capacity(((t1 - t0).max(0) / step) as usize + 1);
    let mut t = t0;
    while t < t1 {
        times.push(from_micros(t));
        t += step;
    }
    Ok(times)
}

/// Julian `(jd, fr)` arrays sampled from `start` through `stop`
///
/// Samples are taken at `start + k * step` for every `k` whose sample is
/// earlier than `stop + step`, so the last sample lies within one step of
/// `stop` and a zero-length interval still yields one sample.
pub fn jday_range(
    start: NaiveDateTime,
    stop: NaiveDateTime,
    step_seconds: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let step = step_to_micros(step_seconds)?;
    let t0 = to_micros(start);
    let end = to_micros(stop) + step;

    let mut jd = Vec::new();
    let mut fr = Vec::new();
    let mut t = t0;
    while t < end {
        let moment = to_julian(from_micros(t));
        jd.push(moment.jd());
        fr.push(moment.fr());
        t += step;
    }
    Ok((jd, fr))
}

/// Two-digit year and fractional day of year (1-based), as written in TLE epochs
pub fn to_year_day(time: NaiveDateTime) -> (u32, f64) {
    let year = time.year().rem_euclid(100) as u32;
    let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 * 1e-9;
    let days = time.ordinal() as f64 + seconds / DAY_S;
    (year, days)
}
