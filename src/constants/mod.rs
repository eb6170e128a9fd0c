//! Constants module for element-set switching calculations

// Time scales
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Microseconds in a second
pub const MICROS_PER_SECOND: i64 = 1_000_000;
/// Microseconds in a day
pub const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;
/// Microseconds in a day, as a float for fraction arithmetic
pub const DAY_US: f64 = 86_400_000_000.0;

// Julian day anchoring
/// Integer Julian day number of the domain reference 1957-01-01T00:00:00
///
/// Julian dates start at noon, so the reference midnight sits at
/// `REFERENCE_DAY_NUMBER + JD_MIDNIGHT_OFFSET` = 2435839.5.
pub const REFERENCE_DAY_NUMBER: i64 = 2_435_839;
/// Offset between an integer day number and the Julian date of its midnight
pub const JD_MIDNIGHT_OFFSET: f64 = 0.5;
/// Julian date of 1957-01-01T00:00:00
pub const JDAY_1957: f64 = 2_435_839.5;
/// Julian date of 1970-01-01T00:00:00
pub const JDAY_1970: f64 = 2_440_587.5;
/// Julian date of 2057-01-01T00:00:00
pub const JDAY_2057: f64 = 2_472_364.5;

// Supported calendar range
/// Days from 1957-01-01 to 2057-01-01, the width of the supported range
pub const SUPPORTED_SPAN_DAYS: i64 = 36_525;
/// Microseconds from the Unix epoch back to 1957-01-01T00:00:00
pub const REFERENCE_UNIX_MICROS: i64 = -4_748 * MICROS_PER_DAY;

// Switching
/// Default sampling step of the closest-approach search, in seconds
pub const DEFAULT_TCA_STEP_S: f64 = 60.0;
