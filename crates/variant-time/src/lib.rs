//! # variant-time
//!
//! Microsecond-resolution time values: [`Microseconds`] (a signed duration)
//! and [`TimePoint`] (elapsed microseconds since the Unix epoch), with an
//! ISO-8601 textual round trip at full microsecond precision.
use std::{fmt, iter::Sum, ops, str::FromStr};

use chrono::{DateTime, Utc};

/// A signed count of microseconds.
///
/// Supports addition and total ordering. Subtraction is intentionally not
/// provided on the duration itself; the only difference operation lives on
/// [`TimePoint`]. Arithmetic saturates at the representable bounds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Microseconds(i64);

impl Microseconds {
    /// The largest representable duration, used as an "unbounded" sentinel
    /// in comparisons.
    pub const MAX: Microseconds = Microseconds(i64::MAX);

    #[must_use]
    pub const fn new(count: i64) -> Microseconds {
        Microseconds(count)
    }

    /// The raw microsecond count.
    #[must_use]
    pub const fn count(self) -> i64 {
        self.0
    }
}

/// A duration of `s` whole seconds.
#[must_use]
pub const fn seconds(s: i64) -> Microseconds {
    Microseconds(s.saturating_mul(1_000_000))
}

/// A duration of `ms` whole milliseconds.
#[must_use]
pub const fn milliseconds(ms: i64) -> Microseconds {
    Microseconds(ms.saturating_mul(1_000))
}

impl ops::Add for Microseconds {
    type Output = Microseconds;

    fn add(self, rhs: Microseconds) -> Microseconds {
        Microseconds(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Microseconds {
    fn add_assign(&mut self, rhs: Microseconds) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Microseconds {
    fn sum<I: Iterator<Item = Microseconds>>(iter: I) -> Microseconds {
        iter.fold(Microseconds::new(0), ops::Add::add)
    }
}

impl fmt::Display for Microseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// An instant in time, stored as [`Microseconds`] elapsed since the Unix
/// epoch (1970-01-01T00:00:00Z).
///
/// Ordering, `+ Microseconds`, and `TimePoint - TimePoint -> Microseconds`
/// follow the elapsed count. [`TimePoint::MAX`] is a comparison sentinel
/// outside the formattable calendar range.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(Microseconds);

impl TimePoint {
    /// The epoch itself; also the smallest interesting instant.
    pub const EPOCH: TimePoint = TimePoint(Microseconds(0));

    /// The largest representable instant, used as an "unbounded" sentinel.
    pub const MAX: TimePoint = TimePoint(Microseconds::MAX);

    #[must_use]
    pub const fn new(elapsed: Microseconds) -> TimePoint {
        TimePoint(elapsed)
    }

    /// The current wall-clock reading (UTC).
    #[must_use]
    pub fn now() -> TimePoint {
        TimePoint(Microseconds(Utc::now().timestamp_micros()))
    }

    /// Microseconds elapsed since the Unix epoch.
    #[must_use]
    pub const fn elapsed(self) -> Microseconds {
        self.0
    }
}

impl ops::Add<Microseconds> for TimePoint {
    type Output = TimePoint;

    fn add(self, rhs: Microseconds) -> TimePoint {
        TimePoint(self.0 + rhs)
    }
}

impl ops::AddAssign<Microseconds> for TimePoint {
    fn add_assign(&mut self, rhs: Microseconds) {
        self.0 += rhs;
    }
}

impl ops::Sub for TimePoint {
    type Output = Microseconds;

    fn sub(self, rhs: TimePoint) -> Microseconds {
        Microseconds(self.0 .0.saturating_sub(rhs.0 .0))
    }
}

/// Renders the instant as `YYYY-MM-DDTHH:MM:SS.ffffffZ` (UTC, fixed six
/// fractional digits).
///
/// Instants outside chrono's calendar range (notably [`TimePoint::MAX`])
/// cannot be rendered and produce a formatter error.
impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = DateTime::<Utc>::from_timestamp_micros(self.0 .0).ok_or(fmt::Error)?;
        write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.6fZ"))
    }
}

impl FromStr for TimePoint {
    type Err = ParseTimeError;

    /// Parses any RFC 3339 timestamp (numeric offset or `Z`, zero to nine
    /// fractional digits), normalizing to UTC and truncating anything finer
    /// than a microsecond.
    fn from_str(s: &str) -> Result<TimePoint, ParseTimeError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|_| ParseTimeError {
            input: s.to_owned(),
        })?;
        Ok(TimePoint(Microseconds(dt.timestamp_micros())))
    }
}

/// The input was not a valid ISO-8601 / RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeError {
    input: String,
}

impl ParseTimeError {
    /// The text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ISO-8601 timestamp: {:?}", self.input)
    }
}

impl std::error::Error for ParseTimeError {}
