//! Time representation for draft documents
//!
//! The host application measures every position and length in integer
//! microseconds, so that is the only unit used here.

use serde::{Deserialize, Serialize};

/// A time value in microseconds.
pub type Micros = i64;

/// Microseconds per second.
pub const MICROS_PER_SECOND: Micros = 1_000_000;

/// Convert a probe duration in seconds to microseconds.
#[inline]
pub fn seconds_to_micros(seconds: f64) -> Micros {
    (seconds * MICROS_PER_SECOND as f64).round() as Micros
}

/// Length on the timeline of `duration` worth of source media played at `speed`.
///
/// Speed is not validated: a zero or negative speed saturates or flips sign
/// instead of failing.
#[inline]
pub fn scale_by_speed(duration: Micros, speed: f64) -> Micros {
    (duration as f64 / speed).round() as Micros
}

/// A `{start, duration}` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timerange {
    pub duration: Micros,
    pub start: Micros,
}

impl Timerange {
    /// The empty range at time zero.
    pub const ZERO: Self = Self {
        duration: 0,
        start: 0,
    };

    /// Create a new timerange.
    #[inline]
    pub fn new(start: Micros, duration: Micros) -> Self {
        Self { duration, start }
    }

    /// Exclusive end of the range, saturating at the `Micros` bounds.
    #[inline]
    pub fn end(&self) -> Micros {
        self.start.saturating_add(self.duration)
    }

    /// Check if this range has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.duration == 0
    }
}
