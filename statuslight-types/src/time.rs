//! Monotonic timestamps.
//!
//! Timestamps count microseconds from an arbitrary epoch (usually the
//! moment the clock was created). Only differences between two timestamps
//! from the same clock are meaningful.

use core::ops::Add;
use core::time::Duration;

/// A point on a monotonic clock, in microseconds since the clock's epoch.
///
/// Microseconds keep sub-tick precision while fitting in a u64 for
/// roughly 584,000 years of uptime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The clock's epoch.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create from microseconds.
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create from milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1000)
    }

    /// Create from seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1_000_000)
    }

    /// Create from fractional seconds, rounded to the nearest microsecond.
    ///
    /// Negative and non-finite inputs clamp to the epoch.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }
        Self((secs * 1_000_000.0 + 0.5) as u64)
    }

    /// Get the value in microseconds.
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`.
    ///
    /// Saturates to zero when `earlier` is later than `self`.
    pub const fn saturating_duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl From<Duration> for Timestamp {
    fn from(d: Duration) -> Self {
        Self(d.as_micros() as u64)
    }
}
