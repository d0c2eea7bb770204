// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time and timebase conversion.
//!
//! [`HostTime`] is a point on the host's monotonic clock, in whatever tick
//! unit the host reports (microseconds from `performance.now()` on the web).
//! [`Timebase`] converts those ticks to nanoseconds, and [`Duration`] is a
//! span in the same ticks.
//!
//! Overlay timings are authored in milliseconds and converted once, at
//! [`Overlay`](crate::overlay::Overlay) construction, with
//! [`Duration::from_millis`].

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as host-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Adds a duration, saturating at the end of the clock.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        self.saturating_duration_since(rhs)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
///
/// The correct instance for a host is provided by its backend crate (e.g.
/// `overplay_backend_web::timebase()`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// A timebase where ticks are already nanoseconds (1:1).
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// A timebase where one tick is one millisecond.
    pub const MILLIS: Self = Self {
        numer: 1_000_000,
        denom: 1,
    };

    /// Creates a new timebase with the given numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `numer` or `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(numer != 0, "timebase numerator must not be zero");
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Converts a tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        (ticks as u128 * self.numer as u128 / self.denom as u128) as u64
    }

    /// Converts nanoseconds to a tick count.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        (nanos as u128 * self.denom as u128 / self.numer as u128) as u64
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

/// A span of time in host ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a duration from milliseconds in the given timebase.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u32, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis as u64 * 1_000_000))
    }

    /// Converts this duration to whole milliseconds in the given timebase.
    #[inline]
    #[must_use]
    pub const fn as_millis(self, timebase: Timebase) -> u64 {
        timebase.ticks_to_nanos(self.0) / 1_000_000
    }

    /// Returns this duration, or one tick if it is zero.
    ///
    /// Periodic slots re-arm at `now + interval`; a zero interval would
    /// make them due forever.
    #[inline]
    #[must_use]
    pub const fn at_least_one_tick(self) -> Self {
        if self.0 == 0 { Self(1) } else { self }
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_in_microsecond_timebase() {
        let web = Timebase::new(1000, 1);
        let d = Duration::from_millis(150, web);
        assert_eq!(d.ticks(), 150_000, "150ms is 150_000µs");
        assert_eq!(d.as_millis(web), 150, "converts back");
    }

    #[test]
    fn millis_timebase_is_identity_on_millis() {
        let d = Duration::from_millis(1000, Timebase::MILLIS);
        assert_eq!(d, Duration(1000), "one tick per millisecond");
    }

    #[test]
    fn host_time_arithmetic_saturates() {
        let t = HostTime(1000);
        assert_eq!(t + Duration(200), HostTime(1200), "add");
        assert_eq!(t - HostTime(400), Duration(600), "elapsed");
        assert_eq!(t - HostTime(1500), Duration::ZERO, "earlier minus later");
        assert_eq!(HostTime(u64::MAX) + Duration(1), HostTime(u64::MAX), "end of clock");
    }

    #[test]
    fn zero_interval_is_bumped() {
        assert_eq!(Duration::ZERO.at_least_one_tick(), Duration(1), "zero");
        assert_eq!(Duration(5).at_least_one_tick(), Duration(5), "nonzero");
    }
}
