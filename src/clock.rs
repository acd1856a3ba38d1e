//! Sources of the current time.
//!
//! Dates are only read from a clock when no explicit time is given, either to
//! render "now" or to turn a `Max-Age` into an `Expires` date.

use time::{at_utc, now_utc, Timespec, Tm};

/// Something that produces the current UTC time.
pub trait Clock {

    /// Get the current UTC time.
    fn now(&self) -> Tm;

    /// Get the current time in whole seconds since the Unix epoch.
    fn now_secs(&self) -> i64 {
        self.now().to_timespec().sec
    }
}

/// A function that produces the current time in UTC.
pub type ClockFn = fn() -> Tm;

impl Clock for ClockFn {
    fn now(&self) -> Tm {
        self()
    }
}

impl<'c, C: Clock + ?Sized> Clock for &'c C {
    fn now(&self) -> Tm {
        (**self).now()
    }
}

/// The system clock.
pub fn system() -> ClockFn {
    now_utc
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timespec);

impl FixedClock {
    /// Freeze the clock at a number of seconds since the Unix epoch.
    pub fn from_secs(secs: i64) -> FixedClock {
        FixedClock(Timespec::new(secs, 0))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Tm {
        at_utc(self.0)
    }

    fn now_secs(&self) -> i64 {
        self.0.sec
    }
}
