//! Dates in HTTP headers.
//!
//! Dates are rendered in the fixed form used by `Expires` and other headers:
//!
//! ```text
//! http-date = wkday "," SP day delimiter month delimiter year SP time SP "GMT"
//! wkday     = "Mon" / "Tue" / "Wed" / "Thu" / "Fri" / "Sat" / "Sun"
//! month     = "Jan" / "Feb" / "Mar" / "Apr" / "May" / "Jun"
//!           / "Jul" / "Aug" / "Sep" / "Oct" / "Nov" / "Dec"
//! day       = 2DIGIT
//! year      = 1*DIGIT
//! time      = 2DIGIT ":" 2DIGIT ":" 2DIGIT
//! ```
//!
//! The delimiter defaults to `-`. [RFC1123][rfc1123] dates use a single space,
//! see [`RFC1123_DELIMITER`](constant.RFC1123_DELIMITER.html).
//!
//! [rfc1123]: https://tools.ietf.org/html/rfc1123#page-55

use std::time::{Duration as StdDuration, SystemTime, UNIX_EPOCH};

use clock::{self, Clock, ClockFn};
use time::{at_utc, Timespec, Tm};

/// Abbreviated day names, starting from Monday.
pub static DAYS: [&'static str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Abbreviated month names, starting from January.
pub static MONTHS: [&'static str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Delimiter placed between the day, month and year by default.
pub const DEFAULT_DELIMITER: &'static str = "-";

/// Delimiter placed between the day, month and year in RFC1123 dates.
pub const RFC1123_DELIMITER: &'static str = " ";

/// Latest second rendered. Later times are clamped to it so the calendar year
/// stays within what `gmtime` can represent.
pub const MAX_SECS: i64 = 10_000_000_000_000_000;

/// Earliest second rendered. Earlier times are clamped to it.
pub const MIN_SECS: i64 = -MAX_SECS;

/// Clamp seconds since the epoch to the range that can be rendered.
fn clamp_secs(secs: i64) -> i64 {
    secs.max(MIN_SECS).min(MAX_SECS)
}

/// Whole seconds of a duration, saturating at `i64::MAX`.
pub(crate) fn saturating_secs(duration: StdDuration) -> i64 {
    duration.as_secs().min(i64::max_value() as u64) as i64
}

/// A point in time to be rendered as a date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HttpTime {
    /// The current time as read from a clock.
    Now,
    /// Whole seconds since the Unix epoch.
    Seconds(i64),
    /// Seconds since the Unix epoch, including any fraction of a second.
    Epoch(f64),
    /// A calendar time in any UTC offset.
    At(Tm),
}

impl Default for HttpTime {
    fn default() -> HttpTime {
        HttpTime::Now
    }
}

impl From<i64> for HttpTime {
    fn from(secs: i64) -> HttpTime {
        HttpTime::Seconds(secs)
    }
}

impl From<i32> for HttpTime {
    fn from(secs: i32) -> HttpTime {
        HttpTime::Seconds(secs.into())
    }
}

impl From<u32> for HttpTime {
    fn from(secs: u32) -> HttpTime {
        HttpTime::Seconds(secs.into())
    }
}

impl From<f64> for HttpTime {
    fn from(secs: f64) -> HttpTime {
        HttpTime::Epoch(secs)
    }
}

impl From<Tm> for HttpTime {
    fn from(time: Tm) -> HttpTime {
        HttpTime::At(time)
    }
}

impl From<Timespec> for HttpTime {
    fn from(time: Timespec) -> HttpTime {
        HttpTime::Seconds(time.sec)
    }
}

impl From<SystemTime> for HttpTime {
    fn from(time: SystemTime) -> HttpTime {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => HttpTime::Seconds(saturating_secs(since)),
            Err(error) => {
                // Round down towards the earlier second.
                let before = error.duration();
                let partial = if before.subsec_nanos() > 0 { 1 } else { 0 };
                HttpTime::Seconds(-saturating_secs(before) - partial)
            }
        }
    }
}

impl HttpTime {
    /// Resolve the time to a UTC calendar time.
    fn to_utc<C: Clock>(self, clock: &C) -> Tm {
        match self {
            HttpTime::Now => clock.now().to_utc(),
            HttpTime::Seconds(secs) => at_utc(Timespec::new(clamp_secs(secs), 0)),
            HttpTime::Epoch(secs) => at_utc(Timespec::new(clamp_secs(secs.floor() as i64), 0)),
            HttpTime::At(time) => at_utc(Timespec::new(clamp_secs(time.to_timespec().sec), 0)),
        }
    }
}

/// The calendar fields of a UTC time that appear in a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    /// The full year.
    pub year: i32,
    /// Month of the year, `1` to `12`.
    pub month: u32,
    /// Day of the month, `1` to `31`.
    pub day: u32,
    /// Day of the week, `0` for Monday to `6` for Sunday.
    pub weekday: u32,
    /// Hour of the day, `0` to `23`.
    pub hour: u32,
    /// Minute of the hour, `0` to `59`.
    pub minute: u32,
    /// Second of the minute, `0` to `60`.
    pub second: u32,
}

impl<'t> From<&'t Tm> for Breakdown {
    fn from(time: &'t Tm) -> Breakdown {
        Breakdown {
            year: time.tm_year + 1900,
            month: (time.tm_mon + 1) as u32,
            day: time.tm_mday as u32,
            // `Tm` counts weekdays from Sunday.
            weekday: ((time.tm_wday + 6) % 7) as u32,
            hour: time.tm_hour as u32,
            minute: time.tm_min as u32,
            second: time.tm_sec as u32,
        }
    }
}

impl Breakdown {
    /// Abbreviated name of the day of the week.
    ///
    /// # Panics
    ///
    /// If `weekday` is greater than `6`.
    pub fn weekday_name(&self) -> &'static str {
        DAYS[self.weekday as usize]
    }

    /// Abbreviated name of the month.
    ///
    /// # Panics
    ///
    /// If `month` is not in `1..=12`.
    pub fn month_name(&self) -> &'static str {
        MONTHS[(self.month as usize).wrapping_sub(1)]
    }

    /// Render the date with a given delimiter between the day, month and year.
    pub fn format(&self, delimiter: &str) -> String {
        format!(
            "{}, {:02}{}{}{}{} {:02}:{:02}:{:02} GMT",
            self.weekday_name(),
            self.day,
            delimiter,
            self.month_name(),
            delimiter,
            self.year,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// Formats times as HTTP dates, reading "now" from a clock.
#[derive(Debug, Clone)]
pub struct DateFormatter<C: Clock = ClockFn> {
    clock: C,
}

impl Default for DateFormatter<ClockFn> {
    fn default() -> DateFormatter<ClockFn> {
        DateFormatter {
            clock: clock::system(),
        }
    }
}

impl DateFormatter<ClockFn> {
    /// Create a formatter that reads the system clock.
    pub fn new() -> DateFormatter<ClockFn> {
        Default::default()
    }
}

impl<C: Clock> DateFormatter<C> {
    /// Create a formatter with a specific time source.
    pub fn with_clock(clock: C) -> DateFormatter<C> {
        DateFormatter { clock: clock }
    }

    /// The time source of the formatter.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the current UTC time.
    pub fn now(&self) -> Tm {
        self.clock.now()
    }

    /// Break a time down into the calendar fields of its UTC equivalent.
    pub fn breakdown<T: Into<HttpTime>>(&self, time: T) -> Breakdown {
        Breakdown::from(&time.into().to_utc(&self.clock))
    }

    /// Format a time using the default delimiter.
    pub fn format<T: Into<HttpTime>>(&self, time: T) -> String {
        self.format_with(time, DEFAULT_DELIMITER)
    }

    /// Format a time using a given delimiter between the day, month and year.
    pub fn format_with<T: Into<HttpTime>>(&self, time: T, delimiter: &str) -> String {
        self.breakdown(time).format(delimiter)
    }
}

/// Format a time as an HTTP date, reading the system clock for `HttpTime::Now`.
///
/// ```
/// use cookie_header::format_http_date;
///
/// assert_eq!(format_http_date(0, " "), "Thu, 01 Jan 1970 00:00:00 GMT");
/// assert_eq!(format_http_date(0, "-"), "Thu, 01-Jan-1970 00:00:00 GMT");
/// ```
pub fn format_http_date<T: Into<HttpTime>>(time: T, delimiter: &str) -> String {
    DateFormatter::new().format_with(time, delimiter)
}
