//! Clock times and day-of-week codes.
//!
//! [`ClockTime`] is a signed minute offset from midnight of the planning
//! day. Values at or beyond [`MINUTES_PER_DAY`] represent times after
//! midnight, which is how windows spanning past midnight are expressed.
//! Ordering is plain integer ordering, so the earliest/latest of several
//! times is just [`Ord::min`] / [`Ord::max`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// A time of day, in minutes from midnight.
///
/// # Examples
///
/// ```
/// use u_itinerary::time::ClockTime;
///
/// let open: ClockTime = "09:30".parse().unwrap();
/// assert_eq!(open.minutes(), 570);
/// assert_eq!(open.add_minutes(45).to_string(), "10:15");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(i32);

impl ClockTime {
    /// Midnight at the start of the planning day.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Creates a clock time from a raw minute offset.
    pub const fn from_minutes(minutes: i32) -> Self {
        ClockTime(minutes)
    }

    /// Creates a clock time from hour and minute.
    ///
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(ClockTime((hour * 60 + minute) as i32))
        } else {
            None
        }
    }

    /// Raw minute offset from midnight.
    pub const fn minutes(self) -> i32 {
        self.0
    }

    /// Returns this time shifted later by `minutes` (earlier if negative).
    pub const fn add_minutes(self, minutes: i32) -> Self {
        ClockTime(self.0 + minutes)
    }

    /// Returns this time shifted earlier by `minutes`.
    pub const fn sub_minutes(self, minutes: i32) -> Self {
        ClockTime(self.0 - minutes)
    }

    /// Signed minutes from `self` to `later`.
    pub const fn minutes_until(self, later: ClockTime) -> i32 {
        later.0 - self.0
    }

    /// The same clock reading on the following day.
    pub const fn next_day(self) -> Self {
        ClockTime(self.0 + MINUTES_PER_DAY)
    }

    /// Interprets `self` as an end time relative to `begin`.
    ///
    /// An end that is numerically before `begin` spans past midnight and is
    /// moved to the next day; otherwise it is returned unchanged.
    pub fn spanning_from(self, begin: ClockTime) -> Self {
        if self < begin {
            self.next_day()
        } else {
            self
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrapped = self.0.rem_euclid(MINUTES_PER_DAY);
        write!(f, "{:02}:{:02}", wrapped / 60, wrapped % 60)
    }
}

/// Error returned when an `HH:MM` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid clock time {input:?}: expected HH:MM")]
pub struct ParseClockError {
    input: String,
}

impl FromStr for ClockTime {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockError {
            input: s.to_string(),
        };
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hour: u32 = h.parse().map_err(|_| err())?;
        let minute: u32 = m.parse().map_err(|_| err())?;
        ClockTime::from_hm(hour, minute).ok_or_else(err)
    }
}

/// Day-of-week code used to look up opening hours.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Position in [`Weekday::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Three-letter lowercase code (`"mon"` .. `"sun"`).
    pub const fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned for an unknown day code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day code {0:?}: expected one of mon, tue, wed, thu, fri, sat, sun")]
pub struct ParseWeekdayError(String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}
