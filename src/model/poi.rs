//! Points of interest and their weekly opening hours.

use crate::time::{ClockTime, Weekday};

/// Index of a POI in the problem's POI list.
///
/// Visits refer to POIs by id; the POI data itself is shared read-only by
/// every solution of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoiId(pub usize);

/// Geographic position in decimal degrees.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Opening window of a POI on one day.
///
/// A closing time numerically before the opening time is moved past
/// midnight on construction, so `close >= open` always holds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    open: ClockTime,
    close: ClockTime,
}

impl OpeningHours {
    /// A day on which the POI does not open (00:00–00:00).
    pub const CLOSED: OpeningHours = OpeningHours {
        open: ClockTime::MIDNIGHT,
        close: ClockTime::MIDNIGHT,
    };

    pub fn new(open: ClockTime, close: ClockTime) -> Self {
        Self {
            open,
            close: close.spanning_from(open),
        }
    }

    pub fn open(&self) -> ClockTime {
        self.open
    }

    pub fn close(&self) -> ClockTime {
        self.close
    }

    /// Whether a stay from `start` to `end` lies inside this window.
    ///
    /// An `end` before `start` is read as ending after midnight.
    pub fn contains(&self, start: ClockTime, end: ClockTime) -> bool {
        let close = self.close.spanning_from(self.open);
        let end = end.spanning_from(start);
        start >= self.open && end <= close
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self::CLOSED
    }
}

/// Opening hours for each of the seven day codes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekSchedule([OpeningHours; 7]);

impl WeekSchedule {
    /// The same window on every day of the week.
    pub fn every_day(hours: OpeningHours) -> Self {
        Self([hours; 7])
    }

    pub fn get(&self, day: Weekday) -> OpeningHours {
        self.0[day.index()]
    }

    pub fn set(&mut self, day: Weekday, hours: OpeningHours) {
        self.0[day.index()] = hours;
    }

    /// Iterates `(day, hours)` from Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, OpeningHours)> + '_ {
        Weekday::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// A point of interest.
///
/// # Examples
///
/// ```
/// use u_itinerary::model::{OpeningHours, Poi};
/// use u_itinerary::time::{ClockTime, Weekday};
///
/// let nine = ClockTime::from_hm(9, 0).unwrap();
/// let six = ClockTime::from_hm(18, 0).unwrap();
/// let museum = Poi::new("Museum", 50.06, 19.94, 0.8)
///     .open_every_day(OpeningHours::new(nine, six));
/// assert_eq!(museum.hours(Weekday::Tue).close(), six);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub name: String,
    pub coord: Coord,
    pub schedule: WeekSchedule,
    /// Satisfaction weight in `[0.0, 1.0]`.
    pub satisfaction: f64,
}

impl Poi {
    /// Creates a POI that is closed every day until hours are added.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, satisfaction: f64) -> Self {
        Self {
            name: name.into(),
            coord: Coord { lat, lon },
            schedule: WeekSchedule::default(),
            satisfaction,
        }
    }

    /// Sets the opening window for one day code.
    pub fn with_hours(mut self, day: Weekday, hours: OpeningHours) -> Self {
        self.schedule.set(day, hours);
        self
    }

    /// Sets the same opening window for all seven day codes.
    pub fn open_every_day(mut self, hours: OpeningHours) -> Self {
        self.schedule = WeekSchedule::every_day(hours);
        self
    }

    pub fn hours(&self, day: Weekday) -> OpeningHours {
        self.schedule.get(day)
    }

    pub fn open_time(&self, day: Weekday) -> ClockTime {
        self.hours(day).open()
    }

    pub fn close_time(&self, day: Weekday) -> ClockTime {
        self.hours(day).close()
    }
}
