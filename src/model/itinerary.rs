//! The chromosome: visits grouped into days.

use std::collections::HashSet;

use super::poi::PoiId;
use crate::time::{ClockTime, Weekday};

/// One scheduled stay at a POI.
///
/// The duration always equals `end - start`; every setter keeps it in sync.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    poi: PoiId,
    start: ClockTime,
    end: ClockTime,
    duration: i32,
}

impl Visit {
    pub fn new(poi: PoiId, start: ClockTime, end: ClockTime) -> Self {
        Self {
            poi,
            start,
            end,
            duration: start.minutes_until(end),
        }
    }

    pub fn poi(&self) -> PoiId {
        self.poi
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Length of the stay in minutes.
    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Moves this visit to another POI and time slot.
    pub fn replace(&mut self, poi: PoiId, start: ClockTime, end: ClockTime) {
        *self = Visit::new(poi, start, end);
    }

    pub fn set_start(&mut self, start: ClockTime) {
        *self = Visit::new(self.poi, start, self.end);
    }

    pub fn set_end(&mut self, end: ClockTime) {
        *self = Visit::new(self.poi, self.start, end);
    }
}

/// One day of the itinerary.
///
/// Visits are kept in the chronological order they were built in and are
/// never re-sorted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub visits: Vec<Visit>,
    /// Position of this day in the trip, starting at 0.
    pub index: usize,
    /// Day code used to look up opening hours.
    pub weekday: Weekday,
}

impl Day {
    pub fn new(index: usize, weekday: Weekday) -> Self {
        Self {
            visits: Vec::new(),
            index,
            weekday,
        }
    }

    pub fn with_visits(mut self, visits: Vec<Visit>) -> Self {
        self.visits = visits;
        self
    }
}

/// A complete multi-day schedule.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub days: Vec<Day>,
    /// Earliest allowed visit start on every day.
    pub day_begin: ClockTime,
    /// Latest allowed visit end on every day.
    pub day_end: ClockTime,
}

impl Itinerary {
    pub fn new(day_begin: ClockTime, day_end: ClockTime) -> Self {
        Self {
            days: Vec::new(),
            day_begin,
            day_end,
        }
    }

    /// Iterates all visits, day by day.
    pub fn visits(&self) -> impl Iterator<Item = &Visit> + '_ {
        self.days.iter().flat_map(|d| d.visits.iter())
    }

    pub fn visit_count(&self) -> usize {
        self.days.iter().map(|d| d.visits.len()).sum()
    }

    /// Set of POIs visited anywhere in the itinerary.
    pub fn used_pois(&self) -> HashSet<PoiId> {
        self.visits().map(Visit::poi).collect()
    }
}
