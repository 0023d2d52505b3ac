//! External representation of trips and itineraries.
//!
//! Inputs and outputs exchanged with callers use `HH:MM` strings and
//! lowercase day codes (`"mon"` .. `"sun"`). With the `serde` feature enabled
//! POI records and trip requests use camelCase field names, while the
//! itinerary report keeps the service's PascalCase keys (`DayBeginHour`,
//! `StartVisit`, ...). A POI record:
//!
//! ```json
//! {
//!   "name": "Wawel Castle",
//!   "lat": 50.054, "lon": 19.935,
//!   "openHour":  { "mon": "09:00", "tue": "09:00" },
//!   "closeHour": { "mon": "17:00", "tue": "17:00" },
//!   "satisfaction": 0.9
//! }
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{Itinerary, OpeningHours, Poi};
use crate::planner::TripProblem;
use crate::time::{ClockTime, ParseClockError, ParseWeekdayError, Weekday};

// ============================================================================
// Errors
// ============================================================================

/// A [`PoiRecord`] that cannot be turned into a [`Poi`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoiRecordError {
    #[error("POI {name:?}: {source}")]
    Day {
        name: String,
        source: ParseWeekdayError,
    },
    #[error("POI {name:?} on {day}: {source}")]
    Time {
        name: String,
        day: Weekday,
        source: ParseClockError,
    },
    #[error("POI {name:?} opens on {day} but has no closing time")]
    MissingClose { name: String, day: Weekday },
    #[error("POI {name:?} closes on {day} but has no opening time")]
    MissingOpen { name: String, day: Weekday },
}

/// A [`TripRequest`] that cannot be turned into a [`TripProblem`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestError {
    #[error(transparent)]
    Day(#[from] ParseWeekdayError),
    #[error("day bounds: {0}")]
    Time(#[from] ParseClockError),
    #[error("POI #{index}: {source}")]
    Poi {
        index: usize,
        source: PoiRecordError,
    },
}

// ============================================================================
// Input
// ============================================================================

/// A POI as supplied by callers.
///
/// Days missing from both maps are closed. A closing time before the
/// opening time on the same day is read as past midnight.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub open_hour: BTreeMap<String, String>,
    pub close_hour: BTreeMap<String, String>,
    pub satisfaction: f64,
}

impl TryFrom<PoiRecord> for Poi {
    type Error = PoiRecordError;

    fn try_from(record: PoiRecord) -> Result<Self, Self::Error> {
        let mut open = BTreeMap::new();
        for (code, value) in &record.open_hour {
            let day = parse_day(&record.name, code)?;
            open.insert(day, parse_time(&record.name, day, value)?);
        }
        let mut close = BTreeMap::new();
        for (code, value) in &record.close_hour {
            let day = parse_day(&record.name, code)?;
            if !open.contains_key(&day) {
                return Err(PoiRecordError::MissingOpen {
                    name: record.name,
                    day,
                });
            }
            close.insert(day, parse_time(&record.name, day, value)?);
        }

        let mut poi = Poi::new(record.name, record.lat, record.lon, record.satisfaction);
        for (day, opens) in open {
            let Some(&closes) = close.get(&day) else {
                return Err(PoiRecordError::MissingClose {
                    name: poi.name,
                    day,
                });
            };
            poi.schedule.set(day, OpeningHours::new(opens, closes));
        }
        Ok(poi)
    }
}

impl From<&Poi> for PoiRecord {
    /// Renders all seven day codes; a closed day shows as `00:00`–`00:00`.
    fn from(poi: &Poi) -> Self {
        let mut open_hour = BTreeMap::new();
        let mut close_hour = BTreeMap::new();
        for (day, hours) in poi.schedule.iter() {
            open_hour.insert(day.code().to_string(), hours.open().to_string());
            close_hour.insert(day.code().to_string(), hours.close().to_string());
        }
        Self {
            name: poi.name.clone(),
            lat: poi.coord.lat,
            lon: poi.coord.lon,
            open_hour,
            close_hour,
            satisfaction: poi.satisfaction,
        }
    }
}

fn parse_day(name: &str, code: &str) -> Result<Weekday, PoiRecordError> {
    code.parse().map_err(|source| PoiRecordError::Day {
        name: name.to_string(),
        source,
    })
}

fn parse_time(name: &str, day: Weekday, value: &str) -> Result<ClockTime, PoiRecordError> {
    value.parse().map_err(|source| PoiRecordError::Time {
        name: name.to_string(),
        day,
        source,
    })
}

/// A whole trip as supplied by callers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripRequest {
    pub poi_list: Vec<PoiRecord>,
    pub days: Vec<String>,
    pub day_start: String,
    pub day_end: String,
}

impl TryFrom<TripRequest> for TripProblem {
    type Error = TripRequestError;

    /// Builds a problem with default objective weights. A day end before
    /// the day start is moved past midnight.
    fn try_from(request: TripRequest) -> Result<Self, Self::Error> {
        let begin: ClockTime = request.day_start.parse()?;
        let end = request.day_end.parse::<ClockTime>()?.spanning_from(begin);
        let days = request
            .days
            .iter()
            .map(|d| d.parse())
            .collect::<Result<Vec<Weekday>, _>>()?;

        let mut problem = TripProblem::new(begin, end, days);
        for (index, record) in request.poi_list.into_iter().enumerate() {
            let poi = Poi::try_from(record)
                .map_err(|source| TripRequestError::Poi { index, source })?;
            problem.add_poi(poi);
        }
        Ok(problem)
    }
}

// ============================================================================
// Output
// ============================================================================

/// One visit of a rendered itinerary.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct VisitReport {
    pub poi: PoiRecord,
    pub start_visit: String,
    pub end_visit: String,
    /// Minutes.
    pub visit_duration: i32,
}

/// One day of a rendered itinerary.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub visits: Vec<VisitReport>,
    pub day_number: usize,
    pub day_name: String,
}

/// An itinerary in its external representation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryReport {
    pub days: Vec<DayReport>,
    pub day_begin_hour: String,
    pub day_end_hour: String,
}

impl ItineraryReport {
    /// Renders `itinerary`, whose visits index into `pois`.
    pub fn new(itinerary: &Itinerary, pois: &[Poi]) -> Self {
        let days = itinerary
            .days
            .iter()
            .map(|day| DayReport {
                visits: day
                    .visits
                    .iter()
                    .map(|v| VisitReport {
                        poi: PoiRecord::from(&pois[v.poi().0]),
                        start_visit: v.start().to_string(),
                        end_visit: v.end().to_string(),
                        visit_duration: v.duration(),
                    })
                    .collect(),
                day_number: day.index,
                day_name: day.weekday.code().to_string(),
            })
            .collect();

        Self {
            days,
            day_begin_hour: itinerary.day_begin.to_string(),
            day_end_hour: itinerary.day_end.to_string(),
        }
    }

    /// Total number of visits over all days.
    pub fn visit_count(&self) -> usize {
        self.days.iter().map(|d| d.visits.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, PoiId, Visit};

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn hours(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn record() -> PoiRecord {
        PoiRecord {
            name: "Cloth Hall".into(),
            lat: 50.0617,
            lon: 19.9373,
            open_hour: hours(&[("mon", "09:00"), ("Sat", "20:00")]),
            close_hour: hours(&[("mon", "17:30"), ("Sat", "02:00")]),
            satisfaction: 0.7,
        }
    }

    #[test]
    fn test_record_to_poi() {
        let poi = Poi::try_from(record()).unwrap();
        assert_eq!(poi.name, "Cloth Hall");
        assert_eq!(poi.hours(Weekday::Mon), OpeningHours::new(hm(9, 0), hm(17, 30)));
        // closes past midnight
        assert_eq!(poi.close_time(Weekday::Sat).minutes(), 26 * 60);
        assert_eq!(poi.hours(Weekday::Tue), OpeningHours::CLOSED);
    }

    #[test]
    fn test_record_errors() {
        let mut bad_day = record();
        bad_day.open_hour.insert("xyz".into(), "09:00".into());
        assert!(matches!(
            Poi::try_from(bad_day),
            Err(PoiRecordError::Day { .. })
        ));

        let mut bad_time = record();
        bad_time.close_hour.insert("mon".into(), "25:00".into());
        assert!(matches!(
            Poi::try_from(bad_time),
            Err(PoiRecordError::Time { day: Weekday::Mon, .. })
        ));

        let mut no_close = record();
        no_close.open_hour.insert("wed".into(), "10:00".into());
        assert_eq!(
            Poi::try_from(no_close).unwrap_err(),
            PoiRecordError::MissingClose {
                name: "Cloth Hall".into(),
                day: Weekday::Wed
            }
        );

        let mut no_open = record();
        no_open.close_hour.insert("fri".into(), "10:00".into());
        assert!(matches!(
            Poi::try_from(no_open),
            Err(PoiRecordError::MissingOpen { day: Weekday::Fri, .. })
        ));
    }

    #[test]
    fn test_poi_renders_full_week() {
        let poi = Poi::try_from(record()).unwrap();
        let rendered = PoiRecord::from(&poi);
        assert_eq!(
            rendered.open_hour,
            hours(&[
                ("mon", "09:00"),
                ("tue", "00:00"),
                ("wed", "00:00"),
                ("thu", "00:00"),
                ("fri", "00:00"),
                ("sat", "20:00"),
                ("sun", "00:00"),
            ])
        );
        assert_eq!(rendered.close_hour.len(), 7);
        assert_eq!(rendered.close_hour["mon"], "17:30");
        assert_eq!(rendered.close_hour["sat"], "02:00");
        assert_eq!(rendered.close_hour["sun"], "00:00");

        // closed days come back closed
        let back = Poi::try_from(rendered).unwrap();
        assert_eq!(back.schedule, poi.schedule);
        assert_eq!(back.hours(Weekday::Wed), OpeningHours::CLOSED);
    }

    #[test]
    fn test_report_lists_every_day_of_each_poi() {
        let monday_only = Poi::new("Kiosk", 50.06, 19.94, 0.3)
            .with_hours(Weekday::Mon, OpeningHours::new(hm(8, 0), hm(20, 0)));
        let mut it = Itinerary::new(hm(9, 0), hm(18, 0));
        it.days.push(
            Day::new(0, Weekday::Mon).with_visits(vec![Visit::new(PoiId(0), hm(9, 0), hm(10, 0))]),
        );
        let report = ItineraryReport::new(&it, &[monday_only]);
        let poi = &report.days[0].visits[0].poi;
        assert_eq!(poi.open_hour.len(), 7);
        assert_eq!(poi.close_hour.len(), 7);
        assert_eq!(poi.open_hour["tue"], "00:00");
        assert_eq!(poi.open_hour["mon"], "08:00");
    }

    #[test]
    fn test_trip_request() {
        let request = TripRequest {
            poi_list: vec![record()],
            days: vec!["mon".into(), "sat".into()],
            day_start: "20:00".into(),
            day_end: "01:00".into(),
        };
        let problem = TripProblem::try_from(request).unwrap();
        assert_eq!(problem.days(), &[Weekday::Mon, Weekday::Sat]);
        assert_eq!(problem.day_end().minutes(), 25 * 60);
        assert_eq!(problem.pois().len(), 1);
        assert!(problem.validate().is_ok());

        let bad = TripRequest {
            poi_list: vec![PoiRecord {
                open_hour: hours(&[("mon", "9")]),
                close_hour: hours(&[("mon", "10:00")]),
                ..record()
            }],
            days: vec!["mon".into()],
            day_start: "09:00".into(),
            day_end: "18:00".into(),
        };
        assert!(matches!(
            TripProblem::try_from(bad),
            Err(TripRequestError::Poi { index: 0, .. })
        ));
    }

    #[test]
    fn test_itinerary_report() {
        let pois = vec![Poi::try_from(record()).unwrap()];
        let mut it = Itinerary::new(hm(9, 0), hm(18, 0));
        it.days.push(
            Day::new(0, Weekday::Mon).with_visits(vec![Visit::new(PoiId(0), hm(9, 5), hm(11, 0))]),
        );
        it.days.push(Day::new(1, Weekday::Tue));

        let report = ItineraryReport::new(&it, &pois);
        assert_eq!(report.day_begin_hour, "09:00");
        assert_eq!(report.day_end_hour, "18:00");
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].day_name, "mon");
        assert_eq!(report.days[1].day_number, 1);
        assert!(report.days[1].visits.is_empty());
        let visit = &report.days[0].visits[0];
        assert_eq!(visit.start_visit, "09:05");
        assert_eq!(visit.end_visit, "11:00");
        assert_eq!(visit.visit_duration, 115);
        assert_eq!(visit.poi.name, "Cloth Hall");
        assert_eq!(report.visit_count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "name": "Barbican",
            "lat": 50.0655, "lon": 19.9417,
            "openHour": {"tue": "10:30"},
            "closeHour": {"tue": "18:00"},
            "satisfaction": 0.4
        }"#;
        let record: PoiRecord = serde_json::from_str(json).unwrap();
        let poi = Poi::try_from(record).unwrap();
        assert_eq!(poi.open_time(Weekday::Tue), hm(10, 30));

        let pois = vec![poi];
        let mut it = Itinerary::new(hm(9, 0), hm(18, 0));
        it.days.push(
            Day::new(0, Weekday::Tue).with_visits(vec![Visit::new(PoiId(0), hm(11, 0), hm(12, 0))]),
        );
        let value = serde_json::to_value(ItineraryReport::new(&it, &pois)).unwrap();
        assert_eq!(value["DayBeginHour"], "09:00");
        assert_eq!(value["DayEndHour"], "18:00");
        assert_eq!(value["Days"][0]["DayName"], "tue");
        assert_eq!(value["Days"][0]["DayNumber"], 0);
        let visit = &value["Days"][0]["Visits"][0];
        assert_eq!(visit["StartVisit"], "11:00");
        assert_eq!(visit["VisitDuration"], 60);
        assert_eq!(visit["Poi"]["openHour"]["tue"], "10:30");
        assert_eq!(visit["Poi"]["openHour"]["mon"], "00:00");
    }
}
