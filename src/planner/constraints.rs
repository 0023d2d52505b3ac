//! Constraint evaluator.
//!
//! A fixed, ordered list of whole-itinerary checks. Every check runs on
//! every evaluation, and each failing check adds exactly one to the
//! failure count no matter how many visits violate it, so the count lies
//! in `[0, checks.len()]`.

use std::collections::HashSet;

use crate::model::{Itinerary, Poi};
use crate::travel::travel_minutes;

/// Shortest stay that counts as a visit, in minutes.
pub const MIN_VISIT_MINUTES: i32 = 60;

/// A named predicate over an itinerary; `true` means satisfied.
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub name: &'static str,
    pub check: fn(&Itinerary, &[Poi]) -> bool,
}

/// Ordered constraint pipeline.
#[derive(Debug, Clone)]
pub struct ConstraintEvaluator {
    constraints: Vec<Constraint>,
}

impl Default for ConstraintEvaluator {
    /// The standard pipeline: day bounds, travel gaps, opening hours,
    /// minimum stay, POI uniqueness.
    fn default() -> Self {
        Self::new(vec![
            Constraint {
                name: "within_day_bounds",
                check: within_day_bounds,
            },
            Constraint {
                name: "travel_gaps",
                check: travel_gaps_respected,
            },
            Constraint {
                name: "open_during_visit",
                check: open_during_visits,
            },
            Constraint {
                name: "minimum_stay",
                check: minimum_stay_met,
            },
            Constraint {
                name: "unique_pois",
                check: pois_unique,
            },
        ])
    }
}

impl ConstraintEvaluator {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of failed constraints.
    pub fn failures(&self, itinerary: &Itinerary, pois: &[Poi]) -> usize {
        self.failed(itinerary, pois).len()
    }

    /// Names of the failed constraints, in pipeline order.
    pub fn failed(&self, itinerary: &Itinerary, pois: &[Poi]) -> Vec<&'static str> {
        self.constraints
            .iter()
            .filter(|c| {
                let ok = (c.check)(itinerary, pois);
                if !ok {
                    tracing::trace!(constraint = c.name, "constraint failed");
                }
                !ok
            })
            .map(|c| c.name)
            .collect()
    }
}

/// First visit starts no earlier than day begin; last ends no later than
/// day end. Days without visits pass.
pub fn within_day_bounds(itinerary: &Itinerary, _pois: &[Poi]) -> bool {
    itinerary.days.iter().all(|day| {
        let starts_ok = day
            .visits
            .first()
            .map_or(true, |v| v.start() >= itinerary.day_begin);
        let ends_ok = day
            .visits
            .last()
            .map_or(true, |v| v.end() <= itinerary.day_end);
        starts_ok && ends_ok
    })
}

/// Consecutive visits leave at least the travel time between them.
pub fn travel_gaps_respected(itinerary: &Itinerary, pois: &[Poi]) -> bool {
    itinerary.days.iter().all(|day| {
        day.visits.windows(2).all(|pair| {
            let travel = travel_minutes(&pois[pair[0].poi().0], &pois[pair[1].poi().0]);
            pair[1].start() >= pair[0].end().add_minutes(travel)
        })
    })
}

/// Every visit lies inside its POI's opening hours for that day code.
pub fn open_during_visits(itinerary: &Itinerary, pois: &[Poi]) -> bool {
    itinerary.days.iter().all(|day| {
        day.visits
            .iter()
            .all(|v| pois[v.poi().0].hours(day.weekday).contains(v.start(), v.end()))
    })
}

/// Every visit lasts at least [`MIN_VISIT_MINUTES`].
pub fn minimum_stay_met(itinerary: &Itinerary, _pois: &[Poi]) -> bool {
    itinerary
        .visits()
        .all(|v| v.start().minutes_until(v.end()) >= MIN_VISIT_MINUTES)
}

/// No POI is visited twice anywhere in the itinerary.
pub fn pois_unique(itinerary: &Itinerary, _pois: &[Poi]) -> bool {
    let mut seen = HashSet::new();
    itinerary.visits().all(|v| seen.insert(v.poi()))
}
