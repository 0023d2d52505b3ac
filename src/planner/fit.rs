//! Feasibility fit check: can a POI take over a visit's slot?
//!
//! Used by both mutation and crossover repair. The fitted window is the
//! widest one the neighbours and opening hours allow, not a random
//! sub-duration.

use super::constraints::MIN_VISIT_MINUTES;
use crate::model::{Day, Itinerary, Poi, PoiId};
use crate::time::ClockTime;
use crate::travel::travel_minutes;

/// Returns the `(start, end)` window `candidate` would occupy if it replaced
/// the visit at `position` of `day`, or `None` if it does not fit.
///
/// # Panics
/// Panics if `position` is out of range for `day.visits`.
pub fn fit_window(
    candidate: PoiId,
    day: &Day,
    position: usize,
    itinerary: &Itinerary,
    pois: &[Poi],
) -> Option<(ClockTime, ClockTime)> {
    let visits = &day.visits;
    let poi = &pois[candidate.0];
    let hours = poi.hours(day.weekday);

    if visits.len() == 1 {
        // Sole visit: keep the slot as is.
        let current = &visits[position];
        return hours
            .contains(current.start(), current.end())
            .then(|| (current.start(), current.end()));
    }

    let start = match position.checked_sub(1).map(|i| &visits[i]) {
        Some(prev) => hours
            .open()
            .max(prev.end().add_minutes(travel_minutes(&pois[prev.poi().0], poi))),
        None => hours.open().max(itinerary.day_begin),
    };
    let end = match visits.get(position + 1) {
        Some(next) => hours
            .close()
            .min(next.start().sub_minutes(travel_minutes(poi, &pois[next.poi().0]))),
        None => hours.close().min(itinerary.day_end),
    };

    let accepted = start < end
        && start.minutes_until(end) >= MIN_VISIT_MINUTES
        && hours.contains(start, end);
    accepted.then_some((start, end))
}
