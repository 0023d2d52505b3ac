//! Day-boundary crossover with duplicate-POI repair.
//!
//! # Algorithm
//!
//! 1. Pick a split index `k` in `[1, days - 1]`
//! 2. Child A = days `[0, k)` of parent 1 + days `[k, end)` of parent 2;
//!    child B is the mirror
//! 3. Repair each child: every visit repeating an earlier POI is given a
//!    random unused POI that fits its slot, or is removed when none fits
//!
//! Children are built from value copies of the parents' days, so repairing
//! a child never touches a parent.

use rand::Rng;

use super::fit::fit_window;
use super::problem::TripProblem;
use crate::error::OperatorError;
use crate::model::{Itinerary, PoiId};
use crate::time::ClockTime;

/// Crosses two parents and repairs both children.
pub fn crossover<R: Rng>(
    parent1: &Itinerary,
    parent2: &Itinerary,
    problem: &TripProblem,
    rng: &mut R,
) -> Result<(Itinerary, Itinerary), OperatorError> {
    let (mut child1, mut child2, _) = split_days(parent1, parent2, rng)?;
    repair_duplicates(&mut child1, problem, rng);
    repair_duplicates(&mut child2, problem, rng);
    Ok((child1, child2))
}

/// Splices two parents at a random day boundary.
///
/// Returns both children and the split index.
pub fn split_days<R: Rng>(
    parent1: &Itinerary,
    parent2: &Itinerary,
    rng: &mut R,
) -> Result<(Itinerary, Itinerary, usize), OperatorError> {
    let n = parent1.days.len();
    if n != parent2.days.len() {
        return Err(OperatorError::DayCountMismatch {
            left: n,
            right: parent2.days.len(),
        });
    }
    if n < 2 {
        return Err(OperatorError::TooFewDays(n));
    }

    let split = rng.random_range(1..n);
    Ok((
        splice(parent1, parent2, split),
        splice(parent2, parent1, split),
        split,
    ))
}

fn splice(head: &Itinerary, tail: &Itinerary, split: usize) -> Itinerary {
    Itinerary {
        days: head.days[..split]
            .iter()
            .chain(tail.days[split..].iter())
            .cloned()
            .collect(),
        day_begin: head.day_begin,
        day_end: head.day_end,
    }
}

/// A visit that repeats a POI already placed earlier in scan order.
#[derive(Debug, Clone, Copy)]
struct Duplicate {
    day: usize,
    visit: usize,
}

/// Replaces or removes visits that repeat an already used POI.
///
/// Best effort: a duplicate with no fitting replacement is removed, and
/// its neighbours grow into half of the freed time each.
pub fn repair_duplicates<R: Rng>(itinerary: &mut Itinerary, problem: &TripProblem, rng: &mut R) {
    let mut used = vec![false; problem.pois().len()];
    let mut pending = Vec::new();
    for (d, day) in itinerary.days.iter().enumerate() {
        for (v, visit) in day.visits.iter().enumerate() {
            let seen = &mut used[visit.poi().0];
            if *seen {
                pending.push(Duplicate { day: d, visit: v });
            } else {
                *seen = true;
            }
        }
    }

    for i in 0..pending.len() {
        let Duplicate { day: d, visit: v } = pending[i];

        match draw_fitting(itinerary, d, v, &used, problem, rng) {
            Some((poi, start, end)) => {
                used[poi.0] = true;
                itinerary.days[d].visits[v].replace(poi, start, end);
            }
            None => {
                remove_and_widen(itinerary, d, v, problem);
                for later in &mut pending[i + 1..] {
                    if later.day == d && later.visit > v {
                        later.visit -= 1;
                    }
                }
            }
        }
    }
}

/// Draws unused POIs without replacement until one fits the slot.
fn draw_fitting<R: Rng>(
    itinerary: &Itinerary,
    d: usize,
    v: usize,
    used: &[bool],
    problem: &TripProblem,
    rng: &mut R,
) -> Option<(PoiId, ClockTime, ClockTime)> {
    let day = &itinerary.days[d];
    let mut available: Vec<PoiId> = problem.poi_ids().filter(|id| !used[id.0]).collect();
    while !available.is_empty() {
        let candidate = available.swap_remove(rng.random_range(0..available.len()));
        if let Some((start, end)) = fit_window(candidate, day, v, itinerary, problem.pois()) {
            return Some((candidate, start, end));
        }
    }
    None
}

/// Removes a visit and hands half its duration to each neighbour, bounded
/// by the neighbour's own opening hours.
fn remove_and_widen(itinerary: &mut Itinerary, d: usize, v: usize, problem: &TripProblem) {
    let day = &mut itinerary.days[d];
    let weekday = day.weekday;
    let half = day.visits[v].duration() / 2;

    if v > 0 {
        let prev = &mut day.visits[v - 1];
        let close = problem.poi(prev.poi()).close_time(weekday);
        prev.set_end(prev.end().add_minutes(half).min(close));
    }
    if v + 1 < day.visits.len() {
        let next = &mut day.visits[v + 1];
        let open = problem.poi(next.poi()).open_time(weekday);
        next.set_start(next.start().sub_minutes(half).max(open));
    }
    day.visits.remove(v);
}
