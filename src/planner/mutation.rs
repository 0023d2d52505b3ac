//! POI substitution mutation.
//!
//! Swaps the POI of a random visit for one not used anywhere in the
//! itinerary, taking the widest window the neighbours allow. A visit with
//! no fitting substitute is left unchanged.

use rand::seq::SliceRandom;
use rand::Rng;

use super::fit::fit_window;
use super::problem::TripProblem;
use crate::model::{Itinerary, PoiId};

/// POIs not visited anywhere in `itinerary`, in load order.
pub fn unused_pois(itinerary: &Itinerary, problem: &TripProblem) -> Vec<PoiId> {
    let used = itinerary.used_pois();
    problem.poi_ids().filter(|id| !used.contains(id)).collect()
}

/// Mutates an itinerary in place.
///
/// With a single day, one random visit is always tried. With several days,
/// each day is tried with probability `day_rate`; a POI placed on an earlier
/// day is no longer available to later ones.
///
/// Returns the number of substituted visits.
pub fn substitute_poi<R: Rng>(
    itinerary: &mut Itinerary,
    problem: &TripProblem,
    day_rate: f64,
    rng: &mut R,
) -> usize {
    let mut unused = unused_pois(itinerary, problem);
    let single_day = itinerary.days.len() == 1;
    let mut substituted = 0;

    for d in 0..itinerary.days.len() {
        if itinerary.days[d].visits.is_empty() {
            continue;
        }
        if !single_day && !rng.random_bool(day_rate) {
            continue;
        }
        let v = rng.random_range(0..itinerary.days[d].visits.len());
        if try_substitute(itinerary, d, v, &mut unused, problem, rng) {
            substituted += 1;
        }
    }

    substituted
}

/// Tries the unused POIs in random order at visit `v` of day `d`; the first
/// that fits takes the slot and leaves `unused`.
pub fn try_substitute<R: Rng>(
    itinerary: &mut Itinerary,
    d: usize,
    v: usize,
    unused: &mut Vec<PoiId>,
    problem: &TripProblem,
    rng: &mut R,
) -> bool {
    unused.shuffle(rng);
    let day = &itinerary.days[d];
    let found = unused.iter().enumerate().find_map(|(i, &candidate)| {
        fit_window(candidate, day, v, itinerary, problem.pois()).map(|w| (i, candidate, w))
    });

    match found {
        Some((i, poi, (start, end))) => {
            unused.swap_remove(i);
            itinerary.days[d].visits[v].replace(poi, start, end);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, OpeningHours, Poi, Visit};
    use crate::planner::crossover::crossover;
    use crate::planner::init::random_itinerary;
    use crate::time::{ClockTime, Weekday};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn problem(n_pois: usize, days: usize) -> TripProblem {
        let pois = (0..n_pois).map(|i| {
            Poi::new(format!("p{i}"), 50.0 + (i % 4) as f64 * 0.002, 19.9 + (i / 4) as f64 * 0.002, 0.5)
                .open_every_day(OpeningHours::new(hm(8, 0), hm(20, 0)))
        });
        TripProblem::new(hm(9, 0), hm(18, 0), Weekday::ALL[..days].to_vec()).with_pois(pois)
    }

    #[test]
    fn test_single_day_always_tries() {
        let p = problem(3, 1);
        let mut it = Itinerary::new(hm(9, 0), hm(18, 0));
        it.days.push(
            Day::new(0, Weekday::Mon).with_visits(vec![Visit::new(PoiId(0), hm(10, 0), hm(12, 0))]),
        );
        let mut rng = StdRng::seed_from_u64(1);
        // day_rate is ignored for a single day
        let n = substitute_poi(&mut it, &p, 0.0, &mut rng);
        assert_eq!(n, 1);
        let v = it.days[0].visits[0];
        assert_ne!(v.poi(), PoiId(0));
        // sole visit keeps its slot
        assert_eq!((v.start(), v.end()), (hm(10, 0), hm(12, 0)));
    }

    #[test]
    fn test_no_substitute_leaves_visit() {
        let p = problem(1, 1);
        let mut it = Itinerary::new(hm(9, 0), hm(18, 0));
        let original = Visit::new(PoiId(0), hm(10, 0), hm(12, 0));
        it.days.push(Day::new(0, Weekday::Mon).with_visits(vec![original]));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(substitute_poi(&mut it, &p, 1.0, &mut rng), 0);
        assert_eq!(it.days[0].visits[0], original);
    }

    #[test]
    fn test_zero_day_rate_skips_multi_day() {
        let p = problem(20, 3);
        let mut rng = StdRng::seed_from_u64(2);
        let mut it = random_itinerary(&p, &mut rng);
        let before = it.clone();
        assert_eq!(substitute_poi(&mut it, &p, 0.0, &mut rng), 0);
        assert_eq!(it, before);
    }

    #[test]
    fn test_unused_pois() {
        let p = problem(4, 1);
        let mut it = Itinerary::new(hm(9, 0), hm(18, 0));
        it.days.push(Day::new(0, Weekday::Mon).with_visits(vec![
            Visit::new(PoiId(1), hm(9, 0), hm(10, 0)),
            Visit::new(PoiId(3), hm(11, 0), hm(12, 0)),
        ]));
        assert_eq!(unused_pois(&it, &p), vec![PoiId(0), PoiId(2)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_never_reuses_a_poi(seed in any::<u64>(), days in 1usize..5, n_pois in 3usize..25) {
            let p = problem(n_pois, days);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut it = random_itinerary(&p, &mut rng);
            if days > 1 {
                let other = random_itinerary(&p, &mut rng);
                it = crossover(&it, &other, &p, &mut rng).unwrap().0;
            }
            let before = it.used_pois();
            let unused_before = unused_pois(&it, &p);
            let visits_before: Vec<Visit> = it.visits().copied().collect();
            let substituted = substitute_poi(&mut it, &p, 1.0, &mut rng);

            let visits_after: Vec<Visit> = it.visits().copied().collect();
            prop_assert_eq!(visits_after.len(), visits_before.len());
            let changed = visits_before
                .iter()
                .zip(&visits_after)
                .filter(|(b, a)| b.poi() != a.poi())
                .count();
            prop_assert_eq!(changed, substituted);

            let after = it.used_pois();
            prop_assert_eq!(after.len(), it.visit_count());
            for added in after.difference(&before) {
                prop_assert!(unused_before.contains(added), "{:?} was already in use", added);
                let placed = it.visits().filter(|v| v.poi() == *added).count();
                prop_assert_eq!(placed, 1, "{:?} placed {} times", added, placed);
            }
        }
    }
}
