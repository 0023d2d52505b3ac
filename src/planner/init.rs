//! Randomized greedy construction of initial itineraries.

use rand::Rng;

use super::constraints::MIN_VISIT_MINUTES;
use super::problem::TripProblem;
use crate::model::{Day, Itinerary, PoiId, Visit};
use crate::travel::travel_minutes;

/// Shortest and longest randomized stay drawn during construction.
pub const STAY_RANGE_MINUTES: std::ops::RangeInclusive<i32> = MIN_VISIT_MINUTES..=180;

/// Builds one random, feasible-leaning itinerary.
///
/// Each day is filled greedily: a random POI not yet used anywhere in the
/// itinerary is placed after the previous visit (plus travel), clipped to
/// its opening time and to the day end. A POI whose window comes out empty
/// or shorter than the minimum stay is dropped from that day's pool only.
/// The day ends when the pool runs dry or no full minimum stay fits before
/// the day end.
pub fn random_itinerary<R: Rng>(problem: &TripProblem, rng: &mut R) -> Itinerary {
    let mut used = vec![false; problem.pois().len()];
    let mut itinerary = Itinerary::new(problem.day_begin(), problem.day_end());

    for (index, &weekday) in problem.days().iter().enumerate() {
        let mut day = Day::new(index, weekday);
        let mut pool: Vec<PoiId> = problem.poi_ids().filter(|id| !used[id.0]).collect();

        while !pool.is_empty() {
            let prev = day.visits.last().copied();
            if let Some(prev) = prev {
                if prev.end().add_minutes(MIN_VISIT_MINUTES) > problem.day_end() {
                    break;
                }
            }

            let slot = rng.random_range(0..pool.len());
            let id = pool.swap_remove(slot);
            let poi = problem.poi(id);
            let hours = poi.hours(weekday);

            let start = match prev {
                Some(p) => p.end().add_minutes(travel_minutes(problem.poi(p.poi()), poi)),
                None => problem.day_begin(),
            }
            .max(hours.open());
            let end = start
                .add_minutes(rng.random_range(STAY_RANGE_MINUTES))
                .min(hours.close())
                .min(problem.day_end());

            if start >= end || start.minutes_until(end) < MIN_VISIT_MINUTES {
                continue;
            }

            day.visits.push(Visit::new(id, start, end));
            used[id.0] = true;
        }

        itinerary.days.push(day);
    }

    itinerary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OpeningHours, Poi};
    use crate::planner::constraints::ConstraintEvaluator;
    use crate::time::{ClockTime, Weekday};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn nine_to_six() -> OpeningHours {
        OpeningHours::new(hm(9, 0), hm(18, 0))
    }

    #[test]
    fn test_two_pois_single_day() {
        let problem = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]).with_pois([
            Poi::new("a", 50.06, 19.94, 1.0).open_every_day(nine_to_six()),
            Poi::new("b", 50.05, 19.93, 1.0).open_every_day(nine_to_six()),
        ]);
        let eval = ConstraintEvaluator::default();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let it = random_itinerary(&problem, &mut rng);
            assert_eq!(it.days.len(), 1);
            let n = it.days[0].visits.len();
            assert!((1..=2).contains(&n), "seed {seed}: {n} visits");
            assert_eq!(eval.failures(&it, problem.pois()), 0, "seed {seed}");
        }
    }

    #[test]
    fn test_closed_poi_is_discarded_without_looping() {
        let problem = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]).with_pois([
            Poi::new("closed", 50.0, 19.0, 1.0),
            Poi::new("inverted", 50.0, 19.0, 1.0)
                .with_hours(Weekday::Mon, OpeningHours::new(hm(19, 0), hm(23, 0))),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        let it = random_itinerary(&problem, &mut rng);
        assert_eq!(it.days.len(), 1);
        assert!(it.days[0].visits.is_empty());
    }

    #[test]
    fn test_pois_unique_across_days() {
        let pois: Vec<Poi> = (0..12)
            .map(|i| {
                Poi::new(format!("p{i}"), 50.0 + i as f64 * 0.002, 19.9, 0.5)
                    .open_every_day(nine_to_six())
            })
            .collect();
        let problem = TripProblem::new(
            hm(9, 0),
            hm(18, 0),
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed],
        )
        .with_pois(pois);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let it = random_itinerary(&problem, &mut rng);
            assert_eq!(it.days.len(), 3);
            assert_eq!(it.used_pois().len(), it.visit_count());
            for (i, day) in it.days.iter().enumerate() {
                assert_eq!(day.index, i);
                for v in &day.visits {
                    assert!(v.duration() >= MIN_VISIT_MINUTES);
                    assert!(v.end() <= problem.day_end());
                }
            }
        }
    }

    #[test]
    fn test_poi_closed_one_day_used_later() {
        let problem = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon, Weekday::Tue])
            .with_poi(
                Poi::new("tue-only", 50.0, 19.0, 1.0).with_hours(Weekday::Tue, nine_to_six()),
            );
        let mut rng = StdRng::seed_from_u64(11);
        let it = random_itinerary(&problem, &mut rng);
        assert!(it.days[0].visits.is_empty());
        assert_eq!(it.days[1].visits.len(), 1);
    }
}
