//! Trip definition: day bounds, day codes, objective weights, and POIs.

use super::objective::ObjectiveWeights;
use crate::error::PlanError;
use crate::model::{Poi, PoiId};
use crate::time::{ClockTime, Weekday};

/// Everything the engine plans against.
///
/// Built once per run, then shared read-only by every task.
///
/// # Examples
///
/// ```
/// use u_itinerary::model::{OpeningHours, Poi};
/// use u_itinerary::planner::TripProblem;
/// use u_itinerary::time::{ClockTime, Weekday};
///
/// let begin = ClockTime::from_hm(9, 0).unwrap();
/// let end = ClockTime::from_hm(18, 0).unwrap();
/// let problem = TripProblem::new(begin, end, vec![Weekday::Mon, Weekday::Tue])
///     .with_poi(Poi::new("Castle", 50.05, 19.93, 0.9).open_every_day(OpeningHours::new(begin, end)));
/// assert!(problem.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TripProblem {
    day_begin: ClockTime,
    day_end: ClockTime,
    days: Vec<Weekday>,
    weights: ObjectiveWeights,
    pois: Vec<Poi>,
}

impl TripProblem {
    /// Creates a problem with default objective weights and no POIs.
    ///
    /// `day_end` must already be moved past midnight if it wraps; see
    /// [`ClockTime::spanning_from`].
    pub fn new(day_begin: ClockTime, day_end: ClockTime, days: Vec<Weekday>) -> Self {
        Self {
            day_begin,
            day_end,
            days,
            weights: ObjectiveWeights::default(),
            pois: Vec::new(),
        }
    }

    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_poi(mut self, poi: Poi) -> Self {
        self.add_poi(poi);
        self
    }

    pub fn with_pois(mut self, pois: impl IntoIterator<Item = Poi>) -> Self {
        self.pois.extend(pois);
        self
    }

    /// Appends a POI and returns its id.
    pub fn add_poi(&mut self, poi: Poi) -> PoiId {
        self.pois.push(poi);
        PoiId(self.pois.len() - 1)
    }

    pub fn day_begin(&self) -> ClockTime {
        self.day_begin
    }

    pub fn day_end(&self) -> ClockTime {
        self.day_end
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn poi(&self, id: PoiId) -> &Poi {
        &self.pois[id.0]
    }

    /// All POI ids, in load order.
    pub fn poi_ids(&self) -> impl Iterator<Item = PoiId> {
        (0..self.pois.len()).map(PoiId)
    }

    /// Whether crossover applies (more than one day to split).
    pub fn is_multi_day(&self) -> bool {
        self.days.len() > 1
    }

    /// Checks that the problem can be planned.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.pois.is_empty() {
            return Err(PlanError::NoPois);
        }
        if self.days.is_empty() {
            return Err(PlanError::NoDays);
        }
        if self.day_end <= self.day_begin {
            return Err(PlanError::DayBoundsInverted {
                begin: self.day_begin,
                end: self.day_end,
            });
        }
        self.weights.validate()?;
        for poi in &self.pois {
            if !poi.coord.lat.is_finite() || !poi.coord.lon.is_finite() {
                return Err(PlanError::InvalidCoordinates {
                    name: poi.name.clone(),
                });
            }
            if !(0.0..=1.0).contains(&poi.satisfaction) {
                return Err(PlanError::InvalidSatisfaction {
                    name: poi.name.clone(),
                    value: poi.satisfaction,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OpeningHours;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn poi(name: &str) -> Poi {
        Poi::new(name, 50.0, 19.0, 0.5).open_every_day(OpeningHours::new(hm(9, 0), hm(18, 0)))
    }

    #[test]
    fn test_valid_problem() {
        let p = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]).with_poi(poi("a"));
        assert!(p.validate().is_ok());
        assert!(!p.is_multi_day());
    }

    #[test]
    fn test_rejects_empty_inputs() {
        let no_pois = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]);
        assert_eq!(no_pois.validate(), Err(PlanError::NoPois));

        let no_days = TripProblem::new(hm(9, 0), hm(18, 0), vec![]).with_poi(poi("a"));
        assert_eq!(no_days.validate(), Err(PlanError::NoDays));
    }

    #[test]
    fn test_rejects_uncorrected_day_end() {
        let p = TripProblem::new(hm(20, 0), hm(2, 0), vec![Weekday::Fri]).with_poi(poi("a"));
        assert!(matches!(
            p.validate(),
            Err(PlanError::DayBoundsInverted { .. })
        ));

        let fixed = TripProblem::new(hm(20, 0), hm(2, 0).spanning_from(hm(20, 0)), vec![Weekday::Fri])
            .with_poi(poi("a"));
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_poi() {
        let mut bad = poi("x");
        bad.satisfaction = 1.5;
        let p = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]).with_poi(bad);
        assert!(matches!(
            p.validate(),
            Err(PlanError::InvalidSatisfaction { .. })
        ));

        let mut nan = poi("y");
        nan.coord.lat = f64::NAN;
        let p = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]).with_poi(nan);
        assert!(matches!(
            p.validate(),
            Err(PlanError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_add_poi_returns_sequential_ids() {
        let mut p = TripProblem::new(hm(9, 0), hm(18, 0), vec![Weekday::Mon]);
        assert_eq!(p.add_poi(poi("a")), PoiId(0));
        assert_eq!(p.add_poi(poi("b")), PoiId(1));
        assert_eq!(p.poi(PoiId(1)).name, "b");
        assert_eq!(p.poi_ids().count(), 2);
    }
}
