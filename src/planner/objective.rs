//! Objective function.
//!
//! ```text
//! fitness = w_sat · Σ (duration / 1440 · satisfaction)
//!         + w_poi · visit_count
//!         − w_penalty · failed_constraints
//! ```
//!
//! Constraint failures are a soft penalty: infeasible itineraries are
//! ranked low but stay in the population.

use crate::error::PlanError;
use crate::model::{Itinerary, Poi};
use crate::time::MINUTES_PER_DAY;

/// Run-level weights of the objective terms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveWeights {
    /// Reward per scheduled visit.
    pub poi_count: f64,
    /// Cost per failed constraint.
    pub penalty: f64,
    /// Multiplier of the satisfaction-weighted stay time.
    pub satisfaction: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            poi_count: 0.05,
            penalty: 1000.0,
            satisfaction: 1.0,
        }
    }
}

impl ObjectiveWeights {
    pub fn validate(&self) -> Result<(), PlanError> {
        for (name, value) in [
            ("poi_count", self.poi_count),
            ("penalty", self.penalty),
            ("satisfaction", self.satisfaction),
        ] {
            if !value.is_finite() {
                return Err(PlanError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Scores an itinerary given its failed constraint count.
pub fn objective(
    itinerary: &Itinerary,
    pois: &[Poi],
    failures: usize,
    weights: &ObjectiveWeights,
) -> f64 {
    let satisfaction: f64 = itinerary
        .visits()
        .map(|v| v.duration() as f64 / MINUTES_PER_DAY as f64 * pois[v.poi().0].satisfaction)
        .sum();
    let visits = itinerary.visit_count() as f64;

    weights.satisfaction * satisfaction + weights.poi_count * visits
        - weights.penalty * failures as f64
}
