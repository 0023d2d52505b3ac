//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Fitness here is maximized and may be negative once penalties dominate.
//! When any member has non-positive fitness, selection weights are shifted
//! by the population minimum so every weight is positive; the members'
//! reported fitness is left untouched.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use rand::Rng;

use crate::model::Solution;

/// Weight floor so the weakest member keeps a non-zero chance.
const EPSILON: f64 = 1e-10;

/// Cumulative selection weights over a population snapshot.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    weights: Vec<f64>,
    total: f64,
}

impl RouletteWheel {
    /// Builds the wheel for `population`.
    pub fn new(population: &[Solution]) -> Self {
        let min = population
            .iter()
            .map(|s| s.fitness)
            .fold(f64::INFINITY, f64::min);
        let shift = if min <= 0.0 { EPSILON - min } else { 0.0 };

        let weights: Vec<f64> = population
            .iter()
            .map(|s| {
                let w = s.fitness + shift;
                if w.is_finite() && w > 0.0 {
                    w
                } else {
                    EPSILON
                }
            })
            .collect();
        let total = weights.iter().sum();
        Self { weights, total }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Draws one member index.
    ///
    /// # Panics
    /// Panics if the wheel is empty.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        assert!(!self.weights.is_empty(), "cannot select from empty population");
        let n = self.weights.len();
        if n == 1 {
            return 0;
        }
        if !(self.total.is_finite() && self.total > 0.0) {
            return rng.random_range(0..n);
        }

        let threshold = rng.random_range(0.0..self.total);
        let mut cumulative = 0.0;
        for (i, &w) in self.weights.iter().enumerate() {
            cumulative += w;
            if cumulative > threshold {
                return i;
            }
        }

        n - 1 // floating-point fallback
    }
}

/// Number of parent pairs for one generation of a population with
/// `target_size` members: uniform in `[target/10 + 1, target/5]`, with the
/// upper bound lifted to the lower for small populations.
pub fn pair_count<R: Rng>(target_size: usize, rng: &mut R) -> usize {
    let lo = target_size / 10 + 1;
    let hi = (target_size / 5).max(lo);
    rng.random_range(lo..=hi)
}

/// Draws `pairs` parent pairs; the two parents are drawn independently, so
/// a member may be paired with itself.
pub fn select_pairs<R: Rng>(
    population: &[Solution],
    pairs: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    if population.is_empty() {
        return Vec::new();
    }
    let wheel = RouletteWheel::new(population);
    (0..pairs)
        .map(|_| (wheel.spin(rng), wheel.spin(rng)))
        .collect()
}
