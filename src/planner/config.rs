//! Planner configuration.
//!
//! [`PlannerConfig`] holds the parameters of the evolutionary loop; the
//! trip itself is described by [`TripProblem`](super::TripProblem).

use crate::error::PlanError;

/// Configuration for an itinerary optimization run.
///
/// # Defaults
///
/// ```
/// use u_itinerary::planner::PlannerConfig;
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.iterations, 100);
/// assert_eq!(config.solution_ttl, 8);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_itinerary::planner::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_population_size(120)
///     .with_iterations(50)
///     .with_solution_ttl(4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Number of solutions built initially; the population is truncated
    /// back to this size every generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub iterations: usize,

    /// Generations a solution may survive before eviction.
    pub solution_ttl: usize,

    /// Probability of mutating each crossover child (0.0–1.0).
    pub mutation_rate: f64,

    /// Per-day probability of trying a substitution when a multi-day
    /// itinerary is mutated (0.0–1.0).
    pub day_mutation_rate: f64,

    /// Probability of mutating each solution per generation when the trip
    /// has a single day and crossover does not apply (0.0–1.0).
    pub single_day_mutation_rate: f64,

    /// Whether to run construction and offspring production on rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            iterations: 100,
            solution_ttl: 8,
            mutation_rate: 0.2,
            day_mutation_rate: 0.6,
            single_day_mutation_rate: 0.8,
            parallel: true,
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the solution time-to-live.
    pub fn with_solution_ttl(mut self, ttl: usize) -> Self {
        self.solution_ttl = ttl;
        self
    }

    /// Sets the child mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-day mutation rate.
    pub fn with_day_mutation_rate(mut self, rate: f64) -> Self {
        self.day_mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the single-day mutation rate.
    pub fn with_single_day_mutation_rate(mut self, rate: f64) -> Self {
        self.single_day_mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables rayon parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.population_size < 2 {
            return Err(PlanError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(PlanError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("day_mutation_rate", self.day_mutation_rate),
            ("single_day_mutation_rate", self.single_day_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}
