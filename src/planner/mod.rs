//! Genetic itinerary planner.
//!
//! Evolves a population of multi-day itineraries over a fixed POI set.
//! Fitness rewards visited POIs, satisfaction-weighted stay time and few
//! constraint violations; infeasible itineraries stay in the population
//! and are only penalized.
//!
//! # Key Types
//!
//! - [`TripProblem`]: day bounds, day codes, objective weights and POIs
//! - [`PlannerConfig`]: population size, iterations, TTL, operator rates
//! - [`PlannerRunner`]: executes the evolutionary loop
//! - [`PlanResult`]: best-ever itinerary with per-generation statistics
//!
//! # Submodules
//!
//! - [`constraints`]: ordered feasibility checks
//! - [`init`]: randomized greedy construction
//! - [`selection`]: roulette wheel parent selection
//! - [`crossover`]: day-boundary crossover with duplicate repair
//! - [`mutation`]: POI substitution
//! - [`fit`]: visit window fitting shared by repair and mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Vansteenwegen et al. (2011), *The orienteering problem: A survey*

mod config;
pub mod constraints;
pub mod crossover;
pub mod fit;
pub mod init;
pub mod mutation;
mod objective;
mod problem;
mod runner;
pub mod selection;

pub use config::PlannerConfig;
pub use constraints::{Constraint, ConstraintEvaluator, MIN_VISIT_MINUTES};
pub use objective::{objective, ObjectiveWeights};
pub use problem::TripProblem;
pub use runner::{GenerationStats, PlanResult, PlannerRunner};
