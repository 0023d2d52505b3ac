//! Generation loop.
//!
//! [`PlannerRunner`] drives a run from start to finish:
//! initial construction → scoring → `iterations` generations → best-ever.
//!
//! Each stage that builds or changes solutions (initial construction,
//! crossover per parent pair, single-day mutation per solution) fans out
//! to independent tasks and is collected before scoring starts. Every task
//! gets its own RNG seeded from the run RNG before the stage begins, so a
//! seeded run gives the same result with or without parallelism.

use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::config::PlannerConfig;
use super::constraints::ConstraintEvaluator;
use super::crossover::crossover;
use super::init::random_itinerary;
use super::mutation::substitute_poi;
use super::objective::objective;
use super::problem::TripProblem;
use super::selection::{pair_count, select_pairs};
use crate::api::ItineraryReport;
use crate::error::{OperatorError, PlanError};
use crate::model::{Day, Itinerary, Population, Solution};

/// Snapshot of one generation, taken after scoring and truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Top fitness in the population, if any member is left.
    pub best: Option<f64>,
    /// Bottom fitness in the population, if any member is left.
    pub worst: Option<f64>,
    /// Best fitness seen so far in the run.
    pub best_ever: f64,
    /// Members after truncation.
    pub population_size: usize,
    /// Solutions created this generation.
    pub births: usize,
    /// Solutions evicted for exceeding the time-to-live.
    pub evicted: usize,
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// The best itinerary seen during the whole run.
    pub best: Itinerary,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Failed constraint count of `best`; zero means fully feasible.
    pub best_failures: usize,

    /// Number of generations executed.
    pub generations: usize,

    /// Best-ever fitness at the end of each generation.
    pub fitness_history: Vec<f64>,

    /// Per-generation statistics.
    pub stats: Vec<GenerationStats>,
}

impl PlanResult {
    /// Renders the best itinerary in its external representation.
    pub fn report(&self, problem: &TripProblem) -> ItineraryReport {
        ItineraryReport::new(&self.best, problem.pois())
    }

    /// Writes `iteration,best_value` rows, one per generation, numbered
    /// from 1.
    pub fn write_history_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "iteration,best_value")?;
        for (i, value) in self.fitness_history.iter().enumerate() {
            writeln!(out, "{},{:.10}", i + 1, value)?;
        }
        out.flush()
    }
}

/// Executes the itinerary GA.
///
/// # Usage
///
/// ```
/// use u_itinerary::model::{OpeningHours, Poi};
/// use u_itinerary::planner::{PlannerConfig, PlannerRunner, TripProblem};
/// use u_itinerary::time::{ClockTime, Weekday};
///
/// let nine = ClockTime::from_hm(9, 0).unwrap();
/// let six = ClockTime::from_hm(18, 0).unwrap();
/// let hours = OpeningHours::new(nine, six);
/// let problem = TripProblem::new(nine, six, vec![Weekday::Sat, Weekday::Sun]).with_pois([
///     Poi::new("Castle", 50.054, 19.935, 0.9).open_every_day(hours),
///     Poi::new("Market", 50.061, 19.937, 0.7).open_every_day(hours),
///     Poi::new("Museum", 50.060, 19.923, 0.6).open_every_day(hours),
/// ]);
/// let config = PlannerConfig::default()
///     .with_population_size(20)
///     .with_iterations(10)
///     .with_seed(1);
///
/// let result = PlannerRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best.days.len(), 2);
/// assert_eq!(result.fitness_history.len(), 10);
/// ```
pub struct PlannerRunner;

impl PlannerRunner {
    /// Runs the optimization.
    ///
    /// Fails fast with [`PlanError`] on an invalid problem or configuration;
    /// otherwise always returns a best-effort itinerary, feasible or not.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            population = config.population_size,
            iterations = config.iterations,
            days = problem.days().len(),
            pois = problem.pois().len(),
        )
    )]
    pub fn run(problem: &TripProblem, config: &PlannerConfig) -> Result<PlanResult, PlanError> {
        problem.validate()?;
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let evaluator = ConstraintEvaluator::default();

        // Init
        let initial = build_solutions(problem, config.population_size, config.parallel, &mut rng);
        let mut population = Population::new(initial, config.population_size);
        score_population(&mut population, problem, &evaluator, config.parallel);
        population.sort_by_fitness();

        let mut best = match population.top() {
            Some(top) => top.clone(),
            None => skeleton(problem, &evaluator),
        };
        let mut fitness_history = Vec::with_capacity(config.iterations);
        let mut stats = Vec::with_capacity(config.iterations);

        for generation in 0..config.iterations {
            let mut births = 0;

            if problem.is_multi_day() {
                if population.is_empty() {
                    warn!(generation, "population died out; reseeding");
                    let fresh = build_solutions(
                        problem,
                        population.target_size(),
                        config.parallel,
                        &mut rng,
                    );
                    population.extend(fresh);
                    score_population(&mut population, problem, &evaluator, config.parallel);
                }
                let pairs = pair_count(population.target_size(), &mut rng);
                let parents = select_pairs(population.members(), pairs, &mut rng);
                let children = breed(population.members(), &parents, problem, config, &mut rng);
                births += children.len();
                population.extend(children);
            } else {
                let members = population.take();
                let mutated = mutate_all(members, problem, config, &mut rng);
                population.extend(mutated);
            }

            let evicted = population.age_and_evict(config.solution_ttl);

            if !problem.is_multi_day() && population.shortfall() > 0 {
                let fresh =
                    build_solutions(problem, population.shortfall(), config.parallel, &mut rng);
                births += fresh.len();
                population.extend(fresh);
            }

            score_population(&mut population, problem, &evaluator, config.parallel);
            population.sort_by_fitness();
            population.truncate_to_target();

            if let Some(top) = population.top() {
                if top.fitness > best.fitness {
                    best = top.clone();
                }
            }
            fitness_history.push(best.fitness);

            let snapshot = GenerationStats {
                generation,
                best: population.top().map(|s| s.fitness),
                worst: population.bottom().map(|s| s.fitness),
                best_ever: best.fitness,
                population_size: population.len(),
                births,
                evicted,
            };
            debug!(
                generation,
                best = ?snapshot.best,
                worst = ?snapshot.worst,
                best_ever = snapshot.best_ever,
                size = snapshot.population_size,
                births,
                evicted,
                "generation done"
            );
            stats.push(snapshot);
        }

        info!(
            best_fitness = best.fitness,
            failures = best.failures,
            visits = best.itinerary.visit_count(),
            "run finished"
        );

        Ok(PlanResult {
            best_fitness: best.fitness,
            best_failures: best.failures,
            best: best.itinerary,
            generations: config.iterations,
            fitness_history,
            stats,
        })
    }
}

/// Builds `count` fresh solutions, one task each.
fn build_solutions(
    problem: &TripProblem,
    count: usize,
    parallel: bool,
    rng: &mut StdRng,
) -> Vec<Solution> {
    let seeds: Vec<u64> = (0..count).map(|_| rng.random()).collect();
    run_stage("construct", seeds, parallel, |seed| {
        let mut task_rng = StdRng::seed_from_u64(seed);
        Ok(Solution::new(random_itinerary(problem, &mut task_rng)))
    })
}

/// Produces two children per parent pair, one task per pair.
fn breed(
    members: &[Solution],
    parents: &[(usize, usize)],
    problem: &TripProblem,
    config: &PlannerConfig,
    rng: &mut StdRng,
) -> Vec<Solution> {
    let jobs: Vec<((usize, usize), u64)> = parents.iter().map(|&p| (p, rng.random())).collect();
    let pairs = run_stage("crossover", jobs, config.parallel, |((a, b), seed)| {
        let mut task_rng = StdRng::seed_from_u64(seed);
        let (mut first, mut second) = crossover(
            &members[a].itinerary,
            &members[b].itinerary,
            problem,
            &mut task_rng,
        )?;
        for child in [&mut first, &mut second] {
            if task_rng.random_bool(config.mutation_rate) {
                substitute_poi(child, problem, config.day_mutation_rate, &mut task_rng);
            }
        }
        Ok([Solution::new(first), Solution::new(second)])
    });
    pairs.into_iter().flatten().collect()
}

/// Mutates every solution in place with the single-day rate, one task each.
fn mutate_all(
    members: Vec<Solution>,
    problem: &TripProblem,
    config: &PlannerConfig,
    rng: &mut StdRng,
) -> Vec<Solution> {
    let jobs: Vec<(Solution, u64)> = members.into_iter().map(|s| (s, rng.random())).collect();
    run_stage("mutate", jobs, config.parallel, |(mut solution, seed)| {
        let mut task_rng = StdRng::seed_from_u64(seed);
        if task_rng.random_bool(config.single_day_mutation_rate) {
            substitute_poi(
                &mut solution.itinerary,
                problem,
                config.day_mutation_rate,
                &mut task_rng,
            );
        }
        Ok(solution)
    })
}

/// Re-evaluates constraints and fitness of every member.
fn score_population(
    population: &mut Population,
    problem: &TripProblem,
    evaluator: &ConstraintEvaluator,
    parallel: bool,
) {
    let score = |s: &mut Solution| {
        s.failures = evaluator.failures(&s.itinerary, problem.pois());
        s.fitness = objective(&s.itinerary, problem.pois(), s.failures, problem.weights());
    };
    if parallel {
        population.members_mut().par_iter_mut().for_each(score);
    } else {
        population.members_mut().iter_mut().for_each(score);
    }
}

/// A scored itinerary with every day empty.
fn skeleton(problem: &TripProblem, evaluator: &ConstraintEvaluator) -> Solution {
    let mut itinerary = Itinerary::new(problem.day_begin(), problem.day_end());
    itinerary.days = problem
        .days()
        .iter()
        .enumerate()
        .map(|(i, &d)| Day::new(i, d))
        .collect();
    let mut solution = Solution::new(itinerary);
    solution.failures = evaluator.failures(&solution.itinerary, problem.pois());
    solution.fitness = objective(
        &solution.itinerary,
        problem.pois(),
        solution.failures,
        problem.weights(),
    );
    solution
}

/// Runs one task per input and collects the successful outputs in input
/// order. A task that errors or panics yields nothing and is logged; its
/// siblings are unaffected.
fn run_stage<I, T, F>(stage: &'static str, inputs: Vec<I>, parallel: bool, task: F) -> Vec<T>
where
    I: Send,
    T: Send,
    F: Fn(I) -> Result<T, OperatorError> + Sync,
{
    let guarded = |input: I| -> Option<T> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(input)))
            .unwrap_or_else(|payload| Err(OperatorError::Panicked(panic_message(&*payload))));
        match outcome {
            Ok(out) => Some(out),
            Err(err) => {
                warn!(stage, error = %err, "task failed, dropping its output");
                None
            }
        }
    };

    if parallel {
        inputs.into_par_iter().filter_map(guarded).collect()
    } else {
        inputs.into_iter().filter_map(guarded).collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
