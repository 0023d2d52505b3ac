//! Multi-day itinerary optimization over points of interest.
//!
//! Given POIs with coordinates, weekly opening hours and a satisfaction
//! score, plus a list of trip days with daily begin/end bounds, the planner
//! evolves itineraries with a genetic algorithm and returns the best one
//! found:
//!
//! - **Construction**: randomized greedy filling of each day
//! - **Selection**: fitness-proportionate roulette over shifted weights
//! - **Crossover**: day-boundary splice with duplicate-POI repair
//! - **Mutation**: substitution of a visit by an unused POI
//! - **Survival**: age-based eviction, then truncation to the fittest
//!
//! Feasibility (day bounds, travel gaps, opening hours, minimum stay,
//! unique POIs) is a soft penalty in the objective, never a hard filter.
//!
//! # Modules
//!
//! - [`time`]: clock times in minutes past midnight, day codes
//! - [`model`]: POIs, visits, days, itineraries, population members
//! - [`travel`]: haversine distance and travel minutes
//! - [`planner`]: problem definition, operators and the GA runner
//! - [`api`]: string-based input records and itinerary reports
//! - [`error`]: validation and operator errors
//!
//! Logging goes through `tracing`; install a subscriber to see it.

pub mod api;
pub mod error;
pub mod model;
pub mod planner;
pub mod time;
pub mod travel;
