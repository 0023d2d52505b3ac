//! Error types.

use thiserror::Error;

use crate::time::ClockTime;

/// Invalid run input, reported before any generation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("no POIs loaded")]
    NoPois,
    #[error("day list is empty")]
    NoDays,
    #[error("day end {end} must be after day begin {begin} (shift it past midnight if it wraps)")]
    DayBoundsInverted { begin: ClockTime, end: ClockTime },
    #[error("POI {name:?} has non-finite coordinates")]
    InvalidCoordinates { name: String },
    #[error("POI {name:?} satisfaction {value} must lie in [0, 1]")]
    InvalidSatisfaction { name: String, value: f64 },
    #[error("objective weight {name} must be finite, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("invalid planner config: {0}")]
    InvalidConfig(String),
}

/// Failure of a single offspring-production task.
///
/// Such failures are local: the task yields no child and its siblings
/// carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    #[error("parents have different day counts ({left} vs {right})")]
    DayCountMismatch { left: usize, right: usize },
    #[error("crossover needs at least two days, got {0}")]
    TooFewDays(usize),
    #[error("task panicked: {0}")]
    Panicked(String),
}
