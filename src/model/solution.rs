//! Population members and the population itself.

use super::itinerary::Itinerary;

/// An itinerary plus GA bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub itinerary: Itinerary,
    /// Generations survived since creation.
    pub age: usize,
    /// Objective value from the latest scoring pass.
    pub fitness: f64,
    /// Failed constraint count from the latest scoring pass.
    pub failures: usize,
}

impl Solution {
    /// A newborn, not yet scored solution.
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            itinerary,
            age: 0,
            fitness: f64::NEG_INFINITY,
            failures: 0,
        }
    }
}

/// Bounded collection of solutions.
///
/// Unordered except right after [`Population::sort_by_fitness`].
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Solution>,
    target_size: usize,
}

impl Population {
    pub fn new(members: Vec<Solution>, target_size: usize) -> Self {
        Self {
            members,
            target_size,
        }
    }

    /// The size the population is truncated back to each generation.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Solution] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Solution] {
        &mut self.members
    }

    /// Number of members missing to reach the target size.
    pub fn shortfall(&self) -> usize {
        self.target_size.saturating_sub(self.members.len())
    }

    /// Moves all members out, leaving the population empty.
    pub fn take(&mut self) -> Vec<Solution> {
        std::mem::take(&mut self.members)
    }

    pub fn extend(&mut self, newcomers: impl IntoIterator<Item = Solution>) {
        self.members.extend(newcomers);
    }

    /// Evicts members whose age already exceeds `ttl`, then ages the
    /// survivors by one generation. Returns the number evicted.
    pub fn age_and_evict(&mut self, ttl: usize) -> usize {
        let before = self.members.len();
        self.members.retain(|s| s.age <= ttl);
        for s in &mut self.members {
            s.age += 1;
        }
        before - self.members.len()
    }

    /// Sorts members by fitness, best first.
    pub fn sort_by_fitness(&mut self) {
        self.members.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    /// Drops members beyond the target size. Call after sorting so the
    /// weakest are dropped.
    pub fn truncate_to_target(&mut self) {
        self.members.truncate(self.target_size);
    }

    /// First member; the fittest after sorting.
    pub fn top(&self) -> Option<&Solution> {
        self.members.first()
    }

    /// Last member; the weakest after sorting.
    pub fn bottom(&self) -> Option<&Solution> {
        self.members.last()
    }
}
