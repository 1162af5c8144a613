//! Corruption plan building
//!
//! A plan assigns (step index, error type, difficulty) requests to
//! distinct steps of the reference pathway under a seeded shuffle. Output
//! ordering is irrelevant; the applier re-sorts by index.

use crate::error::SamplerError;
use pathfault_bank::{Difficulty, ErrorType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// One requested corruption: which step, which kind, how subtle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// 0-based index into the *original* (uncorrupted) pathway
    pub step_index: usize,
    /// Corruption category to draw from the bank
    pub error_type: ErrorType,
    /// Difficulty to draw from the bank
    pub difficulty: Difficulty,
}

/// An ordered set of corruption requests with distinct step indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionPlan {
    requests: Vec<PlanRequest>,
}

impl CorruptionPlan {
    /// Build a plan from explicit requests
    ///
    /// [`build_plan`] is the normal constructor; this exists for tests and
    /// tooling that replay a recorded plan. Distinctness of step indices
    /// is the builder's concern, not enforced here.
    #[inline]
    #[must_use]
    pub fn from_requests(requests: Vec<PlanRequest>) -> Self {
        Self { requests }
    }

    /// Requests in build order
    #[inline]
    #[must_use]
    pub fn requests(&self) -> &[PlanRequest] {
        &self.requests
    }

    /// Requests sorted ascending by reference step index
    ///
    /// This is the order the applier consumes: insertions shift all
    /// subsequent working-copy indices, so processing must run low to
    /// high for offset tracking to stay correct.
    #[must_use]
    pub fn sorted_by_index(&self) -> Vec<PlanRequest> {
        let mut sorted = self.requests.clone();
        sorted.sort_by_key(|r| r.step_index);
        sorted
    }

    /// Number of requests
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the plan is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// How the plan builder derives its two random draws from the caller seed
///
/// The request shuffle and the step-index draw are distinct sampling
/// steps. `Shared` runs both from a single generator seeded with the
/// caller seed; `Split` preserves the original two-stream structure by
/// deriving an independent second generator (`seed + 1`) for the index
/// draw. Both modes are fully reproducible from the single caller seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngStreams {
    /// One generator drives both draws (default)
    #[default]
    Shared,
    /// A derived second generator drives the index draw
    Split,
}

/// Build a corruption plan for a pathway of `num_steps` steps
///
/// Creates `per_category` requests for each error type at the given
/// difficulty, shuffles them, and pairs each with a step index sampled
/// without replacement from `[0, num_steps)`.
///
/// # Errors
///
/// `OverBudget` when the total request count exceeds `num_steps`: step
/// indices are assigned 1:1, at most one corruption per step. This is a
/// deliberate simplifying policy, not a technical limit.
pub fn build_plan(
    error_types: &[ErrorType],
    difficulty: Difficulty,
    per_category: usize,
    num_steps: usize,
    seed: u64,
    streams: RngStreams,
) -> Result<CorruptionPlan, SamplerError> {
    let total = error_types.len() * per_category;
    if total > num_steps {
        return Err(SamplerError::OverBudget {
            requested: total,
            available: num_steps,
        });
    }

    let mut requests: Vec<(ErrorType, Difficulty)> = error_types
        .iter()
        .flat_map(|&etype| std::iter::repeat((etype, difficulty)).take(per_category))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    requests.shuffle(&mut rng);

    let chosen_steps: Vec<usize> = match streams {
        RngStreams::Shared => rand::seq::index::sample(&mut rng, num_steps, total).into_vec(),
        RngStreams::Split => {
            let mut index_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
            rand::seq::index::sample(&mut index_rng, num_steps, total).into_vec()
        }
    };

    let requests = chosen_steps
        .into_iter()
        .zip(requests)
        .map(|(step_index, (error_type, difficulty))| PlanRequest {
            step_index,
            error_type,
            difficulty,
        })
        .collect();

    tracing::debug!(total, num_steps, seed, ?streams, "built corruption plan");
    Ok(CorruptionPlan { requests })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const TYPES: [ErrorType; 2] = [ErrorType::WrongEntity, ErrorType::WrongDirection];

    #[test]
    fn plan_has_expected_size() {
        let plan = build_plan(&TYPES, Difficulty::One, 2, 10, 42, RngStreams::Shared).unwrap();
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn plan_indices_are_distinct_and_in_range() {
        let plan = build_plan(&TYPES, Difficulty::One, 3, 6, 7, RngStreams::Shared).unwrap();
        let indices: HashSet<usize> = plan.requests().iter().map(|r| r.step_index).collect();
        assert_eq!(indices.len(), plan.len());
        assert!(indices.iter().all(|&i| i < 6));
    }

    #[test]
    fn plan_carries_per_category_counts() {
        let plan = build_plan(&TYPES, Difficulty::Two, 2, 10, 0, RngStreams::Shared).unwrap();
        let wrong_entity = plan
            .requests()
            .iter()
            .filter(|r| r.error_type == ErrorType::WrongEntity)
            .count();
        assert_eq!(wrong_entity, 2);
        assert!(plan.requests().iter().all(|r| r.difficulty == Difficulty::Two));
    }

    #[test]
    fn over_budget_raises() {
        // 2 types * 3 per category = 6 > 5 steps
        let err = build_plan(&TYPES, Difficulty::One, 3, 5, 42, RngStreams::Shared).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::OverBudget {
                requested: 6,
                available: 5
            }
        ));
    }

    #[test]
    fn same_seed_same_plan() {
        for streams in [RngStreams::Shared, RngStreams::Split] {
            let a = build_plan(&TYPES, Difficulty::One, 2, 12, 99, streams).unwrap();
            let b = build_plan(&TYPES, Difficulty::One, 2, 12, 99, streams).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_differ() {
        // Not guaranteed for every pair of seeds, but stable for these.
        let a = build_plan(&TYPES, Difficulty::One, 3, 30, 1, RngStreams::Shared).unwrap();
        let b = build_plan(&TYPES, Difficulty::One, 3, 30, 2, RngStreams::Shared).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn stream_modes_are_independent_draws() {
        let shared = build_plan(&TYPES, Difficulty::One, 3, 30, 5, RngStreams::Shared).unwrap();
        let split = build_plan(&TYPES, Difficulty::One, 3, 30, 5, RngStreams::Split).unwrap();
        // Same request multiset either way; the pairing may differ.
        assert_eq!(shared.len(), split.len());
    }

    #[test]
    fn exact_budget_fills_every_step() {
        let plan = build_plan(&TYPES, Difficulty::One, 3, 6, 3, RngStreams::Shared).unwrap();
        let indices: HashSet<usize> = plan.requests().iter().map(|r| r.step_index).collect();
        assert_eq!(indices, (0..6).collect::<HashSet<_>>());
    }

    #[test]
    fn empty_error_types_yield_empty_plan() {
        let plan = build_plan(&[], Difficulty::One, 3, 5, 42, RngStreams::Shared).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn sorted_by_index_is_ascending() {
        let plan = build_plan(&TYPES, Difficulty::One, 3, 20, 11, RngStreams::Shared).unwrap();
        let sorted = plan.sorted_by_index();
        assert!(sorted.windows(2).all(|w| w[0].step_index <= w[1].step_index));
    }
}
