//! Corruption application
//!
//! Walks a plan in ascending reference-index order, applying
//! replace/insert edits to a working copy of the pathway. Insertions shift
//! every subsequent working-copy index, so the applier tracks a running
//! insertion offset; replaces are validated against the *reference* copy,
//! not the working copy.

use crate::error::SamplerError;
use crate::plan::{build_plan, CorruptionPlan, RngStreams};
use pathfault_bank::{BankEntry, BankView, Difficulty, ErrorType, Operation};
use serde::Serialize;

/// One successfully applied corruption: the bank entry plus where it
/// landed in the corrupted pathway
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedCorruption {
    /// The bank entry that was applied, all columns intact
    pub entry: BankEntry,
    /// Index of the corrupted statement in the *corrupted* pathway
    pub corrupted_step_index: usize,
    /// For replace only: the reference step index that was overwritten
    pub original_ref_step_index: Option<usize>,
    /// For replace only: the reference step text that was overwritten
    pub original_ref_step_text: Option<String>,
    /// Seed the plan was sampled with
    pub sampling_seed: u64,
}

/// Apply a corruption plan to the reference pathway
///
/// Returns the corrupted step sequence and one metadata row per applied
/// corruption, sorted by final (post-insertion) index.
///
/// There is no partial-success mode: on any error the working copy is
/// discarded with the call; callers must not persist output from a failed
/// call.
///
/// # Errors
///
/// - `CorruptionNotFound` when no bank entry matches a plan request.
/// - `ValidationMismatch` when a replace target (trimmed) differs from the
///   bank's original statement. The bank is assumed stale; no
///   auto-correction happens at this layer.
pub fn apply_plan(
    reference_steps: &[String],
    bank: &BankView<'_>,
    plan: &CorruptionPlan,
    seed: u64,
) -> Result<(Vec<String>, Vec<AppliedCorruption>), SamplerError> {
    let mut modified: Vec<String> = reference_steps.to_vec();
    let mut applied: Vec<AppliedCorruption> = Vec::with_capacity(plan.len());
    let mut insertion_offset = 0usize;

    for request in plan.sorted_by_index() {
        let ref_idx = request.step_index;
        if ref_idx >= reference_steps.len() {
            return Err(SamplerError::InvalidParameter(format!(
                "plan step index {ref_idx} out of range for pathway of length {}",
                reference_steps.len()
            )));
        }
        let entry = bank
            .find(ref_idx, request.error_type, request.difficulty)
            .ok_or(SamplerError::CorruptionNotFound {
                step: ref_idx,
                error_type: request.error_type,
                difficulty: request.difficulty,
            })?;

        let mod_idx = ref_idx + insertion_offset;
        let final_idx = match entry.operation {
            Operation::Replace => {
                let expected = entry.original_statement.as_deref().unwrap_or_default();
                let actual = &reference_steps[ref_idx];
                if actual.trim() != expected.trim() {
                    return Err(SamplerError::ValidationMismatch {
                        step: ref_idx,
                        expected: expected.to_string(),
                        actual: actual.clone(),
                    });
                }
                tracing::debug!(
                    ref_idx,
                    mod_idx,
                    from = %expected,
                    to = %entry.corrupted_statement,
                    "replace"
                );
                modified[mod_idx] = entry.corrupted_statement.clone();
                mod_idx
            }
            Operation::InsertBefore => {
                tracing::debug!(ref_idx, mod_idx, statement = %entry.corrupted_statement, "insert before");
                modified.insert(mod_idx, entry.corrupted_statement.clone());
                insertion_offset += 1;
                mod_idx
            }
            Operation::InsertAfter => {
                tracing::debug!(ref_idx, mod_idx = mod_idx + 1, statement = %entry.corrupted_statement, "insert after");
                modified.insert(mod_idx + 1, entry.corrupted_statement.clone());
                insertion_offset += 1;
                mod_idx + 1
            }
        };

        let (orig_idx, orig_text) = match entry.operation {
            Operation::Replace => (Some(ref_idx), Some(reference_steps[ref_idx].clone())),
            Operation::InsertBefore | Operation::InsertAfter => (None, None),
        };

        applied.push(AppliedCorruption {
            entry: entry.clone(),
            corrupted_step_index: final_idx,
            original_ref_step_index: orig_idx,
            original_ref_step_text: orig_text,
            sampling_seed: seed,
        });
    }

    applied.sort_by_key(|row| row.corrupted_step_index);
    Ok((modified, applied))
}

/// Build and apply a plan in one call
///
/// Convenience wrapper over [`build_plan`] + [`apply_plan`] for callers
/// that hold the budget already.
pub fn corrupt_pathway(
    reference_steps: &[String],
    bank: &BankView<'_>,
    error_types: &[ErrorType],
    difficulty: Difficulty,
    per_category: usize,
    seed: u64,
    streams: RngStreams,
) -> Result<(Vec<String>, Vec<AppliedCorruption>), SamplerError> {
    let plan = build_plan(
        error_types,
        difficulty,
        per_category,
        reference_steps.len(),
        seed,
        streams,
    )?;
    apply_plan(reference_steps, bank, &plan, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanRequest;
    use pathfault_bank::CorruptionBank;
    use pretty_assertions::assert_eq;

    fn reference() -> Vec<String> {
        vec![
            "A activates B".to_string(),
            "B binds C".to_string(),
            "C degrades D".to_string(),
        ]
    }

    fn plan_of(requests: Vec<PlanRequest>) -> CorruptionPlan {
        CorruptionPlan::from_requests(requests)
    }

    fn replace_entry() -> BankEntry {
        BankEntry::new(
            "p53",
            1,
            ErrorType::WrongEntity,
            Difficulty::One,
            Operation::Replace,
            "B binds X",
        )
        .with_original("B binds C")
    }

    fn insert_after_entry() -> BankEntry {
        BankEntry::new(
            "p53",
            0,
            ErrorType::AddUnsupportedStep,
            Difficulty::One,
            Operation::InsertAfter,
            "A also binds Z",
        )
    }

    #[test]
    fn replace_end_to_end() {
        let bank = CorruptionBank::new(vec![replace_entry()]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 1,
            error_type: ErrorType::WrongEntity,
            difficulty: Difficulty::One,
        }]);

        let (modified, applied) = apply_plan(&reference(), &view, &plan, 42).unwrap();

        assert_eq!(
            modified,
            vec![
                "A activates B".to_string(),
                "B binds X".to_string(),
                "C degrades D".to_string(),
            ]
        );
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].corrupted_step_index, 1);
        assert_eq!(applied[0].original_ref_step_index, Some(1));
        assert_eq!(applied[0].original_ref_step_text.as_deref(), Some("B binds C"));
        assert_eq!(applied[0].sampling_seed, 42);
    }

    #[test]
    fn insert_after_end_to_end() {
        let bank = CorruptionBank::new(vec![insert_after_entry()]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 0,
            error_type: ErrorType::AddUnsupportedStep,
            difficulty: Difficulty::One,
        }]);

        let (modified, applied) = apply_plan(&reference(), &view, &plan, 7).unwrap();

        assert_eq!(
            modified,
            vec![
                "A activates B".to_string(),
                "A also binds Z".to_string(),
                "B binds C".to_string(),
                "C degrades D".to_string(),
            ]
        );
        assert_eq!(applied[0].corrupted_step_index, 1);
        assert_eq!(applied[0].original_ref_step_index, None);
        assert_eq!(applied[0].original_ref_step_text, None);
    }

    #[test]
    fn insert_before_lands_at_anchor() {
        let mut entry = insert_after_entry();
        entry.operation = Operation::InsertBefore;
        entry.anchor_step_index = 2;
        let bank = CorruptionBank::new(vec![entry]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 2,
            error_type: ErrorType::AddUnsupportedStep,
            difficulty: Difficulty::One,
        }]);

        let (modified, applied) = apply_plan(&reference(), &view, &plan, 7).unwrap();
        assert_eq!(modified[2], "A also binds Z");
        assert_eq!(modified.len(), 4);
        assert_eq!(applied[0].corrupted_step_index, 2);
    }

    #[test]
    fn offset_tracking_across_insert_then_replace() {
        // Insert after step 0, then replace step 1: the replace must land
        // at working index 2.
        let bank = CorruptionBank::new(vec![insert_after_entry(), replace_entry()]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![
            PlanRequest {
                step_index: 1,
                error_type: ErrorType::WrongEntity,
                difficulty: Difficulty::One,
            },
            PlanRequest {
                step_index: 0,
                error_type: ErrorType::AddUnsupportedStep,
                difficulty: Difficulty::One,
            },
        ]);

        let (modified, applied) = apply_plan(&reference(), &view, &plan, 3).unwrap();

        assert_eq!(
            modified,
            vec![
                "A activates B".to_string(),
                "A also binds Z".to_string(),
                "B binds X".to_string(),
                "C degrades D".to_string(),
            ]
        );
        // Rows sorted by final index: insert at 1, replace at 2.
        assert_eq!(applied[0].corrupted_step_index, 1);
        assert_eq!(applied[1].corrupted_step_index, 2);
        assert_eq!(applied[1].original_ref_step_index, Some(1));
    }

    #[test]
    fn replace_only_plans_preserve_length() {
        let bank = CorruptionBank::new(vec![replace_entry()]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 1,
            error_type: ErrorType::WrongEntity,
            difficulty: Difficulty::One,
        }]);

        let (modified, _) = apply_plan(&reference(), &view, &plan, 1).unwrap();
        assert_eq!(modified.len(), reference().len());
    }

    #[test]
    fn missing_bank_entry_is_fatal() {
        let bank = CorruptionBank::new(vec![replace_entry()]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 2,
            error_type: ErrorType::WrongDirection,
            difficulty: Difficulty::Two,
        }]);

        let err = apply_plan(&reference(), &view, &plan, 1).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::CorruptionNotFound {
                step: 2,
                error_type: ErrorType::WrongDirection,
                difficulty: Difficulty::Two,
            }
        ));
    }

    #[test]
    fn stale_bank_mismatch_is_fatal() {
        let entry = replace_entry().with_original("B binds D");
        let bank = CorruptionBank::new(vec![entry]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 1,
            error_type: ErrorType::WrongEntity,
            difficulty: Difficulty::One,
        }]);

        let err = apply_plan(&reference(), &view, &plan, 1).unwrap_err();
        match err {
            SamplerError::ValidationMismatch { step, expected, actual } => {
                assert_eq!(step, 1);
                assert_eq!(expected, "B binds D");
                assert_eq!(actual, "B binds C");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn replace_validates_with_whitespace_tolerance() {
        let entry = replace_entry().with_original("  B binds C ");
        let bank = CorruptionBank::new(vec![entry]);
        let view = bank.for_pathway("p53");
        let plan = plan_of(vec![PlanRequest {
            step_index: 1,
            error_type: ErrorType::WrongEntity,
            difficulty: Difficulty::One,
        }]);

        let (modified, _) = apply_plan(&reference(), &view, &plan, 1).unwrap();
        assert_eq!(modified[1], "B binds X");
    }

    #[test]
    fn empty_plan_is_identity() {
        let bank = CorruptionBank::new(vec![]);
        let view = bank.for_pathway("p53");
        let (modified, applied) =
            apply_plan(&reference(), &view, &CorruptionPlan::default(), 1).unwrap();
        assert_eq!(modified, reference());
        assert!(applied.is_empty());
    }
}
