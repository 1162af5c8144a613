//! Generation-time bank validation
//!
//! Generation-time data is model output and expected to contain minor
//! transcription slips, so a mismatched replace statement is auto-corrected
//! (and logged) rather than failed. This is deliberately the opposite of
//! the applier's consumption-time policy, where the bank is assumed
//! validated and a mismatch is fatal.

use crate::error::BankError;
use crate::ingest::RawCorruption;
use crate::table::CorruptionBank;
use crate::vocab::{Difficulty, ErrorType, Operation};
use std::collections::{BTreeMap, HashSet};

/// Validate raw corruptions against the pathway, auto-fixing replace
/// mismatches
///
/// - An anchor index outside the pathway is a hard error.
/// - A replace whose `original_statement` does not match the true step text
///   (trimmed) has it overwritten with the true text; each correction is
///   logged.
/// - An insert carrying an `original_statement` is a hard error.
///
/// Returns the number of auto-corrections applied.
pub fn validate_and_fix(
    corruptions: &mut [RawCorruption],
    steps: &[String],
) -> Result<usize, BankError> {
    let mut corrections = 0;

    for corruption in corruptions.iter_mut() {
        let idx = corruption.anchor_step_index;
        if idx >= steps.len() {
            return Err(BankError::AnchorOutOfBounds {
                index: idx,
                len: steps.len(),
            });
        }

        match corruption.operation {
            Operation::Replace => {
                let expected = steps[idx].trim();
                let actual = corruption
                    .original_statement
                    .as_deref()
                    .unwrap_or_default()
                    .trim();
                if expected != actual {
                    tracing::warn!(
                        step = idx,
                        expected,
                        actual,
                        "replace statement mismatch; auto-correcting"
                    );
                    corruption.original_statement = Some(expected.to_string());
                    corrections += 1;
                }
            }
            Operation::InsertBefore | Operation::InsertAfter => {
                if let Some(statement) = &corruption.original_statement {
                    return Err(BankError::UnexpectedOriginalStatement {
                        operation: corruption.operation.to_string(),
                        statement: statement.clone(),
                    });
                }
            }
        }
    }

    Ok(corrections)
}

/// Ensure every step carries every observed (error type, difficulty)
/// combination
///
/// The expected set is the cross product of the error types and
/// difficulties present anywhere in the bank; any
/// (pathway, anchor step) group missing a combination is a hard error
/// naming the step and the missing pairs.
pub fn validate_combinations(bank: &CorruptionBank) -> Result<(), BankError> {
    missing_combination_report(bank)
        .into_iter()
        .next()
        .map_or(Ok(()), Err)
}

/// Report-only variant of [`validate_combinations`]: one finding per
/// incomplete step, in (pathway, anchor) order
#[must_use]
pub fn missing_combination_report(bank: &CorruptionBank) -> Vec<BankError> {
    let observed_types: HashSet<ErrorType> =
        bank.entries().iter().map(|e| e.error_type).collect();
    let observed_difficulties: HashSet<Difficulty> =
        bank.entries().iter().map(|e| e.difficulty).collect();

    let mut groups: BTreeMap<(String, usize), HashSet<(ErrorType, Difficulty)>> = BTreeMap::new();
    for entry in bank.entries() {
        groups
            .entry((entry.pathway_id.clone(), entry.anchor_step_index))
            .or_default()
            .insert((entry.error_type, entry.difficulty));
    }

    let mut findings = Vec::new();
    for ((pathway_id, anchor_step_index), present) in groups {
        let missing: Vec<(ErrorType, Difficulty)> = ErrorType::ALL
            .into_iter()
            .filter(|t| observed_types.contains(t))
            .flat_map(|t| {
                Difficulty::ALL
                    .into_iter()
                    .filter(|d| observed_difficulties.contains(d))
                    .map(move |d| (t, d))
            })
            .filter(|combo| !present.contains(combo))
            .collect();

        if !missing.is_empty() {
            findings.push(BankError::MissingCombinations {
                pathway_id,
                anchor_step_index,
                missing,
            });
        }
    }
    findings
}
