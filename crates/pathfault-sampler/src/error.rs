//! Error types for the sampling engine
//!
//! None of these are retried; all propagate to the top-level caller, which
//! aborts the run. Callers must not persist output from a failed call.

use pathfault_bank::{Difficulty, ErrorType};

/// Errors raised while budgeting, planning, or applying corruptions
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    /// Bad fraction, pathway length, or category count (caller error)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested corruptions exceed the number of available steps
    #[error("requested {requested} corruptions but pathway only has {available} steps")]
    OverBudget {
        /// Total corruptions requested
        requested: usize,
        /// Steps available for unique assignment
        available: usize,
    },

    /// No bank entry matches a plan request (bank/plan inconsistency)
    #[error("no corruption found for step={step}, type={error_type}, difficulty={difficulty}")]
    CorruptionNotFound {
        /// Reference step index
        step: usize,
        /// Requested error type
        error_type: ErrorType,
        /// Requested difficulty
        difficulty: Difficulty,
    },

    /// A replace target does not match the bank's original statement
    ///
    /// Fatal at consumption time: the bank is assumed stale or
    /// inconsistent, never auto-corrected at this layer.
    #[error("validation mismatch at reference step {step}: expected {expected:?}, got {actual:?}")]
    ValidationMismatch {
        /// Reference step index
        step: usize,
        /// Original statement recorded in the bank
        expected: String,
        /// Actual reference step text
        actual: String,
    },
}
