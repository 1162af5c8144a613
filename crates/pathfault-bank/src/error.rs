//! Error types for bank loading, ingestion, and validation

use crate::vocab::{Difficulty, ErrorType};
use std::path::PathBuf;

/// Errors raised by bank table I/O, model-output ingestion, and validation
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// An error-type tag outside the closed vocabulary
    #[error("unknown error type: {0}")]
    UnknownErrorType(String),

    /// An operation tag outside the closed vocabulary
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A difficulty outside the supported levels
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// A required column is absent from the bank file header
    #[error("missing column '{column}' in {path}")]
    MissingColumn {
        /// Column name
        column: String,
        /// Offending file
        path: PathBuf,
    },

    /// A cell failed to parse as its typed column
    #[error("invalid value {value:?} in column '{column}'")]
    InvalidField {
        /// Column name
        column: String,
        /// Raw cell value
        value: String,
    },

    /// Every repair strategy failed to parse the raw model output
    #[error("failed to parse model output after {} repair strategies", failures.len())]
    UnparseableModelOutput {
        /// (strategy name, failure message) per attempted strategy
        failures: Vec<(&'static str, String)>,
    },

    /// Parsed JSON did not match the corruption schema
    #[error("model output does not match corruption schema: {0}")]
    SchemaMismatch(#[from] serde_json::Error),

    /// An anchor index outside the pathway
    #[error("anchor_step_index {index} out of bounds (pathway has {len} steps)")]
    AnchorOutOfBounds {
        /// Offending index
        index: usize,
        /// Pathway length
        len: usize,
    },

    /// An insert operation carried an original statement
    #[error("original_statement must be absent for operation '{operation}' (got {statement:?})")]
    UnexpectedOriginalStatement {
        /// The insert operation
        operation: String,
        /// The statement that should not be there
        statement: String,
    },

    /// A step is missing required (error type, difficulty) combinations
    #[error(
        "step (pathway_id={pathway_id}, anchor_step_index={anchor_step_index}) \
         is missing corruption combinations: {missing:?}"
    )]
    MissingCombinations {
        /// Pathway the step belongs to
        pathway_id: String,
        /// Anchor step index within the pathway
        anchor_step_index: usize,
        /// Missing (error type, difficulty) pairs
        missing: Vec<(ErrorType, Difficulty)>,
    },

    /// Underlying I/O failure
    #[error("bank file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
