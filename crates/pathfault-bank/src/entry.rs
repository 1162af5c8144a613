//! A single corruption bank entry

use crate::vocab::{Difficulty, ErrorType, Operation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One candidate corruption, keyed by
/// (pathway id, anchor step index, error type, difficulty)
///
/// Provenance fields (`corruption_id`, `created_at`, `model_name`, `seed`,
/// `pathway_title`, `pathway_step_count`) and any free-form `extra` columns
/// are carried through the table unchanged; the engine never interprets
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankEntry {
    /// Unique id stamped at generation time
    pub corruption_id: String,
    /// Generation timestamp (UTC, RFC 3339)
    pub created_at: String,
    /// Model that produced the corruption
    pub model_name: String,
    /// Generation seed
    pub seed: u64,
    /// Pathway this corruption targets
    pub pathway_id: String,
    /// Pathway title at generation time
    pub pathway_title: String,
    /// Pathway length at generation time
    pub pathway_step_count: usize,
    /// 0-based position in the original pathway this corruption targets
    pub anchor_step_index: usize,
    /// Edit performed on the working pathway
    pub operation: Operation,
    /// Corruption category
    pub error_type: ErrorType,
    /// Intended subtlety
    pub difficulty: Difficulty,
    /// Exact text of the targeted step; present only for replace
    pub original_statement: Option<String>,
    /// The corrupted statement to write
    pub corrupted_statement: String,
    /// Free-form rationale from the generator
    pub category_rationale: String,
    /// Unrecognised columns, preserved in file order
    #[serde(default)]
    pub extra: IndexMap<String, String>,
}

impl BankEntry {
    /// Create an entry with empty provenance; used by tests and ingestion
    #[must_use]
    pub fn new(
        pathway_id: impl Into<String>,
        anchor_step_index: usize,
        error_type: ErrorType,
        difficulty: Difficulty,
        operation: Operation,
        corrupted_statement: impl Into<String>,
    ) -> Self {
        Self {
            corruption_id: String::new(),
            created_at: String::new(),
            model_name: String::new(),
            seed: 0,
            pathway_id: pathway_id.into(),
            pathway_title: String::new(),
            pathway_step_count: 0,
            anchor_step_index,
            operation,
            error_type,
            difficulty,
            original_statement: None,
            corrupted_statement: corrupted_statement.into(),
            category_rationale: String::new(),
            extra: IndexMap::new(),
        }
    }

    /// With the original statement (replace entries)
    #[inline]
    #[must_use]
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original_statement = Some(original.into());
        self
    }

    /// With generation provenance
    #[inline]
    #[must_use]
    pub fn with_provenance(
        mut self,
        corruption_id: impl Into<String>,
        created_at: impl Into<String>,
        model_name: impl Into<String>,
        seed: u64,
    ) -> Self {
        self.corruption_id = corruption_id.into();
        self.created_at = created_at.into();
        self.model_name = model_name.into();
        self.seed = seed;
        self
    }
}
