//! Corruption bank: model, table I/O, and generation-time validation
//!
//! A corruption bank is a precomputed table of candidate textual errors,
//! keyed by (pathway id, anchor step index, error type, difficulty). This
//! crate provides:
//! - The closed corruption vocabulary ([`ErrorType`], [`Difficulty`],
//!   [`Operation`])
//! - [`BankEntry`] and the [`CorruptionBank`] table with TSV I/O and
//!   unique-key lookup
//! - Ingestion of raw model output through an ordered JSON repair chain
//! - Generation-time validation (auto-correcting replace mismatches,
//!   combination completeness)
//!
//! Consumption-time validation is stricter and lives with the applier: a
//! replace mismatch there is fatal, never auto-corrected.

mod entry;
mod error;
mod ingest;
mod table;
mod validate;
mod vocab;

pub use entry::BankEntry;
pub use error::BankError;
pub use ingest::{
    assemble_entries, default_strategies, parse_json_lenient, parse_model_output,
    strip_code_fences, EscapeControlChars, RawCorruption, RawCorruptionList, RepairStrategy,
    StrictJson, StripTrailingCommas,
};
pub use table::{entry_cells, sanitize_cell, BankView, CorruptionBank, BANK_COLUMNS};
pub use validate::{missing_combination_report, validate_and_fix, validate_combinations};
pub use vocab::{Difficulty, ErrorType, Operation};
