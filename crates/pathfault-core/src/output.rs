//! Run output persistence
//!
//! A run writes two files into a directory named after its parameters:
//! the corrupted pathway (same schema as the input) and a metadata table
//! of bank rows enriched with where each corruption landed.

use pathfault_bank::{entry_cells, BANK_COLUMNS};
use pathfault_bank::{Difficulty, ErrorType};
use pathfault_sampler::AppliedCorruption;
use std::fs;
use std::path::Path;

/// Columns appended to the bank columns in the metadata table
pub const METADATA_EXTRA_COLUMNS: [&str; 4] = [
    "corrupted_step_index",
    "original_ref_step_index",
    "original_ref_step_text",
    "sampling_seed",
];

/// Directory name encoding the run parameters
///
/// Example: `wrong_entity_wrong_direction_difficulty_1_fraction_0.5`.
#[must_use]
pub fn run_folder_name(error_types: &[ErrorType], difficulty: Difficulty, fraction: f64) -> String {
    let errors = error_types
        .iter()
        .map(ErrorType::as_str)
        .collect::<Vec<_>>()
        .join("_");
    format!("{errors}_difficulty_{difficulty}_fraction_{fraction}")
}

/// Write the applied-corruption metadata table
///
/// One row per applied corruption: all original bank columns (canonical
/// plus pass-through extras) followed by [`METADATA_EXTRA_COLUMNS`].
pub fn write_metadata_file(
    path: &Path,
    applied: &[AppliedCorruption],
    extra_columns: &[String],
) -> Result<(), std::io::Error> {
    let mut header: Vec<&str> = BANK_COLUMNS.to_vec();
    header.extend(extra_columns.iter().map(String::as_str));
    header.extend(METADATA_EXTRA_COLUMNS);

    let mut out = header.join("\t");
    out.push('\n');
    for row in applied {
        let mut cells = entry_cells(&row.entry, extra_columns);
        cells.push(row.corrupted_step_index.to_string());
        cells.push(
            row.original_ref_step_index
                .map(|i| i.to_string())
                .unwrap_or_default(),
        );
        cells.push(pathfault_bank::sanitize_cell(
            row.original_ref_step_text.as_deref().unwrap_or_default(),
        ));
        cells.push(row.sampling_seed.to_string());
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    fs::write(path, out)
}
