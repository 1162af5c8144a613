//! Tab-separated pathway file I/O
//!
//! Wire format: a header row naming the columns (at minimum `name`), then a
//! title row, then one row per step. Other columns, if present, are ignored
//! on load; writing always emits the single `name` column.
//!
//! Round-trip guarantee: `write_pathway_file(load_pathway_file(p))`
//! reproduces `p`'s step rows exactly (title formatting aside).

use crate::error::PathwayError;
use crate::model::Pathway;
use std::fs;
use std::path::Path;

/// Read a pathway `.tsv` and extract its id, title, and steps
///
/// The id is the file stem; the title (row 0 of the `name` column) is
/// normalised to lowercase with underscores for spaces.
pub fn load_pathway_file(tsv_path: &Path) -> Result<Pathway, PathwayError> {
    let content = fs::read_to_string(tsv_path)?;
    let mut lines = content.lines();

    let header = lines.next().ok_or_else(|| PathwayError::EmptyFile {
        path: tsv_path.to_path_buf(),
    })?;
    let name_col = header
        .split('\t')
        .position(|col| col.trim() == "name")
        .ok_or_else(|| PathwayError::MissingNameColumn {
            path: tsv_path.to_path_buf(),
        })?;

    let mut rows: Vec<String> = lines
        .map(|line| {
            line.split('\t')
                .nth(name_col)
                .unwrap_or_default()
                .to_string()
        })
        .collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    let mut rows = rows.into_iter();
    let title = rows.next().ok_or_else(|| PathwayError::NoSteps {
        path: tsv_path.to_path_buf(),
    })?;
    let steps: Vec<String> = rows.collect();

    if steps.is_empty() {
        return Err(PathwayError::NoSteps {
            path: tsv_path.to_path_buf(),
        });
    }

    let id = tsv_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(pathway_id = %id, steps = steps.len(), "loaded pathway");
    Pathway::new(id, title, steps)
}

/// Reconstruct and write the pathway TSV file
///
/// The title is written with underscores restored to spaces; steps are
/// written unchanged, one per row.
pub fn write_pathway_file(output_path: &Path, pathway: &Pathway) -> Result<(), PathwayError> {
    let mut out = String::from("name\n");
    out.push_str(&pathway.readable_title());
    out.push('\n');
    for step in &pathway.steps {
        out.push_str(step);
        out.push('\n');
    }
    fs::write(output_path, out)?;
    tracing::debug!(path = %output_path.display(), "wrote pathway file");
    Ok(())
}
