//! The end-to-end corruption run

use crate::config::RunConfig;
use crate::error::CoreError;
use crate::output::{run_folder_name, write_metadata_file};
use pathfault_bank::CorruptionBank;
use pathfault_pathway::{load_pathway_file, write_pathway_file, Pathway};
use pathfault_sampler::{apply_plan, build_plan, errors_per_category, AppliedCorruption};
use std::fs;
use std::path::PathBuf;

/// What a successful run produced and where it was written
#[derive(Debug)]
pub struct RunOutput {
    /// The corrupted pathway
    pub corrupted: Pathway,
    /// Metadata rows for every applied corruption, sorted by final index
    pub applied: Vec<AppliedCorruption>,
    /// Path of the corrupted pathway file
    pub pathway_file: PathBuf,
    /// Path of the metadata file
    pub metadata_file: PathBuf,
}

/// Execute one corruption run and persist its outputs
///
/// The reference pathway is loaded once and kept as the read-only copy the
/// applier validates against; files are written only after the whole apply
/// succeeds, so a failed run leaves nothing on disk.
pub fn run_corruption(config: &RunConfig) -> Result<RunOutput, CoreError> {
    let pathway = load_pathway_file(&config.pathway)?;
    let bank = CorruptionBank::load(&config.bank)?;
    let view = bank.for_pathway(&pathway.id);
    if view.is_empty() {
        tracing::warn!(pathway_id = %pathway.id, "bank has no entries for this pathway");
    }

    let per_category = errors_per_category(
        config.fraction,
        pathway.len(),
        config.error_types.len(),
        config.min_per_category,
    )?;
    let plan = build_plan(
        &config.error_types,
        config.difficulty,
        per_category,
        pathway.len(),
        config.seed,
        config.rng_streams,
    )?;
    let (modified, applied) = apply_plan(&pathway.steps, &view, &plan, config.seed)?;

    let save_dir = config.out_dir.join(run_folder_name(
        &config.error_types,
        config.difficulty,
        config.fraction,
    ));
    fs::create_dir_all(&save_dir)?;

    let corrupted = Pathway::new(pathway.id.clone(), pathway.title.clone(), modified)?;
    let pathway_file = save_dir.join(format!("{}.tsv", pathway.id));
    let metadata_file = save_dir.join(format!("{}.metadata.tsv", pathway.id));

    write_pathway_file(&pathway_file, &corrupted)?;
    write_metadata_file(&metadata_file, &applied, bank.extra_columns())?;

    tracing::info!(
        pathway_id = %pathway.id,
        corruptions = applied.len(),
        out = %save_dir.display(),
        "corruption run complete"
    );

    Ok(RunOutput {
        corrupted,
        applied,
        pathway_file,
        metadata_file,
    })
}
