//! Pathfault orchestration
//!
//! Wires the pathway model, corruption bank, and sampling engine into one
//! corruption run:
//! 1. Load the reference pathway and the bank, filtered to the pathway id
//! 2. Convert the corruption fraction into a per-category budget
//! 3. Build a seeded plan and apply it
//! 4. Persist the corrupted pathway and its metadata table
//!
//! Outputs are written only after the whole apply succeeds; a failed run
//! leaves no partial files behind.

mod config;
mod error;
mod output;
mod run;

pub use config::RunConfig;
pub use error::CoreError;
pub use output::{run_folder_name, write_metadata_file, METADATA_EXTRA_COLUMNS};
pub use run::{run_corruption, RunOutput};
