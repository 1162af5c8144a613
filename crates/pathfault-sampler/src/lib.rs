//! Corruption sampling engine
//!
//! The core of the fault-injection pipeline:
//! - [`errors_per_category`] converts a target corruption fraction into a
//!   per-category integer budget
//! - [`build_plan`] produces a seeded randomized assignment of
//!   (step index, error type, difficulty) requests without replacement
//! - [`apply_plan`] walks the plan in reference-index order, applying
//!   replace/insert edits while tracking index drift from insertions and
//!   validating replaces against the original sequence
//!
//! All randomness derives from explicit caller seeds; identical inputs
//! yield identical outputs. The working copy is exclusively owned for the
//! duration of one [`apply_plan`] call, and bank lookups are read-only, so
//! reusing one bank across independent runs is safe.

mod apply;
mod budget;
mod error;
mod plan;

pub use apply::{apply_plan, corrupt_pathway, AppliedCorruption};
pub use budget::{errors_per_category, DEFAULT_MIN_PER_CATEGORY};
pub use error::SamplerError;
pub use plan::{build_plan, CorruptionPlan, PlanRequest, RngStreams};
