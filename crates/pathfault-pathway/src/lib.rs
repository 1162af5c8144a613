//! Pathway data model and file I/O
//!
//! A pathway is an ordered list of short textual mechanism statements plus a
//! title. This crate provides:
//! - The [`Pathway`] model with its structural invariants
//! - Loading/writing the tab-separated pathway file format
//!
//! The wire format is a single `name` column: row 0 carries the title,
//! subsequent rows carry the ordered steps.

mod error;
mod model;
mod tsv;

pub use error::PathwayError;
pub use model::Pathway;
pub use tsv::{load_pathway_file, write_pathway_file};
