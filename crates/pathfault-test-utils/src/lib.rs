//! Testing utilities for the pathfault workspace
//!
//! Shared fixtures: a small reference pathway, a complete corruption bank
//! over it, and tempdir writers for file-level tests.

#![allow(missing_docs)]

use pathfault_bank::{BankEntry, CorruptionBank, Difficulty, ErrorType, Operation};
use pathfault_pathway::Pathway;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The three-step pathway used across the workspace's tests
pub fn sample_steps() -> Vec<String> {
    vec![
        "A activates B".to_string(),
        "B binds C".to_string(),
        "C degrades D".to_string(),
    ]
}

pub fn sample_pathway() -> Pathway {
    Pathway::new("sample", "sample pathway", sample_steps()).unwrap()
}

/// A bank with one corruption per (step, error type, difficulty)
/// combination over [`sample_steps`]
///
/// Replace entries for `WrongEntity`/`WrongDirection`, insert-after
/// entries for `AddUnsupportedStep`, so every plan the sampler can build
/// against the sample pathway finds a match.
pub fn complete_sample_bank() -> CorruptionBank {
    let steps = sample_steps();
    let mut entries = Vec::new();
    for (anchor, step) in steps.iter().enumerate() {
        for etype in ErrorType::ALL {
            for difficulty in Difficulty::ALL {
                let entry = match etype {
                    ErrorType::AddUnsupportedStep => BankEntry::new(
                        "sample",
                        anchor,
                        etype,
                        difficulty,
                        Operation::InsertAfter,
                        format!("unsupported step after {anchor} (d{difficulty})"),
                    ),
                    _ => BankEntry::new(
                        "sample",
                        anchor,
                        etype,
                        difficulty,
                        Operation::Replace,
                        format!("corrupted {anchor} {etype} d{difficulty}"),
                    )
                    .with_original(step.clone()),
                };
                entries.push(entry.with_provenance(
                    format!("fixture-{anchor}-{etype}-{difficulty}"),
                    "2025-01-01T00:00:00Z",
                    "fixture-model",
                    0,
                ));
            }
        }
    }
    CorruptionBank::new(entries)
}

/// Write [`sample_pathway`] as a TSV into a fresh tempdir
pub fn write_sample_pathway_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.tsv");
    let mut content = String::from("name\nSample Pathway\n");
    for step in sample_steps() {
        content.push_str(&step);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// Write [`complete_sample_bank`] as a TSV into a fresh tempdir
pub fn write_sample_bank_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.tsv");
    complete_sample_bank().save(&path).unwrap();
    (dir, path)
}
