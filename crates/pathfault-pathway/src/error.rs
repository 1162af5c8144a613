//! Error types for pathway loading and writing

use std::path::PathBuf;

/// Errors raised while loading or writing pathway files
#[derive(Debug, thiserror::Error)]
pub enum PathwayError {
    /// The file has no `name` column in its header row
    #[error("missing 'name' column in {path}")]
    MissingNameColumn {
        /// Offending file
        path: PathBuf,
    },

    /// The file contains a title row but no step rows
    #[error("no steps found in {path} (only a title row present)")]
    NoSteps {
        /// Offending file
        path: PathBuf,
    },

    /// The file is empty or has no header row
    #[error("empty pathway file: {path}")]
    EmptyFile {
        /// Offending file
        path: PathBuf,
    },

    /// A pathway was constructed with an empty step list
    #[error("pathway {id} has no steps")]
    NoStepsInMemory {
        /// Pathway identifier
        id: String,
    },

    /// Underlying I/O failure
    #[error("pathway file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PathwayError::MissingNameColumn {
            path: PathBuf::from("p.tsv"),
        };
        assert!(err.to_string().contains("missing 'name' column"));

        let err = PathwayError::NoSteps {
            path: PathBuf::from("p.tsv"),
        };
        assert!(err.to_string().contains("no steps found"));
    }
}
