//! The pathway model
//!
//! A [`Pathway`] couples an identifier (derived from the source file stem),
//! a normalised title, and an ordered, non-empty sequence of step texts.

use crate::error::PathwayError;
use serde::{Deserialize, Serialize};

/// An ordered biological pathway: identifier, title, and step statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathway {
    /// Identifier, derived from the source file stem
    pub id: String,
    /// Normalised title (lowercase, underscores for spaces)
    pub title: String,
    /// Ordered step statements; never empty
    pub steps: Vec<String>,
}

impl Pathway {
    /// Create a pathway, enforcing the non-empty-steps invariant
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        steps: Vec<String>,
    ) -> Result<Self, PathwayError> {
        let id = id.into();
        if steps.is_empty() {
            return Err(PathwayError::NoStepsInMemory { id });
        }
        Ok(Self {
            id,
            title: normalize_title(&title.into()),
            steps,
        })
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: the constructor rejects empty step lists
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Title with underscores restored to spaces, for human-readable output
    #[inline]
    #[must_use]
    pub fn readable_title(&self) -> String {
        self.title.replace('_', " ")
    }
}

/// Normalise a title: lowercase with underscores for spaces
#[inline]
#[must_use]
pub(crate) fn normalize_title(title: &str) -> String {
    title.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathway_new_normalizes_title() {
        let p = Pathway::new("p53", "P53 Signalling", vec!["A activates B".to_string()]).unwrap();
        assert_eq!(p.title, "p53_signalling");
        assert_eq!(p.readable_title(), "p53 signalling");
    }

    #[test]
    fn pathway_new_rejects_empty_steps() {
        let err = Pathway::new("p53", "title", vec![]).unwrap_err();
        assert!(matches!(err, PathwayError::NoStepsInMemory { .. }));
    }

    #[test]
    fn pathway_len() {
        let p = Pathway::new(
            "x",
            "t",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .unwrap();
        assert_eq!(p.len(), 3);
        assert!(!p.is_empty());
    }
}
