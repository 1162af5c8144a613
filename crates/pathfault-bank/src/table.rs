//! The corruption bank table: TSV I/O, filtering, and unique-key lookup

use crate::entry::BankEntry;
use crate::error::BankError;
use crate::vocab::{Difficulty, ErrorType, Operation};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Canonical bank column order; free-form extra columns follow these
pub const BANK_COLUMNS: [&str; 14] = [
    "corruption_id",
    "created_at",
    "model_name",
    "seed",
    "pathway_id",
    "pathway_title",
    "pathway_step_count",
    "anchor_step_index",
    "operation",
    "error_type",
    "difficulty",
    "original_statement",
    "corrupted_statement",
    "category_rationale",
];

/// Columns a bank file must carry for the engine to consume it
const REQUIRED_COLUMNS: [&str; 7] = [
    "pathway_id",
    "anchor_step_index",
    "error_type",
    "difficulty",
    "operation",
    "original_statement",
    "corrupted_statement",
];

/// In-memory corruption bank with stable column order
#[derive(Debug, Clone, Default)]
pub struct CorruptionBank {
    entries: Vec<BankEntry>,
    extra_columns: Vec<String>,
}

impl CorruptionBank {
    /// Build a bank from entries; extra columns are the union of the
    /// entries' extra keys in first-seen order
    #[must_use]
    pub fn new(entries: Vec<BankEntry>) -> Self {
        let mut extra_columns: Vec<String> = Vec::new();
        for entry in &entries {
            for key in entry.extra.keys() {
                if !extra_columns.iter().any(|c| c == key) {
                    extra_columns.push(key.clone());
                }
            }
        }
        Self {
            entries,
            extra_columns,
        }
    }

    /// Load a bank from a TSV file
    ///
    /// Unknown operation, error-type, or difficulty tags are rejected here;
    /// the applier never observes out-of-vocabulary rows.
    pub fn load(path: &Path) -> Result<Self, BankError> {
        let content = fs::read_to_string(path)?;
        let mut lines = content.lines();

        let header: Vec<&str> = lines
            .next()
            .map(|line| line.split('\t').map(str::trim).collect())
            .unwrap_or_default();
        for column in REQUIRED_COLUMNS {
            if !header.contains(&column) {
                return Err(BankError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                });
            }
        }

        let col = |name: &str| header.iter().position(|c| *c == name);
        let extra_columns: Vec<String> = header
            .iter()
            .filter(|c| !BANK_COLUMNS.contains(c))
            .map(|c| (*c).to_string())
            .collect();

        let mut entries = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').collect();
            let cell = |name: &str| -> &str {
                col(name)
                    .and_then(|i| cells.get(i))
                    .copied()
                    .unwrap_or_default()
            };

            let anchor_step_index = parse_field(cell("anchor_step_index"), "anchor_step_index")?;
            let operation: Operation = cell("operation").parse()?;
            let error_type: ErrorType = cell("error_type").parse()?;
            let difficulty: Difficulty = cell("difficulty").parse()?;
            let original = cell("original_statement");

            let mut extra = IndexMap::new();
            for column in &extra_columns {
                extra.insert(column.clone(), cell(column).to_string());
            }

            entries.push(BankEntry {
                corruption_id: cell("corruption_id").to_string(),
                created_at: cell("created_at").to_string(),
                model_name: cell("model_name").to_string(),
                seed: parse_optional_field(cell("seed"), "seed")?,
                pathway_id: cell("pathway_id").to_string(),
                pathway_title: cell("pathway_title").to_string(),
                pathway_step_count: parse_optional_field(
                    cell("pathway_step_count"),
                    "pathway_step_count",
                )?,
                anchor_step_index,
                operation,
                error_type,
                difficulty,
                original_statement: (!original.is_empty()).then(|| original.to_string()),
                corrupted_statement: cell("corrupted_statement").to_string(),
                category_rationale: cell("category_rationale").to_string(),
                extra,
            });
        }

        tracing::debug!(entries = entries.len(), path = %path.display(), "loaded corruption bank");
        Ok(Self {
            entries,
            extra_columns,
        })
    }

    /// Write the bank as TSV, canonical columns first, extras after
    pub fn save(&self, path: &Path) -> Result<(), BankError> {
        let mut header: Vec<&str> = BANK_COLUMNS.to_vec();
        header.extend(self.extra_columns.iter().map(String::as_str));

        let mut out = header.join("\t");
        out.push('\n');
        for entry in &self.entries {
            out.push_str(&entry_cells(entry, &self.extra_columns).join("\t"));
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }

    /// All entries
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[BankEntry] {
        &self.entries
    }

    /// Extra (non-canonical) column names, in file order
    #[inline]
    #[must_use]
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bank has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view restricted to one pathway
    #[must_use]
    pub fn for_pathway(&self, pathway_id: &str) -> BankView<'_> {
        BankView {
            entries: self
                .entries
                .iter()
                .filter(|e| e.pathway_id == pathway_id)
                .collect(),
        }
    }
}

/// A borrowed, filtered view over a bank; what the applier consumes
#[derive(Debug, Clone)]
pub struct BankView<'a> {
    entries: Vec<&'a BankEntry>,
}

impl<'a> BankView<'a> {
    /// Unique-key lookup; the first matching entry wins
    #[must_use]
    pub fn find(
        &self,
        anchor_step_index: usize,
        error_type: ErrorType,
        difficulty: Difficulty,
    ) -> Option<&'a BankEntry> {
        self.entries
            .iter()
            .find(|e| {
                e.anchor_step_index == anchor_step_index
                    && e.error_type == error_type
                    && e.difficulty == difficulty
            })
            .copied()
    }

    /// Entries in this view
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[&'a BankEntry] {
        &self.entries
    }

    /// Number of entries in this view
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the view is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialise one entry into cells matching [`BANK_COLUMNS`] + extras
#[must_use]
pub fn entry_cells(entry: &BankEntry, extra_columns: &[String]) -> Vec<String> {
    let mut cells = vec![
        sanitize_cell(&entry.corruption_id),
        sanitize_cell(&entry.created_at),
        sanitize_cell(&entry.model_name),
        entry.seed.to_string(),
        sanitize_cell(&entry.pathway_id),
        sanitize_cell(&entry.pathway_title),
        entry.pathway_step_count.to_string(),
        entry.anchor_step_index.to_string(),
        entry.operation.to_string(),
        entry.error_type.to_string(),
        entry.difficulty.to_string(),
        sanitize_cell(entry.original_statement.as_deref().unwrap_or_default()),
        sanitize_cell(&entry.corrupted_statement),
        sanitize_cell(&entry.category_rationale),
    ];
    for column in extra_columns {
        cells.push(sanitize_cell(
            entry.extra.get(column).map(String::as_str).unwrap_or_default(),
        ));
    }
    cells
}

/// TSV cells cannot carry tabs or newlines; collapse them to spaces
#[must_use]
pub fn sanitize_cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn parse_field(value: &str, column: &str) -> Result<usize, BankError> {
    value.trim().parse().map_err(|_| BankError::InvalidField {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Like [`parse_field`] but empty cells default to zero (absent provenance)
fn parse_optional_field<T: std::str::FromStr + Default>(
    value: &str,
    column: &str,
) -> Result<T, BankError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| BankError::InvalidField {
        column: column.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_entry() -> BankEntry {
        BankEntry::new(
            "p53",
            1,
            ErrorType::WrongEntity,
            Difficulty::One,
            Operation::Replace,
            "B binds X",
        )
        .with_original("B binds C")
        .with_provenance("c-1", "2025-01-01T00:00:00+00:00", "gpt-4o", 7)
    }

    #[test]
    fn bank_round_trip() {
        let bank = CorruptionBank::new(vec![sample_entry()]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.tsv");
        bank.save(&path).unwrap();

        let loaded = CorruptionBank::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0], sample_entry());
    }

    #[test]
    fn bank_preserves_extra_columns() {
        let mut entry = sample_entry();
        entry.extra.insert("reviewer".to_string(), "jb".to_string());
        let bank = CorruptionBank::new(vec![entry]);
        assert_eq!(bank.extra_columns(), ["reviewer".to_string()]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.tsv");
        bank.save(&path).unwrap();

        let loaded = CorruptionBank::load(&path).unwrap();
        assert_eq!(loaded.extra_columns(), ["reviewer".to_string()]);
        assert_eq!(loaded.entries()[0].extra["reviewer"], "jb");
    }

    #[test]
    fn load_rejects_missing_required_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.tsv");
        fs::write(&path, "pathway_id\tanchor_step_index\np53\t0\n").unwrap();

        let err = CorruptionBank::load(&path).unwrap_err();
        assert!(matches!(err, BankError::MissingColumn { .. }));
    }

    #[test]
    fn load_rejects_unknown_operation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.tsv");
        fs::write(
            &path,
            "pathway_id\tanchor_step_index\terror_type\tdifficulty\toperation\toriginal_statement\tcorrupted_statement\n\
             p53\t0\twrong_entity\t1\tdelete\tA\tB\n",
        )
        .unwrap();

        let err = CorruptionBank::load(&path).unwrap_err();
        assert!(matches!(err, BankError::UnknownOperation(_)));
    }

    #[test]
    fn view_filters_by_pathway_and_finds_unique_key() {
        let mut other = sample_entry();
        other.pathway_id = "wnt".to_string();
        let bank = CorruptionBank::new(vec![sample_entry(), other]);

        let view = bank.for_pathway("p53");
        assert_eq!(view.len(), 1);

        let hit = view.find(1, ErrorType::WrongEntity, Difficulty::One);
        assert!(hit.is_some());
        assert_eq!(hit.unwrap().corrupted_statement, "B binds X");

        assert!(view.find(1, ErrorType::WrongDirection, Difficulty::One).is_none());
        assert!(view.find(2, ErrorType::WrongEntity, Difficulty::One).is_none());
    }

    #[test]
    fn empty_original_statement_loads_as_none() {
        let entry = BankEntry::new(
            "p53",
            0,
            ErrorType::AddUnsupportedStep,
            Difficulty::Two,
            Operation::InsertAfter,
            "A also binds Z",
        );
        let bank = CorruptionBank::new(vec![entry]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.tsv");
        bank.save(&path).unwrap();

        let loaded = CorruptionBank::load(&path).unwrap();
        assert_eq!(loaded.entries()[0].original_statement, None);
    }

    #[test]
    fn sanitize_collapses_framing_characters() {
        assert_eq!(sanitize_cell("a\tb\nc"), "a b c");
    }
}
