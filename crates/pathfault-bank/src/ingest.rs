//! Ingestion of raw model output into bank entries
//!
//! Generation-time model output is JSON in theory and almost-JSON in
//! practice: fenced in markdown, carrying raw control characters inside
//! string literals, or ending lists with trailing commas. Rather than
//! cascading parser exceptions, repair is an ordered list of fallible
//! strategies tried in sequence; the first success short-circuits and the
//! fallback order is explicit and testable.

use crate::entry::BankEntry;
use crate::error::BankError;
use crate::vocab::{Difficulty, ErrorType, Operation};
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use pathfault_pathway::Pathway;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One corruption as emitted by the generator model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCorruption {
    /// 0-based index of the targeted step
    pub anchor_step_index: usize,
    /// Edit to perform
    pub operation: Operation,
    /// Corruption category
    pub error_type: ErrorType,
    /// Intended subtlety
    pub difficulty: Difficulty,
    /// Exact targeted step text; must be absent for inserts
    #[serde(default)]
    pub original_statement: Option<String>,
    /// The corrupted statement
    pub corrupted_statement: String,
    /// Free-form generator rationale
    #[serde(default)]
    pub category_rationale: String,
}

/// Container matching the generator's output schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCorruptionList {
    /// The corruptions, in generator order
    pub corruptions: Vec<RawCorruption>,
}

/// A fallible JSON repair strategy
///
/// Implementations must be order-independent: each strategy works from the
/// original fence-stripped text, not from another strategy's output.
pub trait RepairStrategy: Send + Sync {
    /// Strategy name, used in failure reports
    fn name(&self) -> &'static str;

    /// Attempt to parse the raw text into a JSON value
    fn parse(&self, raw: &str) -> Result<serde_json::Value, serde_json::Error>;
}

/// Strategy 1: the text is already valid JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson;

impl RepairStrategy for StrictJson {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn parse(&self, raw: &str) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Strategy 2: escape raw control characters inside string literals
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeControlChars;

impl RepairStrategy for EscapeControlChars {
    fn name(&self) -> &'static str {
        "escape_ctrl"
    }

    fn parse(&self, raw: &str) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&escape_ctrl_chars_in_strings(raw))
    }
}

/// Strategy 3: tolerate trailing commas before closing brackets
#[derive(Debug, Clone, Copy, Default)]
pub struct StripTrailingCommas;

impl RepairStrategy for StripTrailingCommas {
    fn name(&self) -> &'static str {
        "relaxed"
    }

    fn parse(&self, raw: &str) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&strip_trailing_commas(raw))
    }
}

/// The default repair chain, in fallback order
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn RepairStrategy>> {
    vec![
        Box::new(StrictJson),
        Box::new(EscapeControlChars),
        Box::new(StripTrailingCommas),
    ]
}

/// Remove backtick code fences wrapping the content, if present
#[must_use]
pub fn strip_code_fences(content: &str) -> String {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text.to_string()
}

/// Parse almost-JSON text by trying each strategy in order
///
/// Code fences are stripped once before the chain. Exhausting every
/// strategy yields [`BankError::UnparseableModelOutput`] carrying the
/// per-strategy failures in attempt order.
pub fn parse_json_lenient(
    content: &str,
    strategies: &[Box<dyn RepairStrategy>],
) -> Result<serde_json::Value, BankError> {
    let raw = strip_code_fences(content);

    let mut failures = Vec::new();
    for strategy in strategies {
        match strategy.parse(&raw) {
            Ok(value) => {
                if !failures.is_empty() {
                    tracing::debug!(
                        strategy = strategy.name(),
                        attempts = failures.len() + 1,
                        "model output parsed after repair"
                    );
                }
                return Ok(value);
            }
            Err(err) => failures.push((strategy.name(), err.to_string())),
        }
    }
    Err(BankError::UnparseableModelOutput { failures })
}

/// Parse raw model output into the corruption schema via the default chain
pub fn parse_model_output(content: &str) -> Result<RawCorruptionList, BankError> {
    let value = parse_json_lenient(content, &default_strategies())?;
    Ok(serde_json::from_value(value)?)
}

/// Stamp provenance on validated raw corruptions, producing bank entries
#[must_use]
pub fn assemble_entries(
    corruptions: Vec<RawCorruption>,
    pathway: &Pathway,
    model_name: &str,
    seed: u64,
) -> Vec<BankEntry> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    corruptions
        .into_iter()
        .map(|c| BankEntry {
            corruption_id: Uuid::new_v4().to_string(),
            created_at: created_at.clone(),
            model_name: model_name.to_string(),
            seed,
            pathway_id: pathway.id.clone(),
            pathway_title: pathway.title.clone(),
            pathway_step_count: pathway.len(),
            anchor_step_index: c.anchor_step_index,
            operation: c.operation,
            error_type: c.error_type,
            difficulty: c.difficulty,
            original_statement: c.original_statement,
            corrupted_statement: c.corrupted_statement,
            category_rationale: c.category_rationale,
            extra: IndexMap::new(),
        })
        .collect()
}

/// Escape control characters occurring inside JSON string literals
fn escape_ctrl_chars_in_strings(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_str = false;
    let mut escape = false;
    for ch in s.chars() {
        if in_str {
            if escape {
                out.push(ch);
                escape = false;
            } else if ch == '\\' {
                out.push(ch);
                escape = true;
            } else if ch == '"' {
                out.push(ch);
                in_str = false;
            } else if (ch as u32) < 0x20 || ch as u32 == 0x7F {
                match ch {
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push_str(&format!("\\u{:04x}", ch as u32)),
                }
            } else {
                out.push(ch);
            }
        } else {
            out.push(ch);
            if ch == '"' {
                in_str = true;
            }
        }
    }
    out
}

/// Drop commas that directly precede a closing bracket, outside strings
fn strip_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut in_str = false;
    let mut escape = false;
    for (i, &ch) in chars.iter().enumerate() {
        if in_str {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_str = false;
            }
            continue;
        }
        if ch == '"' {
            in_str = true;
            out.push(ch);
            continue;
        }
        if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace()).copied();
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}
