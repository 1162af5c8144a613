//! The closed corruption vocabulary
//!
//! Wire tags are snake_case strings; difficulty is serialised as an
//! integer. Out-of-vocabulary tags fail parsing with a typed error rather
//! than flowing through as strings.

use crate::error::BankError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Corruption category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A plausible but incorrect entity substituted into a step
    WrongEntity,
    /// A causal or regulatory direction flipped
    WrongDirection,
    /// A fabricated step with no support in the reference
    AddUnsupportedStep,
}

impl ErrorType {
    /// All error types, in canonical order
    pub const ALL: [ErrorType; 3] = [
        ErrorType::WrongEntity,
        ErrorType::WrongDirection,
        ErrorType::AddUnsupportedStep,
    ];

    /// Wire tag for this error type
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::WrongEntity => "wrong_entity",
            ErrorType::WrongDirection => "wrong_direction",
            ErrorType::AddUnsupportedStep => "add_unsupported_step",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorType {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wrong_entity" => Ok(ErrorType::WrongEntity),
            "wrong_direction" => Ok(ErrorType::WrongDirection),
            "add_unsupported_step" => Ok(ErrorType::AddUnsupportedStep),
            other => Err(BankError::UnknownErrorType(other.to_string())),
        }
    }
}

/// How subtle a corruption is intended to be (1 = coarse, 2 = subtle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// Level 1: coarse, easy to spot
    One,
    /// Level 2: subtle
    Two,
}

impl Difficulty {
    /// Both difficulty levels, in canonical order
    pub const ALL: [Difficulty; 2] = [Difficulty::One, Difficulty::Two];

    /// Numeric level
    #[inline]
    #[must_use]
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::One => 1,
            Difficulty::Two => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = BankError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::One),
            2 => Ok(Difficulty::Two),
            other => Err(BankError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.level()
    }
}

impl FromStr for Difficulty {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u8 = s
            .trim()
            .parse()
            .map_err(|_| BankError::UnknownDifficulty(s.to_string()))?;
        Difficulty::try_from(level)
    }
}

/// The edit a bank entry performs on the working pathway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Overwrite the anchor step with the corrupted statement
    Replace,
    /// Insert the corrupted statement immediately before the anchor step
    InsertBefore,
    /// Insert the corrupted statement immediately after the anchor step
    InsertAfter,
}

impl Operation {
    /// Wire tag for this operation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Replace => "replace",
            Operation::InsertBefore => "insert_before",
            Operation::InsertAfter => "insert_after",
        }
    }

    /// Whether applying this operation grows the working pathway
    #[inline]
    #[must_use]
    pub fn inserts(&self) -> bool {
        matches!(self, Operation::InsertBefore | Operation::InsertAfter)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(Operation::Replace),
            "insert_before" => Ok(Operation::InsertBefore),
            "insert_after" => Ok(Operation::InsertAfter),
            other => Err(BankError::UnknownOperation(other.to_string())),
        }
    }
}
