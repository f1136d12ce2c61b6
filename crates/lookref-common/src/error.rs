//! Spreadsheet error sentinels.
//!
//! - **`ExcelErrorKind`** : the closed set of error codes the lookup layer produces or forwards
//! - **`ExcelError`**     : kind plus an optional human explanation
//!
//! Errors are ordinary values here. A lookup that finds nothing returns
//! `#N/A` as data, it never unwinds.

use std::{error::Error, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LiteralValue;

/// Error codes recognised by the lookup & reference functions.
///
/// **Note:** names are CamelCase while `Display` renders them exactly as
/// the spreadsheet shows them (`#DIV/0!`, …).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExcelErrorKind {
    Null,
    Div,
    Value,
    Ref,
    Name,
    Num,
    Na,
}

impl fmt::Display for ExcelErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "#NULL!",
            Self::Div => "#DIV/0!",
            Self::Value => "#VALUE!",
            Self::Ref => "#REF!",
            Self::Name => "#NAME?",
            Self::Num => "#NUM!",
            Self::Na => "#N/A",
        })
    }
}

impl ExcelErrorKind {
    /// Every kind in the host's canonical order (the order the error codes
    /// are numbered in by `ERROR.TYPE`).
    pub const ALL: [ExcelErrorKind; 7] = [
        Self::Null,
        Self::Div,
        Self::Value,
        Self::Ref,
        Self::Name,
        Self::Num,
        Self::Na,
    ];

    /// Parse an error literal such as `#REF!`. Matching is case-insensitive
    /// and ignores surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "#null!" => Some(Self::Null),
            "#div/0!" => Some(Self::Div),
            "#value!" => Some(Self::Value),
            "#ref!" => Some(Self::Ref),
            "#name?" => Some(Self::Name),
            "#num!" => Some(Self::Num),
            "#n/a" => Some(Self::Na),
            _ => None,
        }
    }

    /// Stable rank used when errors have to be ordered among themselves.
    pub fn rank(self) -> u8 {
        match self {
            Self::Null => 1,
            Self::Div => 2,
            Self::Value => 3,
            Self::Ref => 4,
            Self::Name => 5,
            Self::Num => 6,
            Self::Na => 7,
        }
    }
}

/// The error value passed around by every function in the workspace.
///
/// Equality only looks at `kind`; the message is diagnostic text for logs
/// and never changes what a formula evaluates to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Eq)]
pub struct ExcelError {
    pub kind: ExcelErrorKind,
    pub message: Option<String>,
}

impl PartialEq for ExcelError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl std::hash::Hash for ExcelError {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl From<ExcelErrorKind> for ExcelError {
    fn from(kind: ExcelErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

impl ExcelError {
    pub fn new(kind: ExcelErrorKind) -> Self {
        kind.into()
    }

    /// Attach a human-readable explanation.
    pub fn with_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn na() -> Self {
        Self::new(ExcelErrorKind::Na)
    }

    pub fn reference() -> Self {
        Self::new(ExcelErrorKind::Ref)
    }

    pub fn value() -> Self {
        Self::new(ExcelErrorKind::Value)
    }
}

impl fmt::Display for ExcelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl Error for ExcelError {}

impl From<ExcelError> for LiteralValue {
    fn from(error: ExcelError) -> Self {
        LiteralValue::Error(error)
    }
}

impl From<ExcelErrorKind> for LiteralValue {
    fn from(kind: ExcelErrorKind) -> Self {
        LiteralValue::Error(ExcelError::new(kind))
    }
}

impl PartialEq<str> for ExcelErrorKind {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for ExcelError {
    fn eq(&self, other: &&str) -> bool {
        self.kind.to_string() == *other
    }
}
