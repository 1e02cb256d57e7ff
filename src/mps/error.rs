//! MPS parse errors.

use thiserror::Error;

/// What went wrong on an MPS line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MpsErrorKind {
    #[error("unknown section {0:?}")]
    UnknownSection(String),

    #[error("data line outside of a section")]
    DataOutsideSection,

    /// Wrong number of fields for the section.
    #[error("malformed {0} line")]
    MalformedLine(&'static str),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("unknown row {0:?}")]
    UnknownRow(String),

    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    #[error("unknown row type {0:?}")]
    UnknownRowType(String),

    #[error("unknown bound type {0:?}")]
    UnknownBoundType(String),

    #[error("duplicate row {0:?}")]
    DuplicateRow(String),

    #[error("invalid objective sense {0:?}")]
    InvalidSense(String),

    #[error("no objective (N) row")]
    MissingObjective,
}

/// A fatal MPS error with its 1-based line number and the line text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("MPS line {line}: {kind}: {text:?}")]
pub struct MpsError {
    pub line: usize,
    pub text: String,
    pub kind: MpsErrorKind,
}

impl MpsError {
    pub fn new(line: usize, text: impl Into<String>, kind: MpsErrorKind) -> Self {
        MpsError {
            line,
            text: text.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_line() {
        let err = MpsError::new(7, " X1 BOGUS 1", MpsErrorKind::UnknownRow("BOGUS".into()));
        assert_eq!(
            err.to_string(),
            "MPS line 7: unknown row \"BOGUS\": \" X1 BOGUS 1\""
        );
    }
}
