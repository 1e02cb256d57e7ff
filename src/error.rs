//! Error types for lpcanon.

use thiserror::Error;

use crate::mps::MpsError;
use crate::solver::SolveStatus;

/// Error type for lpcanon operations.
#[derive(Debug, Error)]
pub enum LpError {
    /// An expression of degree 2 or more was constructed or linearized.
    #[error("Expression is not linear: {expr}")]
    NonLinearExpression { expr: String },

    /// Objective, constraint rows, bounds or names disagree in length.
    #[error("Dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Unknown relational operator literal.
    #[error("Expected one of \"==\", \">=\", \"<=\", got \"{0}\"")]
    InvalidRelation(String),

    /// Unknown optimization direction literal.
    #[error("Expected either \"min\" or \"max\", got \"{0}\"")]
    InvalidSense(String),

    /// Malformed numeric literal in a rendered model line.
    #[error("Invalid number: \"{0}\"")]
    InvalidNumber(String),

    /// MPS parse failure.
    #[error(transparent)]
    Mps(#[from] MpsError),

    /// The solver finished with a status other than success.
    #[error("Solver returned {0}")]
    Solver(SolveStatus),

    /// The solver backend could not be configured.
    #[error("Solver setup failed: {0}")]
    SolverSetup(String),

    /// I/O failure while reading a model.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LpError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LpError::NonLinearExpression { .. } => "EXPR_NON_LINEAR",
            LpError::DimensionMismatch { .. } => "MODEL_DIMENSION_MISMATCH",
            LpError::InvalidRelation(_) => "MODEL_INVALID_RELATION",
            LpError::InvalidSense(_) => "MODEL_INVALID_SENSE",
            LpError::InvalidNumber(_) => "MODEL_INVALID_NUMBER",
            LpError::Mps(_) => "MPS_PARSE",
            LpError::Solver(_) => "SOLVER_STATUS",
            LpError::SolverSetup(_) => "SOLVER_SETUP",
            LpError::Io(_) => "IO",
        }
    }

    pub(crate) fn non_linear(expr: impl ToString) -> Self {
        LpError::NonLinearExpression {
            expr: expr.to_string(),
        }
    }
}

/// Result type for lpcanon operations.
pub type Result<T> = std::result::Result<T, LpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_names_lengths() {
        let err = LpError::DimensionMismatch {
            what: "bounds",
            expected: 3,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in bounds: expected 3, got 2"
        );
        assert_eq!(err.code(), "MODEL_DIMENSION_MISMATCH");
    }

    #[test]
    fn solver_error_keeps_status() {
        let err = LpError::Solver(SolveStatus::Infeasibility);
        assert!(matches!(err, LpError::Solver(SolveStatus::Infeasibility)));
        assert_eq!(err.to_string(), "Solver returned Infeasibility");
    }
}
