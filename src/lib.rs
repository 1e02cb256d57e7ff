//! # lpcanon
//!
//! Construction of canonical-form linear programs.
//!
//! Two front ends produce the same [`LinearProgram`]:
//!
//! - an expression API where constants and variables combine with `+`, `-`
//!   and `*` into degree-tracked trees that are linearized against a shared
//!   [`VariablePool`](canon::VariablePool);
//! - an MPS reader that tokenizes the standard file format in two passes.
//!
//! The program is then handed to any [`LpSolver`](solver::LpSolver); a
//! Clarabel backend is included.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lpcanon::prelude::*;
//!
//! let x = variable("x");
//! let y = variable("y");
//!
//! let lp = Problem::minimize(&x + 2.0 * &y)
//!     .subject_to([(&x + &y).geq(1.0)])
//!     .build()?;
//!
//! println!("{lp}");
//! let solution = lp.solve()?;
//! println!("Optimal value: {}", solution.value);
//! ```
//!
//! ## Linearity
//!
//! - `+` and `-` never raise the degree and are infallible
//! - `*` by a number is infallible
//! - `*` between two expressions returns `Result<Expr>`; a product of two
//!   non-constant factors fails with [`LpError::NonLinearExpression`]

pub mod atoms;
pub mod canon;
pub mod constraints;
pub mod error;
pub mod expr;
pub mod model;
pub mod mps;
pub mod problem;
pub mod solver;
pub mod sparse;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use lpcanon::prelude::*;
/// ```
pub mod prelude {
    // Expression types
    pub use crate::expr::{
        binary_variable, constant, free_variable, integer_variable, variable, Expr, VarKind,
        Variable, VariableBuilder,
    };

    // Atoms
    pub use crate::atoms::{add, dot, mul, neg, scale, sub, sum};

    // Linearization
    pub use crate::canon::{linearize, LinExpr, VariablePool};

    // Constraints
    pub use crate::constraints::{ConstraintExt, ExprConstraint};

    // Model
    pub use crate::model::{Bound, Constraint, LinearProgram, Objective, Relation, Sense};

    // MPS
    pub use crate::mps::{parse_str, read_mps, MpsModel};

    // Problem
    pub use crate::problem::{Problem, ProblemBuilder};

    // Solver
    pub use crate::solver::{
        ClarabelSolver, LpSolver, PivotRule, Settings, Solution, SolveStatus,
    };

    // Errors
    pub use crate::error::{LpError, Result};
}

// Re-export main types at crate root
pub use error::{LpError, Result};
pub use model::LinearProgram;
pub use problem::Problem;
pub use solver::{Solution, SolveStatus};
