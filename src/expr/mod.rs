//! Expression types and creation utilities.
//!
//! This module provides the core expression types for building linear models:
//! - `Expr` - constants, variables and binary add/sub/mul nodes
//! - `Variable` - identity-compared decision variables via `variable()` and `VariableBuilder`
//! - Constant creation via `constant()` and `zero()`

pub mod constant;
pub mod degree;
pub mod expression;
pub mod variable;

// Re-export main types
pub use constant::{constant, zero};
pub use expression::{BinaryExpr, BinaryOp, Expr};
pub use variable::{
    binary_variable, free_variable, integer_variable, variable, VarId, VarKind, Variable,
    VariableBuilder,
};
