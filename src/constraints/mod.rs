//! Constraint types for expression-built problems.

pub mod constraint;

pub use constraint::{ConstraintExt, ExprConstraint};
