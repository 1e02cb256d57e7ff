//! Canonical linear-programming model.
//!
//! This module provides:
//! - `Objective`, `Constraint`, `Bound` - dense rows
//! - `Sense`, `Relation` - with `FromStr` for their literals
//! - `LinearProgram` - validated assembly and text rendering

pub mod program;
pub mod render;
pub mod rows;

pub use program::LinearProgram;
pub use rows::{Bound, Constraint, Objective, Relation, Sense};
