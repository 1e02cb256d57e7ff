//! Atom functions for building expressions.
//!
//! Only affine atoms exist: add, sub, scalar multiplication, negation, and
//! the `sum` / `dot` helpers. Multiplying two expressions is allowed only when
//! one side is constant.

pub mod affine;

pub use affine::{add, dot, mul, neg, scale, sub, sum};
