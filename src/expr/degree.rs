//! Polynomial degree tracking.
//!
//! Degree is computed bottom-up when a node is created and anything above
//! [`MAX_LINEAR_DEGREE`] is rejected on the spot.

use super::expression::BinaryOp;

/// Highest degree a live expression may have.
pub const MAX_LINEAR_DEGREE: u32 = 1;

/// Degree of `a + b` and `a - b`.
pub fn add_degree(a: u32, b: u32) -> u32 {
    a.max(b)
}

/// Degree of `a * b`.
pub fn mul_degree(a: u32, b: u32) -> u32 {
    a + b
}

/// Degree of a binary node built from operands of degree `a` and `b`.
pub fn combine(op: BinaryOp, a: u32, b: u32) -> u32 {
    match op {
        BinaryOp::Add | BinaryOp::Sub => add_degree(a, b),
        BinaryOp::Mul => mul_degree(a, b),
    }
}

/// Check whether a degree is admissible for a linear model.
pub fn is_linear(degree: u32) -> bool {
    degree <= MAX_LINEAR_DEGREE
}
