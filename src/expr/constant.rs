//! Constant expression creation.

use super::expression::Expr;

/// Create a constant expression from a scalar.
pub fn constant(value: f64) -> Expr {
    Expr::Constant(value)
}

/// The constant `0`, the value of an empty sum.
pub fn zero() -> Expr {
    constant(0.0)
}
