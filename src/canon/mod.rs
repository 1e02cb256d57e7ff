//! Canonicalization turns expressions into dense linear rows.
//!
//! This module provides:
//! - `VariablePool` - column order shared by every row of a model
//! - `LinExpr` - dense `coefficients . x + constant` form
//! - `linearize` - the reduction from `Expr` to `LinExpr`

pub mod lin_expr;
pub mod linearize;
pub mod pool;

pub use lin_expr::LinExpr;
pub use linearize::{linearize, linearize_all};
pub use pool::VariablePool;
