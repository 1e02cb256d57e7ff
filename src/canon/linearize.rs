//! Expression linearization.
//!
//! Reduces a degree-1 expression tree to `(coefficients, constant)` against a
//! caller-owned [`VariablePool`]. Every binary node is classified by operator
//! and by the shape of each operand (constant, variable, or composite) and
//! handled by a single exhaustive `match`, so there is no combination without
//! a defined result.

use super::lin_expr::LinExpr;
use super::pool::VariablePool;
use crate::error::{LpError, Result};
use crate::expr::{degree, BinaryExpr, BinaryOp, Expr, Variable};

/// Linearize `expr`, registering unseen variables in `pool`.
///
/// The returned coefficient vector always has `pool.len()` entries as of the
/// end of the call.
pub fn linearize(expr: &Expr, pool: &mut VariablePool) -> Result<LinExpr> {
    let before = pool.len();
    let mut lin = Linearizer { pool: &mut *pool }.expr(expr)?;
    lin.pad_to(pool.len());
    tracing::trace!(
        component = "linearize",
        operation = "expr",
        status = "ok",
        new_variables = pool.len() - before,
        pool_size = pool.len(),
        "Linearized expression"
    );
    Ok(lin)
}

/// Linearize several expressions through one pool and pad every row to the
/// final pool size.
pub fn linearize_all<'a>(
    exprs: impl IntoIterator<Item = &'a Expr>,
    pool: &mut VariablePool,
) -> Result<Vec<LinExpr>> {
    let before = pool.len();
    let mut rows = exprs
        .into_iter()
        .map(|e| linearize(e, pool))
        .collect::<Result<Vec<_>>>()?;
    for row in &mut rows {
        row.pad_to(pool.len());
    }
    tracing::debug!(
        component = "linearize",
        operation = "batch",
        status = "ok",
        rows = rows.len(),
        new_variables = pool.len() - before,
        pool_size = pool.len(),
        "Linearized expressions"
    );
    Ok(rows)
}

/// Shape of one operand of a binary node.
#[derive(Clone, Copy)]
enum Operand<'a> {
    Const(f64),
    Var(&'a Variable),
    Composite(&'a BinaryExpr),
}

impl<'a> Operand<'a> {
    fn of(expr: &'a Expr) -> Self {
        match expr {
            Expr::Constant(c) => Operand::Const(*c),
            Expr::Variable(v) => Operand::Var(v),
            Expr::Binary(b) => Operand::Composite(b),
        }
    }
}

/// Recursion state: the pool being grown by this call.
struct Linearizer<'p> {
    pool: &'p mut VariablePool,
}

impl Linearizer<'_> {
    fn expr(&mut self, expr: &Expr) -> Result<LinExpr> {
        if !degree::is_linear(expr.degree()) {
            return Err(LpError::non_linear(expr));
        }
        match expr {
            Expr::Constant(c) => Ok(self.constant(*c)),
            Expr::Variable(v) => Ok(self.term(v, 1.0, 0.0)),
            Expr::Binary(node) => self.binary(node),
        }
    }

    fn constant(&self, value: f64) -> LinExpr {
        LinExpr::constant(self.pool.len(), value)
    }

    fn term(&mut self, var: &Variable, coeff: f64, constant: f64) -> LinExpr {
        let idx = self.pool.insert(var);
        LinExpr::term(self.pool.len(), idx, coeff, constant)
    }

    /// Linearize a sub-node and back-fill it to the current pool size.
    fn composite(&mut self, node: &BinaryExpr) -> Result<LinExpr> {
        let mut lin = self.binary(node)?;
        lin.pad_to(self.pool.len());
        Ok(lin)
    }

    fn binary(&mut self, node: &BinaryExpr) -> Result<LinExpr> {
        use BinaryOp::{Add, Mul, Sub};
        use Operand::{Composite, Const, Var};

        let left = Operand::of(node.left());
        let right = Operand::of(node.right());

        let lin = match (node.op(), left, right) {
            // ---- atomic (op) atomic ----
            (op, Const(a), Const(b)) => self.constant(op.apply(a, b)),
            (Add, Var(v), Const(c)) => self.term(v, 1.0, c),
            (Add, Const(c), Var(v)) => self.term(v, 1.0, c),
            (Sub, Var(v), Const(c)) => self.term(v, 1.0, -c),
            (Sub, Const(c), Var(v)) => self.term(v, -1.0, c),
            (Mul, Var(v), Const(c)) => self.term(v, c, 0.0),
            (Mul, Const(c), Var(v)) => self.term(v, c, 0.0),
            (Add, Var(a), Var(b)) => {
                let lhs = self.term(a, 1.0, 0.0);
                let idx = self.pool.insert(b);
                lhs.add_term(idx, 1.0)
            }
            (Sub, Var(a), Var(b)) => {
                let lhs = self.term(a, 1.0, 0.0);
                let idx = self.pool.insert(b);
                lhs.add_term(idx, -1.0)
            }
            (Mul, Var(_), Var(_)) => return Err(LpError::non_linear(node)),

            // ---- atomic (op) composite ----
            (op, Const(c), Composite(rhs)) => {
                let r = self.composite(rhs)?;
                match op {
                    Add => r.offset(c),
                    Sub => r.neg().offset(c),
                    Mul => r.scale(c),
                }
            }
            (op, Var(v), Composite(rhs)) => {
                let idx = self.pool.insert(v);
                let r = self.composite(rhs)?;
                match op {
                    Add => r.add_term(idx, 1.0),
                    Sub => r.neg().add_term(idx, 1.0),
                    Mul => self.scaled_variable(node, idx, &r)?,
                }
            }

            // ---- composite (op) atomic ----
            (op, Composite(lhs), Const(c)) => {
                let l = self.composite(lhs)?;
                match op {
                    Add => l.offset(c),
                    Sub => l.offset(-c),
                    Mul => l.scale(c),
                }
            }
            (op, Composite(lhs), Var(v)) => {
                let l = self.composite(lhs)?;
                let idx = self.pool.insert(v);
                match op {
                    Add => l.add_term(idx, 1.0),
                    Sub => l.add_term(idx, -1.0),
                    Mul => self.scaled_variable(node, idx, &l)?,
                }
            }

            // ---- composite (op) composite ----
            (op, Composite(lhs), Composite(rhs)) => {
                let l = self.composite(lhs)?;
                let r = self.composite(rhs)?;
                match op {
                    Add => l.add(&r),
                    Sub => l.sub(&r),
                    Mul if l.is_constant() => r.scale(l.constant),
                    Mul if r.is_constant() => l.scale(r.constant),
                    Mul => return Err(LpError::non_linear(node)),
                }
            }
        };
        Ok(lin)
    }

    /// `factor * x[idx]` where `factor` must have folded to a constant.
    fn scaled_variable(&self, node: &BinaryExpr, idx: usize, factor: &LinExpr) -> Result<LinExpr> {
        if !factor.is_constant() {
            return Err(LpError::non_linear(node));
        }
        Ok(LinExpr::term(self.pool.len(), idx, factor.constant, 0.0))
    }
}
