//! Constraints between expressions.
//!
//! `lhs rel rhs` is linearized as the single row
//! `coeffs(lhs - rhs) rel -constant(lhs - rhs)`.

use crate::canon::{linearize, VariablePool};
use crate::error::Result;
use crate::expr::{Expr, Variable};
use crate::model::{Constraint, Relation};

/// A constraint relating two expressions.
#[derive(Debug, Clone)]
pub struct ExprConstraint {
    pub lhs: Expr,
    pub relation: Relation,
    pub rhs: Expr,
}

impl ExprConstraint {
    pub fn new(lhs: impl Into<Expr>, relation: Relation, rhs: impl Into<Expr>) -> Self {
        ExprConstraint {
            lhs: lhs.into(),
            relation,
            rhs: rhs.into(),
        }
    }

    /// Create an equality constraint: lhs == rhs.
    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(lhs, Relation::Eq, rhs)
    }

    /// Create an inequality constraint: lhs <= rhs.
    pub fn leq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(lhs, Relation::Le, rhs)
    }

    /// Create an inequality constraint: lhs >= rhs.
    pub fn geq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(lhs, Relation::Ge, rhs)
    }

    /// `lhs - rhs`, the expression compared against zero.
    pub fn difference(&self) -> Expr {
        &self.lhs - &self.rhs
    }

    /// Distinct variables of both sides in first-encounter order.
    pub fn variables(&self) -> Vec<Variable> {
        self.difference().variables()
    }

    /// Linearize into a model row over `pool`.
    ///
    /// The row has `pool.len()` entries as of the end of the call.
    pub fn linearize(&self, pool: &mut VariablePool) -> Result<Constraint> {
        let lin = linearize(&self.difference(), pool)?;
        Ok(Constraint::new(lin.coefficients, self.relation, -lin.constant))
    }
}

/// Extension trait for creating constraints from expressions.
pub trait ConstraintExt {
    /// Create equality constraint: self == rhs.
    fn equals(&self, rhs: impl Into<Expr>) -> ExprConstraint;

    /// Create inequality constraint: self <= rhs.
    fn leq(&self, rhs: impl Into<Expr>) -> ExprConstraint;

    /// Create inequality constraint: self >= rhs.
    fn geq(&self, rhs: impl Into<Expr>) -> ExprConstraint;
}

impl ConstraintExt for Expr {
    fn equals(&self, rhs: impl Into<Expr>) -> ExprConstraint {
        ExprConstraint::eq(self, rhs)
    }

    fn leq(&self, rhs: impl Into<Expr>) -> ExprConstraint {
        ExprConstraint::leq(self, rhs)
    }

    fn geq(&self, rhs: impl Into<Expr>) -> ExprConstraint {
        ExprConstraint::geq(self, rhs)
    }
}

impl ConstraintExt for Variable {
    fn equals(&self, rhs: impl Into<Expr>) -> ExprConstraint {
        ExprConstraint::eq(self, rhs)
    }

    fn leq(&self, rhs: impl Into<Expr>) -> ExprConstraint {
        ExprConstraint::leq(self, rhs)
    }

    fn geq(&self, rhs: impl Into<Expr>) -> ExprConstraint {
        ExprConstraint::geq(self, rhs)
    }
}
