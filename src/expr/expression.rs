//! Core expression types for lpcanon.
//!
//! The `Expr` enum represents scalar linear arithmetic over constants and
//! variables. Expressions form an immutable DAG using `Arc` for sharing, and
//! every node that exists has degree at most one: [`BinaryExpr`] can only be
//! obtained through a constructor that checks the degree.

use std::fmt;
use std::sync::Arc;

use super::degree;
use super::variable::Variable;
use crate::error::{LpError, Result};

/// Binary operator of a composite expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
        }
    }

    /// Apply the operator to two numbers.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
        }
    }
}

/// A binary node. Fields are private so the degree invariant cannot be
/// bypassed.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    op: BinaryOp,
    left: Arc<Expr>,
    right: Arc<Expr>,
    degree: u32,
}

impl BinaryExpr {
    /// Build a node, failing with [`LpError::NonLinearExpression`] when the
    /// result would have degree greater than one.
    pub fn new(op: BinaryOp, left: Expr, right: Expr) -> Result<Self> {
        let degree = degree::combine(op, left.degree(), right.degree());
        if !degree::is_linear(degree) {
            return Err(LpError::non_linear(Rendered {
                op,
                left: &left,
                right: &right,
            }));
        }
        Ok(Self::unchecked(op, left, right, degree))
    }

    /// Sum or difference of two live expressions. Both operands already have
    /// degree at most one, so the result does too.
    pub(crate) fn sum(op: BinaryOp, left: Expr, right: Expr) -> Self {
        debug_assert!(op != BinaryOp::Mul);
        let degree = degree::add_degree(left.degree(), right.degree());
        Self::unchecked(op, left, right, degree)
    }

    /// Product of a live expression and a constant, in the given operand
    /// order.
    pub(crate) fn scaled(left: Expr, right: Expr) -> Self {
        debug_assert!(left.is_constant() || right.is_constant());
        let degree = degree::mul_degree(left.degree(), right.degree());
        Self::unchecked(BinaryOp::Mul, left, right, degree)
    }

    fn unchecked(op: BinaryOp, left: Expr, right: Expr, degree: u32) -> Self {
        BinaryExpr {
            op,
            left: Arc::new(left),
            right: Arc::new(right),
            degree,
        }
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn left(&self) -> &Expr {
        &self.left
    }

    pub fn right(&self) -> &Expr {
        &self.right
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }
}

/// The core expression type.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A real constant.
    Constant(f64),
    /// A decision variable.
    Variable(Variable),
    /// `left op right`.
    Binary(BinaryExpr),
}

impl Expr {
    /// Build `left op right`, checking the degree.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Result<Expr> {
        BinaryExpr::new(op, left, right).map(Expr::Binary)
    }

    /// Polynomial degree: 0 for constants, 1 for variables.
    pub fn degree(&self) -> u32 {
        match self {
            Expr::Constant(_) => 0,
            Expr::Variable(_) => 1,
            Expr::Binary(b) => b.degree,
        }
    }

    /// Constants and variables are atomic.
    pub fn is_atom(&self) -> bool {
        !matches!(self, Expr::Binary(_))
    }

    /// Check if this expression is a literal constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }

    /// Check if this expression is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Variable(_))
    }

    /// Get the value if this is a literal constant.
    pub fn constant_value(&self) -> Option<f64> {
        match self {
            Expr::Constant(c) => Some(*c),
            _ => None,
        }
    }

    /// Get the variable if this is a variable expression.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expr::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Distinct variables in first-encounter order (left before right).
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<Variable>) {
        match self {
            Expr::Constant(_) => {}
            Expr::Variable(v) => {
                if !vars.iter().any(|seen| seen.same_as(v)) {
                    vars.push(v.clone());
                }
            }
            Expr::Binary(b) => {
                b.left.collect_variables(vars);
                b.right.collect_variables(vars);
            }
        }
    }

    /// Evaluate the expression with `value_of` supplying each variable.
    pub fn evaluate<F>(&self, value_of: F) -> f64
    where
        F: Fn(&Variable) -> f64,
    {
        self.evaluate_ref(&value_of)
    }

    fn evaluate_ref<F>(&self, value_of: &F) -> f64
    where
        F: Fn(&Variable) -> f64,
    {
        match self {
            Expr::Constant(c) => *c,
            Expr::Variable(v) => value_of(v),
            Expr::Binary(b) => b
                .op
                .apply(b.left.evaluate_ref(value_of), b.right.evaluate_ref(value_of)),
        }
    }

    /// Evaluate using each variable's default value.
    pub fn value(&self) -> f64 {
        self.evaluate(Variable::value)
    }
}

/// Borrowed view used to render a node, including one that failed to build.
struct Rendered<'a> {
    op: BinaryOp,
    left: &'a Expr,
    right: &'a Expr,
}

impl Rendered<'_> {
    fn needs_parens(&self, operand: &Expr, is_right: bool) -> bool {
        let Expr::Binary(inner) = operand else {
            return false;
        };
        let is_sum = matches!(inner.op, BinaryOp::Add | BinaryOp::Sub);
        match self.op {
            BinaryOp::Mul => is_sum,
            BinaryOp::Sub => is_sum && is_right,
            BinaryOp::Add => false,
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_parens(self.left, false) {
            write!(f, "({})", self.left)?;
        } else {
            write!(f, "{}", self.left)?;
        }
        write!(f, " {} ", self.op.symbol())?;
        if self.needs_parens(self.right, true) {
            write!(f, "({})", self.right)
        } else {
            write!(f, "{}", self.right)
        }
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered {
            op: self.op,
            left: &self.left,
            right: &self.right,
        }
        .fmt(f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(c) => write!(f, "{c}"),
            Expr::Variable(v) => write!(f, "{v}"),
            Expr::Binary(b) => write!(f, "{b}"),
        }
    }
}

// Convenient From implementations for automatic conversion
impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Constant(f64::from(value))
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::Variable(var)
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Expr::Variable(var.clone())
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}
