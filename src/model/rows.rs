//! Rows of a canonical model: objective, constraints and variable bounds.

use std::fmt;
use std::str::FromStr;

use crate::error::LpError;

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }

    /// Check if this is a minimization.
    pub fn is_minimize(self) -> bool {
        matches!(self, Sense::Minimize)
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sense {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimize" => Ok(Sense::Minimize),
            "max" | "maximize" => Ok(Sense::Maximize),
            _ => Err(LpError::InvalidSense(s.to_string())),
        }
    }
}

/// Relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `==`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "==",
            Relation::Ge => ">=",
            Relation::Le => "<=",
        }
    }

    /// Integer code passed to the solver.
    pub fn code(self) -> i32 {
        match self {
            Relation::Eq => 0,
            Relation::Ge => 1,
            Relation::Le => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Relation::Eq),
            1 => Some(Relation::Ge),
            2 => Some(Relation::Le),
            _ => None,
        }
    }

    /// Check `lhs rel rhs` up to `tol`.
    pub fn holds(self, lhs: f64, rhs: f64, tol: f64) -> bool {
        match self {
            Relation::Eq => (lhs - rhs).abs() <= tol,
            Relation::Ge => lhs >= rhs - tol,
            Relation::Le => lhs <= rhs + tol,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relation {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" => Ok(Relation::Eq),
            ">=" => Ok(Relation::Ge),
            "<=" => Ok(Relation::Le),
            _ => Err(LpError::InvalidRelation(s.to_string())),
        }
    }
}

/// Linear objective `sense coefficients . x + constant`.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub coefficients: Vec<f64>,
    pub sense: Sense,
    /// Constant offset; does not affect the optimal point.
    pub constant: f64,
}

impl Objective {
    pub fn new(coefficients: Vec<f64>, sense: Sense) -> Self {
        Objective {
            coefficients,
            sense,
            constant: 0.0,
        }
    }

    pub fn minimize(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients, Sense::Minimize)
    }

    pub fn maximize(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients, Sense::Maximize)
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Objective value at `x`, in the model's own sense.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        dot(&self.coefficients, x) + self.constant
    }

    /// Coefficients of the equivalent minimization.
    pub fn minimization_coefficients(&self) -> Vec<f64> {
        match self.sense {
            Sense::Minimize => self.coefficients.clone(),
            Sense::Maximize => self.coefficients.iter().map(|c| -c).collect(),
        }
    }
}

/// Linear constraint `coefficients . x  relation  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
        Constraint {
            coefficients,
            relation,
            rhs,
        }
    }

    /// Create an equality constraint.
    pub fn eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self::new(coefficients, Relation::Eq, rhs)
    }

    /// Create a `<=` constraint.
    pub fn leq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self::new(coefficients, Relation::Le, rhs)
    }

    /// Create a `>=` constraint.
    pub fn geq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self::new(coefficients, Relation::Ge, rhs)
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Left-hand side at `x`.
    pub fn lhs(&self, x: &[f64]) -> f64 {
        dot(&self.coefficients, x)
    }

    pub fn is_satisfied(&self, x: &[f64], tol: f64) -> bool {
        self.relation.holds(self.lhs(x), self.rhs, tol)
    }
}

/// Box bound on one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Bound { lower, upper }
    }

    /// `[0, +inf)`.
    pub fn nonneg() -> Self {
        Bound::new(0.0, f64::INFINITY)
    }

    /// `(-inf, +inf)`.
    pub fn free() -> Self {
        Bound::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn fixed(value: f64) -> Self {
        Bound::new(value, value)
    }

    pub fn contains(&self, v: f64, tol: f64) -> bool {
        v >= self.lower - tol && v <= self.upper + tol
    }
}

impl Default for Bound {
    fn default() -> Self {
        Bound::nonneg()
    }
}

impl From<(f64, f64)> for Bound {
    fn from((lower, upper): (f64, f64)) -> Self {
        Bound::new(lower, upper)
    }
}

impl From<Bound> for (f64, f64) {
    fn from(b: Bound) -> Self {
        (b.lower, b.upper)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_codes() {
        for rel in [Relation::Eq, Relation::Ge, Relation::Le] {
            assert_eq!(Relation::from_code(rel.code()), Some(rel));
            assert_eq!(rel.symbol().parse::<Relation>().unwrap(), rel);
        }
        assert_eq!(Relation::from_code(3), None);
    }

    #[test]
    fn test_invalid_literals() {
        assert!(matches!(
            "=<".parse::<Relation>(),
            Err(LpError::InvalidRelation(_))
        ));
        assert!(matches!(
            "best".parse::<Sense>(),
            Err(LpError::InvalidSense(_))
        ));
        assert_eq!("max".parse::<Sense>().unwrap(), Sense::Maximize);
        assert_eq!("Minimize".parse::<Sense>().unwrap(), Sense::Minimize);
    }

    #[test]
    fn test_minimization_coefficients() {
        let obj = Objective::maximize(vec![1.0, -2.0]);
        assert_eq!(obj.minimization_coefficients(), vec![-1.0, 2.0]);
        let obj = Objective::minimize(vec![1.0, -2.0]);
        assert_eq!(obj.minimization_coefficients(), vec![1.0, -2.0]);
    }

    #[test]
    fn test_constraint_satisfaction() {
        let c = Constraint::leq(vec![1.0, 1.0], 10.0);
        assert!(c.is_satisfied(&[4.0, 6.0], 1e-9));
        assert!(!c.is_satisfied(&[4.0, 6.1], 1e-9));
        let c = Constraint::eq(vec![2.0], 4.0);
        assert!(c.is_satisfied(&[2.0], 1e-9));
    }
}
