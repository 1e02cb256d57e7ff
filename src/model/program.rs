//! The validated canonical linear program.

use nalgebra::{DMatrix, DVector};

use super::rows::{Bound, Constraint, Objective, Sense};
use crate::error::{LpError, Result};
use crate::expr::VarKind;

/// A linear program in canonical dense form.
///
/// Every constraint row and the bounds (when present) have exactly as many
/// entries as the objective. The only way to obtain a value is through
/// [`LinearProgram::new`] or [`LinearProgram::build`], both of which check
/// this.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    name: Option<String>,
    variable_names: Vec<String>,
    objective: Objective,
    constraints: Vec<Constraint>,
    bounds: Option<Vec<Bound>>,
    kinds: Option<Vec<VarKind>>,
}

impl LinearProgram {
    /// Validate and assemble a program.
    pub fn new(
        objective: Objective,
        constraints: Vec<Constraint>,
        bounds: Option<Vec<Bound>>,
    ) -> Result<Self> {
        let n = objective.len();
        for row in &constraints {
            check_len("constraint", n, row.len())?;
        }
        if let Some(bounds) = &bounds {
            check_len("bounds", n, bounds.len())?;
        }

        let program = LinearProgram {
            name: None,
            variable_names: (0..n).map(|i| format!("x{i}")).collect(),
            objective,
            constraints,
            bounds,
            kinds: None,
        };
        tracing::debug!(
            component = "model",
            operation = "build",
            status = "ok",
            variables = program.num_variables(),
            constraints = program.num_constraints(),
            bounded = program.bounds.is_some(),
            "Built linear program"
        );
        Ok(program)
    }

    /// Validate and assemble a program from raw parts.
    pub fn build(
        coefficients: Vec<f64>,
        sense: Sense,
        constraints: Vec<Constraint>,
        bounds: Option<Vec<Bound>>,
    ) -> Result<Self> {
        Self::new(Objective::new(coefficients, sense), constraints, bounds)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the generated `x{i}` column names.
    pub fn with_variable_names(mut self, names: Vec<String>) -> Result<Self> {
        check_len("variable names", self.num_variables(), names.len())?;
        self.variable_names = names;
        Ok(self)
    }

    pub fn with_variable_kinds(mut self, kinds: Vec<VarKind>) -> Result<Self> {
        check_len("variable kinds", self.num_variables(), kinds.len())?;
        self.kinds = Some(kinds);
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.objective.sense
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Explicit bounds; `None` means every variable is `>= 0`.
    pub fn bounds(&self) -> Option<&[Bound]> {
        self.bounds.as_deref()
    }

    /// Per-variable kinds when any were recorded.
    pub fn variable_kinds(&self) -> Option<&[VarKind]> {
        self.kinds.as_deref()
    }

    /// Bounds with the implicit `[0, +inf)` filled in.
    pub fn effective_bounds(&self) -> Vec<Bound> {
        match &self.bounds {
            Some(b) => b.clone(),
            None => vec![Bound::nonneg(); self.num_variables()],
        }
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Constraint matrix `A` (`m x n`).
    pub fn constraint_matrix(&self) -> DMatrix<f64> {
        let m = self.num_constraints();
        let n = self.num_variables();
        DMatrix::from_fn(m, n, |i, j| self.constraints[i].coefficients[j])
    }

    /// Right-hand side vector `b`.
    pub fn rhs(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.num_constraints(),
            self.constraints.iter().map(|c| c.rhs),
        )
    }

    /// Relation codes in row order.
    pub fn relation_codes(&self) -> Vec<i32> {
        self.constraints.iter().map(|c| c.relation.code()).collect()
    }

    /// Objective value at `x`, including the constant offset.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.evaluate(x)
    }

    /// Check every constraint and bound at `x` up to `tol`.
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.num_variables()
            && self.constraints.iter().all(|c| c.is_satisfied(x, tol))
            && self
                .effective_bounds()
                .iter()
                .zip(x)
                .all(|(b, &v)| b.contains(v, tol))
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(LpError::DimensionMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}
