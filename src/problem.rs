//! Problem definition from expressions.
//!
//! Use the builder pattern to construct problems:
//! ```ignore
//! let lp = Problem::minimize(&x + 2.0 * &y)
//!     .subject_to([(&x + &y).leq(10.0)])
//!     .build()?;
//! ```
//!
//! Objective and constraints are linearized through one shared
//! [`VariablePool`], so column order is the order in which variables are
//! first met: objective first, then constraints in the order given.

use crate::canon::{linearize, VariablePool};
use crate::constraints::ExprConstraint;
use crate::error::Result;
use crate::expr::{Expr, Variable};
use crate::model::{Bound, Constraint, LinearProgram, Objective, Sense};
use crate::solver::{ClarabelSolver, LpSolver, Settings, Solution};

/// An optimization problem over expressions.
#[derive(Debug, Clone)]
pub struct Problem {
    /// The expression to optimize.
    pub objective: Expr,
    pub sense: Sense,
    /// The constraints.
    pub constraints: Vec<ExprConstraint>,
}

impl Problem {
    /// Create a minimization problem.
    pub fn minimize(expr: impl Into<Expr>) -> ProblemBuilder {
        ProblemBuilder::new(expr.into(), Sense::Minimize)
    }

    /// Create a maximization problem.
    pub fn maximize(expr: impl Into<Expr>) -> ProblemBuilder {
        ProblemBuilder::new(expr.into(), Sense::Maximize)
    }

    /// Linearize into a canonical program.
    pub fn to_linear_program(&self) -> Result<LinearProgram> {
        self.linearize().map(|(lp, _)| lp)
    }

    /// Distinct variables in column order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut pool = VariablePool::from_variables(&self.objective.variables());
        for c in &self.constraints {
            for v in c.variables() {
                pool.insert(&v);
            }
        }
        pool.variables().to_vec()
    }

    fn linearize(&self) -> Result<(LinearProgram, VariablePool)> {
        let mut pool = VariablePool::new();
        let objective = linearize(&self.objective, &mut pool)?;
        let mut rows = self
            .constraints
            .iter()
            .map(|c| c.linearize(&mut pool))
            .collect::<Result<Vec<Constraint>>>()?;

        // rows linearized early are shorter than the final pool
        let n = pool.len();
        for row in &mut rows {
            row.coefficients.resize(n, 0.0);
        }
        let mut coefficients = objective.coefficients;
        coefficients.resize(n, 0.0);

        let bounds = if pool.has_default_bounds() {
            None
        } else {
            Some(pool.bounds().into_iter().map(Bound::from).collect())
        };
        let objective = Objective::new(coefficients, self.sense).with_constant(objective.constant);

        let mut lp = LinearProgram::new(objective, rows, bounds)?
            .with_variable_names(pool.names())?;
        if pool.variables().iter().any(|v| v.kind().is_discrete()) {
            lp = lp.with_variable_kinds(pool.kinds())?;
        }
        tracing::debug!(
            component = "problem",
            operation = "linearize",
            status = "ok",
            variables = n,
            constraints = lp.num_constraints(),
            "Linearized problem"
        );
        Ok((lp, pool))
    }

    /// Solve the problem with default settings.
    pub fn solve(&self) -> Result<Solution> {
        self.solve_with(&ClarabelSolver, &Settings::default())
    }

    /// Solve the problem with a given backend and settings.
    pub fn solve_with<S: LpSolver + ?Sized>(
        &self,
        solver: &S,
        settings: &Settings,
    ) -> Result<Solution> {
        let (lp, pool) = self.linearize()?;
        let solution = lp.solve_with(solver, settings)?;
        Ok(solution.with_variables(pool.variables().to_vec()))
    }
}

/// Builder for constructing problems.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    objective: Expr,
    sense: Sense,
    constraints: Vec<ExprConstraint>,
}

impl ProblemBuilder {
    fn new(objective: Expr, sense: Sense) -> Self {
        ProblemBuilder {
            objective,
            sense,
            constraints: Vec::new(),
        }
    }

    /// Add constraints to the problem.
    pub fn subject_to(mut self, constraints: impl IntoIterator<Item = ExprConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Add a single constraint.
    pub fn constraint(mut self, c: ExprConstraint) -> Self {
        self.constraints.push(c);
        self
    }

    /// Finish without linearizing.
    pub fn problem(self) -> Problem {
        Problem {
            objective: self.objective,
            sense: self.sense,
            constraints: self.constraints,
        }
    }

    /// Linearize into a canonical program.
    pub fn build(self) -> Result<LinearProgram> {
        self.problem().to_linear_program()
    }

    /// Build and solve the problem with default settings.
    pub fn solve(self) -> Result<Solution> {
        self.problem().solve()
    }

    /// Build and solve the problem with a given backend and settings.
    pub fn solve_with<S: LpSolver + ?Sized>(
        self,
        solver: &S,
        settings: &Settings,
    ) -> Result<Solution> {
        self.problem().solve_with(solver, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintExt;
    use crate::error::LpError;
    use crate::expr::{variable, VarKind, VariableBuilder};
    use crate::model::Relation;

    #[test]
    fn test_build_simple_lp() {
        let x = variable("x");
        let y = variable("y");
        let lp = Problem::minimize(&x + 2.0 * &y)
            .subject_to([(&x + &y).leq(10.0)])
            .build()
            .unwrap();
        assert_eq!(lp.objective().coefficients, vec![1.0, 2.0]);
        assert_eq!(lp.constraints().len(), 1);
        assert_eq!(lp.constraints()[0].coefficients, vec![1.0, 1.0]);
        assert_eq!(lp.constraints()[0].relation, Relation::Le);
        assert_eq!(lp.constraints()[0].rhs, 10.0);
        assert!(lp.bounds().is_none());
        assert_eq!(lp.variable_names(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_constraint_variables_extend_columns() {
        let x = variable("x");
        let z = variable("z");
        let lp = Problem::maximize(&x)
            .subject_to([x.leq(4.0), (&x + &z).geq(1.0)])
            .build()
            .unwrap();
        assert_eq!(lp.objective().coefficients, vec![1.0, 0.0]);
        assert_eq!(lp.constraints()[0].coefficients, vec![1.0, 0.0]);
        assert_eq!(lp.constraints()[1].coefficients, vec![1.0, 1.0]);
    }

    #[test]
    fn test_objective_constant_kept() {
        let x = variable("x");
        let lp = Problem::minimize(&x + 7.0).build().unwrap();
        assert_eq!(lp.objective().constant, 7.0);
    }

    #[test]
    fn test_bounds_emitted_when_non_default() {
        let x = variable("x");
        let y = VariableBuilder::new().name("y").bounds(-1.0, 3.0).build();
        let lp = Problem::minimize(&x + &y).build().unwrap();
        let bounds = lp.bounds().unwrap();
        assert_eq!(bounds[0], Bound::nonneg());
        assert_eq!(bounds[1], Bound::new(-1.0, 3.0));
    }

    #[test]
    fn test_kinds_recorded_for_integer_variables() {
        let x = VariableBuilder::new().name("n").integer().build();
        let lp = Problem::minimize(&x).build().unwrap();
        assert_eq!(lp.variable_kinds(), Some(&[VarKind::Integer][..]));
    }

    #[test]
    fn test_non_linear_mul_rejected() {
        let x = variable("x");
        let y = variable("y");
        assert!(matches!(
            &x * &y,
            Err(LpError::NonLinearExpression { .. })
        ));
    }
}
