//! Solver interface.
//!
//! This module provides:
//! - `SolveStatus` - the exit-status taxonomy with stable codes
//! - `SolverInput` / `SolverOutput` - the call contract of an LP engine
//! - `LpSolver` - the trait any engine implements
//! - Clarabel solver integration

pub mod clarabel;
pub mod status;
pub mod stuffing;

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::error::{LpError, Result};
use crate::expr::Variable;
use crate::model::{LinearProgram, Relation, Sense};

pub use self::clarabel::ClarabelSolver;
pub use status::SolveStatus;
pub use stuffing::{stuff_problem, ConeDims, StuffedProblem};

/// Entering-variable rule for simplex-style engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Smallest-index rule; never cycles.
    #[default]
    Bland,
    /// Most negative reduced cost.
    Dantzig,
}

impl fmt::Display for PivotRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PivotRule::Bland => f.write_str("bland"),
            PivotRule::Dantzig => f.write_str("dantzig"),
        }
    }
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum iterations.
    pub max_iter: u32,
    pub pivot_rule: PivotRule,
    /// Time limit in seconds.
    pub time_limit: f64,
    /// Absolute tolerance.
    pub tol_gap_abs: f64,
    /// Relative tolerance.
    pub tol_gap_rel: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbose: false,
            max_iter: 1000,
            pivot_rule: PivotRule::Bland,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
        }
    }
}

impl Settings {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn max_iter(mut self, max_iter: u32) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn pivot_rule(mut self, rule: PivotRule) -> Self {
        self.pivot_rule = rule;
        self
    }

    pub fn time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn tolerances(mut self, abs: f64, rel: f64) -> Self {
        self.tol_gap_abs = abs;
        self.tol_gap_rel = rel;
        self
    }
}

/// One call to an LP engine: always a minimization.
#[derive(Debug, Clone)]
pub struct SolverInput {
    /// Number of constraint rows.
    pub m: usize,
    /// Number of variables.
    pub n: usize,
    pub max_iter: u32,
    pub pivot_rule: PivotRule,
    /// Per-variable `(lower, upper)`; `None` means all `x >= 0`.
    pub bounds: Option<Vec<(f64, f64)>>,
    /// Cost vector, already negated for maximization.
    pub objective: Vec<f64>,
    /// Constraint matrix (`m x n`).
    pub a: DMatrix<f64>,
    pub rhs: DVector<f64>,
    /// Relation code per row: `==` 0, `>=` 1, `<=` 2.
    pub relations: Vec<i32>,
}

impl SolverInput {
    /// Assemble the call for `program`.
    pub fn from_program(program: &LinearProgram, settings: &Settings) -> Self {
        SolverInput {
            m: program.num_constraints(),
            n: program.num_variables(),
            max_iter: settings.max_iter,
            pivot_rule: settings.pivot_rule,
            bounds: program
                .bounds()
                .map(|b| b.iter().map(|&b| <(f64, f64)>::from(b)).collect()),
            objective: program.objective().minimization_coefficients(),
            a: program.constraint_matrix(),
            rhs: program.rhs(),
            relations: program.relation_codes(),
        }
    }

    /// Status a well-behaved engine reports without iterating, if any.
    ///
    /// Inconsistent shapes and unknown relation codes give
    /// [`SolveStatus::CondUnsatisfied`]; a bound with `lower > upper` gives
    /// [`SolveStatus::Infeasibility`].
    pub fn check(&self) -> Option<SolveStatus> {
        let shapes_ok = self.a.shape() == (self.m, self.n)
            && self.rhs.len() == self.m
            && self.relations.len() == self.m
            && self.objective.len() == self.n
            && self.bounds.as_ref().map_or(true, |b| b.len() == self.n);
        let codes_ok = self
            .relations
            .iter()
            .all(|&c| Relation::from_code(c).is_some());
        let bounds_ok = self
            .effective_bounds()
            .iter()
            .all(|&(lo, hi)| lo <= hi);
        if !shapes_ok || !codes_ok {
            Some(SolveStatus::CondUnsatisfied)
        } else if !bounds_ok {
            Some(SolveStatus::Infeasibility)
        } else {
            None
        }
    }

    /// Bounds with the implicit `[0, +inf)` filled in.
    pub fn effective_bounds(&self) -> Vec<(f64, f64)> {
        match &self.bounds {
            Some(b) => b.clone(),
            None => vec![(0.0, f64::INFINITY); self.n],
        }
    }
}

/// Result of one engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    /// Primal point; meaningful only on success.
    pub x: Vec<f64>,
    pub status: SolveStatus,
    pub iterations: u32,
}

/// An LP engine honoring the [`SolverInput`] contract.
pub trait LpSolver {
    /// Short backend name used in log events.
    fn name(&self) -> &'static str;

    /// Run one minimization.
    ///
    /// A non-success status is reported through [`SolverOutput::status`];
    /// `Err` is reserved for failures to set the engine up.
    fn solve(&self, input: &SolverInput, settings: &Settings) -> Result<SolverOutput>;
}

/// Optimal point of a linear program.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Always [`SolveStatus::Success`].
    pub status: SolveStatus,
    /// Primal values in column order.
    pub x: Vec<f64>,
    /// Objective value in the program's own sense, offset included.
    pub value: f64,
    pub iterations: u32,
    variables: Vec<Variable>,
}

impl Solution {
    /// Attach the variable handles the columns were built from.
    pub(crate) fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }

    /// Value of column `idx`.
    pub fn get(&self, idx: usize) -> Option<f64> {
        self.x.get(idx).copied()
    }

    /// Value of `var` when the program was built from expressions.
    pub fn value_of(&self, var: &Variable) -> Option<f64> {
        self.variables
            .iter()
            .position(|v| v.same_as(var))
            .and_then(|idx| self.get(idx))
    }
}

impl LinearProgram {
    /// Solve with the default backend and settings.
    pub fn solve(&self) -> Result<Solution> {
        self.solve_with(&ClarabelSolver, &Settings::default())
    }

    /// Solve with `solver`.
    ///
    /// Any status other than success is returned as
    /// [`LpError::Solver`] carrying that status.
    pub fn solve_with<S: LpSolver + ?Sized>(
        &self,
        solver: &S,
        settings: &Settings,
    ) -> Result<Solution> {
        let input = SolverInput::from_program(self, settings);
        tracing::debug!(
            component = "solver",
            operation = "dispatch",
            backend = solver.name(),
            m = input.m,
            n = input.n,
            maximize = matches!(self.sense(), Sense::Maximize),
            "Dispatching linear program"
        );

        let output = solver.solve(&input, settings)?;
        tracing::debug!(
            component = "solver",
            operation = "solve",
            backend = solver.name(),
            status = output.status.as_str(),
            iterations = output.iterations,
            "Solver finished"
        );
        if !output.status.is_success() {
            return Err(LpError::Solver(output.status));
        }
        if output.x.len() != input.n {
            return Err(LpError::DimensionMismatch {
                what: "solution",
                expected: input.n,
                got: output.x.len(),
            });
        }

        let value = self.objective_value(&output.x);
        Ok(Solution {
            status: output.status,
            x: output.x,
            value,
            iterations: output.iterations,
            variables: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Constraint;

    /// Returns a fixed output regardless of the input.
    struct Scripted(SolverOutput);

    impl LpSolver for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn solve(&self, _input: &SolverInput, _settings: &Settings) -> Result<SolverOutput> {
            Ok(self.0.clone())
        }
    }

    fn program() -> LinearProgram {
        LinearProgram::build(
            vec![3.0, 1.0],
            Sense::Maximize,
            vec![Constraint::leq(vec![1.0, 1.0], 4.0)],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.verbose);
        assert_eq!(settings.max_iter, 1000);
        assert_eq!(settings.pivot_rule, PivotRule::Bland);
    }

    #[test]
    fn test_input_negates_maximize() {
        let input = SolverInput::from_program(&program(), &Settings::default());
        assert_eq!(input.objective, vec![-3.0, -1.0]);
        assert_eq!(input.relations, vec![2]);
        assert_eq!((input.m, input.n), (1, 2));
        assert!(input.bounds.is_none());
    }

    #[test]
    fn test_non_success_status_is_error() {
        let solver = Scripted(SolverOutput {
            x: vec![],
            status: SolveStatus::Infeasibility,
            iterations: 3,
        });
        let err = program()
            .solve_with(&solver, &Settings::default())
            .unwrap_err();
        assert!(matches!(err, LpError::Solver(SolveStatus::Infeasibility)));
    }

    #[test]
    fn test_value_in_program_sense() {
        let solver = Scripted(SolverOutput {
            x: vec![4.0, 0.0],
            status: SolveStatus::Success,
            iterations: 2,
        });
        let sol = program().solve_with(&solver, &Settings::default()).unwrap();
        assert_eq!(sol.value, 12.0);
        assert_eq!(sol.get(0), Some(4.0));
        assert_eq!(sol.get(2), None);
    }
}
