//! Clarabel solver integration.
//!
//! This module provides the interface to the Clarabel conic solver.

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};

use super::status::SolveStatus;
use super::stuffing::{stuff_problem, ConeDims};
use super::{LpSolver, PivotRule, Settings, SolverInput, SolverOutput};
use crate::error::{LpError, Result};
use crate::model::Relation;

impl From<SolverStatus> for SolveStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => SolveStatus::Success,
            SolverStatus::AlmostSolved => SolveStatus::PrecisionError,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                SolveStatus::Infeasibility
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                SolveStatus::Unboundedness
            }
            SolverStatus::MaxIterations | SolverStatus::MaxTime => SolveStatus::ExceedIterLimit,
            SolverStatus::NumericalError => SolveStatus::Singularity,
            SolverStatus::InsufficientProgress => SolveStatus::PrecisionError,
            _ => SolveStatus::CondUnsatisfied,
        }
    }
}

/// Interior-point backend built on Clarabel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelSolver;

impl LpSolver for ClarabelSolver {
    fn name(&self) -> &'static str {
        "clarabel"
    }

    fn solve(&self, input: &SolverInput, settings: &Settings) -> Result<SolverOutput> {
        if let Some(status) = input.check() {
            return Ok(SolverOutput {
                x: Vec::new(),
                status,
                iterations: 0,
            });
        }
        if input.pivot_rule != PivotRule::Bland {
            tracing::warn!(
                component = "solver",
                operation = "configure",
                backend = self.name(),
                pivot_rule = %input.pivot_rule,
                "Pivot rule has no effect on an interior-point backend"
            );
        }
        if input.n == 0 {
            return Ok(solve_empty(input));
        }

        let problem = stuff_problem(input)?;
        let p = to_clarabel_csc(&problem.p);
        let a = to_clarabel_csc(&problem.a);
        let cones = to_clarabel_cones(&problem.cone_dims);

        let clarabel_settings = DefaultSettingsBuilder::default()
            .verbose(settings.verbose)
            .max_iter(input.max_iter)
            .time_limit(settings.time_limit)
            .tol_gap_abs(settings.tol_gap_abs)
            .tol_gap_rel(settings.tol_gap_rel)
            .build()
            .map_err(|e| LpError::SolverSetup(e.to_string()))?;

        let mut solver =
            DefaultSolver::new(&p, &problem.q, &a, &problem.b, &cones, clarabel_settings);
        solver.solve();

        Ok(SolverOutput {
            x: solver.solution.x.clone(),
            status: solver.solution.status.into(),
            iterations: solver.info.iterations,
        })
    }
}

/// Reject calls whose shapes disagree with `m` and `n`.
/// Zero columns: every row reads `0 rel rhs`.
fn solve_empty(input: &SolverInput) -> SolverOutput {
    let feasible = input
        .relations
        .iter()
        .zip(input.rhs.iter())
        .all(|(&code, &rhs)| {
            Relation::from_code(code).map_or(false, |rel| rel.holds(0.0, rhs, 0.0))
        });
    SolverOutput {
        x: Vec::new(),
        status: if feasible {
            SolveStatus::Success
        } else {
            SolveStatus::Infeasibility
        },
        iterations: 0,
    }
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &nalgebra_sparse::CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

/// Convert cone dimensions to Clarabel cones.
fn to_clarabel_cones(dims: &ConeDims) -> Vec<SupportedConeT<f64>> {
    let mut cones = Vec::new();

    if dims.zero > 0 {
        cones.push(SupportedConeT::ZeroConeT(dims.zero));
    }

    if dims.nonneg > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(dims.nonneg));
    }

    cones
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, DVector};

    fn empty_input(relations: Vec<i32>, rhs: Vec<f64>) -> SolverInput {
        SolverInput {
            m: relations.len(),
            n: 0,
            max_iter: 10,
            pivot_rule: PivotRule::Bland,
            bounds: None,
            objective: vec![],
            a: DMatrix::zeros(relations.len(), 0),
            rhs: DVector::from_vec(rhs),
            relations,
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(SolveStatus::from(SolverStatus::Solved), SolveStatus::Success);
        assert_eq!(
            SolveStatus::from(SolverStatus::PrimalInfeasible),
            SolveStatus::Infeasibility
        );
        assert_eq!(
            SolveStatus::from(SolverStatus::DualInfeasible),
            SolveStatus::Unboundedness
        );
        assert_eq!(
            SolveStatus::from(SolverStatus::MaxIterations),
            SolveStatus::ExceedIterLimit
        );
    }

    #[test]
    fn test_to_clarabel_cones() {
        let cones = to_clarabel_cones(&ConeDims { zero: 2, nonneg: 3 });
        assert_eq!(cones.len(), 2);
        assert!(to_clarabel_cones(&ConeDims::default()).is_empty());
    }

    #[test]
    fn test_empty_program() {
        let out = ClarabelSolver
            .solve(&empty_input(vec![2], vec![1.0]), &Settings::default())
            .unwrap();
        assert_eq!(out.status, SolveStatus::Success);
        let out = ClarabelSolver
            .solve(&empty_input(vec![1], vec![1.0]), &Settings::default())
            .unwrap();
        assert_eq!(out.status, SolveStatus::Infeasibility);
    }

    #[test]
    fn test_bad_relation_code() {
        let out = ClarabelSolver
            .solve(&empty_input(vec![7], vec![0.0]), &Settings::default())
            .unwrap();
        assert_eq!(out.status, SolveStatus::CondUnsatisfied);
    }
}
