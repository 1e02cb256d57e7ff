//! Matrix stuffing: converts a solver call into conic form.
//!
//! Clarabel solves `min q'x  s.t.  Ax + s = b, s in K`. Rows are laid out as
//! one zero cone (equalities) followed by one nonnegative cone holding the
//! `<=` rows, the negated `>=` rows, and the bound rows.

use nalgebra_sparse::CscMatrix;

use super::SolverInput;
use crate::error::{LpError, Result};
use crate::model::Relation;
use crate::sparse::{csc_from_triplets, csc_zeros};

/// Cone dimensions for Clarabel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows.
    pub nonneg: usize,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg
    }
}

/// Stuffed problem ready for Clarabel.
#[derive(Debug)]
pub struct StuffedProblem {
    /// Quadratic cost matrix P (n x n); always empty for an LP.
    pub p: CscMatrix<f64>,
    /// Linear cost vector q (n).
    pub q: Vec<f64>,
    /// Constraint matrix A (rows x n).
    pub a: CscMatrix<f64>,
    /// Constraint vector b.
    pub b: Vec<f64>,
    pub cone_dims: ConeDims,
}

/// Triplet accumulator for one cone block.
#[derive(Default)]
struct Block {
    rows: usize,
    entries: Vec<(usize, usize, f64)>,
    b: Vec<f64>,
}

impl Block {
    fn push_row(&mut self, coefficients: impl Iterator<Item = (usize, f64)>, rhs: f64) {
        let row = self.rows;
        self.entries.extend(
            coefficients
                .filter(|&(_, v)| v != 0.0)
                .map(|(col, v)| (row, col, v)),
        );
        self.b.push(rhs);
        self.rows += 1;
    }
}

/// Build the stuffed problem from a solver call.
///
/// Fails with [`LpError::Solver`] carrying the status of
/// [`SolverInput::check`] when the call is malformed.
pub fn stuff_problem(input: &SolverInput) -> Result<StuffedProblem> {
    if let Some(status) = input.check() {
        return Err(LpError::Solver(status));
    }
    let n = input.n;
    let mut zero = Block::default();
    let mut nonneg = Block::default();

    for (i, &code) in input.relations.iter().enumerate() {
        let row = input.a.row(i);
        let rhs = input.rhs[i];
        let coeffs = row.iter().copied().enumerate();
        match Relation::from_code(code) {
            Some(Relation::Eq) => zero.push_row(coeffs, rhs),
            Some(Relation::Le) => nonneg.push_row(coeffs, rhs),
            Some(Relation::Ge) => nonneg.push_row(coeffs.map(|(j, v)| (j, -v)), -rhs),
            None => {}
        }
    }

    // -x_j <= -lb and x_j <= ub for every finite bound
    for (j, (lower, upper)) in input.effective_bounds().into_iter().enumerate() {
        if lower.is_finite() {
            nonneg.push_row(std::iter::once((j, -1.0)), -lower);
        }
        if upper.is_finite() {
            nonneg.push_row(std::iter::once((j, 1.0)), upper);
        }
    }

    let cone_dims = ConeDims {
        zero: zero.rows,
        nonneg: nonneg.rows,
    };
    let offset = zero.rows;
    let (mut rows, mut cols, mut vals) = (Vec::new(), Vec::new(), Vec::new());
    let shifted = nonneg.entries.iter().map(|&(r, c, v)| (r + offset, c, v));
    for (r, c, v) in zero.entries.iter().copied().chain(shifted) {
        rows.push(r);
        cols.push(c);
        vals.push(v);
    }
    let a = csc_from_triplets(cone_dims.total(), n, rows, cols, vals);
    let mut b = zero.b;
    b.extend(nonneg.b);

    Ok(StuffedProblem {
        p: csc_zeros(n, n),
        q: input.objective.clone(),
        a,
        b,
        cone_dims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{PivotRule, SolveStatus};
    use nalgebra::{DMatrix, DVector};

    fn input(relations: Vec<i32>, bounds: Option<Vec<(f64, f64)>>) -> SolverInput {
        SolverInput {
            m: 2,
            n: 2,
            max_iter: 1000,
            pivot_rule: PivotRule::Bland,
            bounds,
            objective: vec![1.0, 2.0],
            a: DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 2.0, 0.0]),
            rhs: DVector::from_vec(vec![10.0, 3.0]),
            relations,
        }
    }

    #[test]
    fn test_cone_dims() {
        let dims = ConeDims { zero: 2, nonneg: 3 };
        assert_eq!(dims.total(), 5);
    }

    #[test]
    fn test_default_bounds_become_nonneg_rows() {
        let stuffed = stuff_problem(&input(vec![2, 0], None)).unwrap();
        assert_eq!(stuffed.cone_dims, ConeDims { zero: 1, nonneg: 3 });
        // equality first
        assert_eq!(stuffed.b, vec![3.0, 10.0, 0.0, 0.0]);
        assert_eq!(stuffed.a.nrows(), 4);
        assert_eq!(stuffed.p.nnz(), 0);
    }

    #[test]
    fn test_ge_rows_are_negated() {
        let free = vec![(f64::NEG_INFINITY, f64::INFINITY); 2];
        let stuffed = stuff_problem(&input(vec![1, 1], Some(free))).unwrap();
        assert_eq!(stuffed.cone_dims, ConeDims { zero: 0, nonneg: 2 });
        assert_eq!(stuffed.b, vec![-10.0, -3.0]);
        let dense = crate::sparse::csc_to_dense(&stuffed.a);
        assert_eq!(dense[(0, 0)], -1.0);
        assert_eq!(dense[(1, 0)], -2.0);
        assert_eq!(dense[(1, 1)], 0.0);
    }

    #[test]
    fn test_finite_bounds_only() {
        let bounds = vec![(1.0, 4.0), (f64::NEG_INFINITY, 5.0)];
        let stuffed = stuff_problem(&input(vec![2, 2], Some(bounds))).unwrap();
        assert_eq!(stuffed.cone_dims.nonneg, 2 + 3);
        assert_eq!(&stuffed.b[2..], &[-1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let extra_rows = input(vec![2, 2, 2], None);
        assert!(matches!(
            stuff_problem(&extra_rows),
            Err(LpError::Solver(SolveStatus::CondUnsatisfied))
        ));

        assert!(matches!(
            stuff_problem(&input(vec![2, 7], None)),
            Err(LpError::Solver(SolveStatus::CondUnsatisfied))
        ));

        let crossed = input(vec![2, 2], Some(vec![(3.0, 1.0), (0.0, 1.0)]));
        assert!(matches!(
            stuff_problem(&crossed),
            Err(LpError::Solver(SolveStatus::Infeasibility))
        ));
    }
}
