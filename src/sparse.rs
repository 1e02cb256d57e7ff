//! Sparse matrix utilities.
//!
//! Helper functions for working with nalgebra-sparse matrices.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together; out-of-range entries are dropped.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    CscMatrix::from(&coo)
}

/// Create an empty CSC matrix.
pub fn csc_zeros(nrows: usize, ncols: usize) -> CscMatrix<f64> {
    CscMatrix::zeros(nrows, ncols)
}

/// Convert CSC to dense matrix.
pub fn csc_to_dense(sparse: &CscMatrix<f64>) -> DMatrix<f64> {
    let mut dense = DMatrix::zeros(sparse.nrows(), sparse.ncols());
    for (row, col, val) in sparse.triplet_iter() {
        dense[(row, col)] = *val;
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_from_triplets_sums_duplicates() {
        let m = csc_from_triplets(2, 2, vec![0, 0, 1], vec![1, 1, 0], vec![1.0, 2.0, 4.0]);
        let d = csc_to_dense(&m);
        assert_eq!(d[(0, 1)], 3.0);
        assert_eq!(d[(1, 0)], 4.0);
        assert_eq!(d[(0, 0)], 0.0);
    }

    #[test]
    fn test_csc_zeros() {
        let z = csc_zeros(3, 2);
        assert_eq!(z.nnz(), 0);
        assert_eq!((z.nrows(), z.ncols()), (3, 2));
    }
}
