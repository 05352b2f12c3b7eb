//! Cramer's rule: each unknown is a ratio of two determinants.
//!
//! Every column needs a fresh triangulation of an `n x n` matrix, so a solve costs O(n^4). With
//! the dimension capped by [`matrix::Limits`] that is at most a few hundred thousand
//! operations.

use log::trace;
use matrix::DenseMatrix;
use nalgebra::DVector;

use crate::{traits::check_system, Error, LSolver, SolverKind};

#[derive(Clone, Copy, Debug, Default)]
pub struct Cramer;

impl LSolver for Cramer {
    fn get_type(&self) -> SolverKind {
        SolverKind::Cramer
    }

    fn solve(&self, mat_a: &DenseMatrix, b: &DVector<f64>) -> Result<DVector<f64>, Error> {
        solve_linear_system(mat_a, b)
    }
}

/// Solves `A x = b` by Cramer's rule.
///
/// `x[k] = det(A_k) / det(A)`, where `A_k` is `A` with column `k` replaced by `b`.
///
/// # Errors
/// * [`Error::InvalidSize`] unless `A` is square and `b` has one entry per row.
/// * [`Error::Matrix`] wrapping [`matrix::Error::CellValueOverflow`] if an entry of `b` is out of
///   bounds.
/// * [`Error::SingularSystem`] if `det(A) == 0`.
pub fn solve_linear_system(mat_a: &DenseMatrix, b: &DVector<f64>) -> Result<DVector<f64>, Error> {
    check_system(mat_a, b)?;

    let det = mat_a.determinant()?;
    if det == 0.0 {
        return Err(Error::SingularSystem);
    }

    let n = mat_a.rows();
    let mut x = DVector::zeros(n);
    for k in 0..n {
        let det_k = mat_a.replace_column(k, b.as_slice())?.determinant()?;
        x[k] = det_k / det;
        trace!("cramer: col={} det_k={:e} det={:e}", k, det_k, det);
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    fn m<R: AsRef<[f64]>>(rows: &[R]) -> DenseMatrix {
        DenseMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_diagonal_system() {
        let a = m(&[[2.0, 0.0], [0.0, 2.0]]);
        let x = solve_linear_system(&a, &dvector![4.0, 6.0]).unwrap();
        assert_eq!(x, dvector![2.0, 3.0]);
    }

    #[test]
    fn test_singular_system() {
        let a = m(&[[1.0, 2.0], [2.0, 4.0]]);
        assert!(matches!(
            solve_linear_system(&a, &dvector![1.0, 2.0]),
            Err(Error::SingularSystem)
        ));
        assert!(matches!(
            solve_linear_system(&a, &dvector![0.0, 0.0]),
            Err(Error::SingularSystem)
        ));
    }

    #[test]
    fn test_badly_scaled_system() {
        let a = m(&[[99999.0, 0.0], [0.0, 1e-8]]);
        let x = solve_linear_system(&a, &dvector![99999.0, 1e-8]).unwrap();
        assert_relative_eq!(x, dvector![1.0, 1.0], max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_size() {
        let a = m(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(matches!(
            solve_linear_system(&a, &dvector![1.0, 2.0]),
            Err(Error::InvalidSize {
                rows: 2,
                cols: 3,
                len: 2
            })
        ));

        let a = m(&[[1.0, 0.0], [0.0, 1.0]]);
        assert!(matches!(
            solve_linear_system(&a, &dvector![1.0, 2.0, 3.0]),
            Err(Error::InvalidSize { len: 3, .. })
        ));
    }

    #[test]
    fn test_rhs_overflow() {
        let a = m(&[[1.0, 0.0], [0.0, 1.0]]);
        assert!(matches!(
            solve_linear_system(&a, &dvector![1.0, 1e6]),
            Err(Error::Matrix(matrix::Error::CellValueOverflow { .. }))
        ));
    }

    #[test]
    fn test_general_system() {
        let a = m(&[
            [5.0, 0.0, 0.0, 1.0],
            [2.0, 2.0, 2.0, 1.0],
            [4.0, 5.0, 5.0, 5.0],
            [1.0, 6.0, 4.0, 5.0],
        ]);
        let b = dvector![9.0, 16.0, 49.0, 45.0];
        let expected = dvector![1.0, 2.0, 3.0, 4.0];
        let x = Cramer.solve(&a, &b).unwrap();
        assert_relative_eq!(x, expected, max_relative = 1e-9);
        assert_eq!(Cramer.get_type(), SolverKind::Cramer);
    }
}
