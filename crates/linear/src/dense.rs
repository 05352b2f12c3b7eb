//! Direct solver for dense systems: LU factorization followed by forward and back substitution.

use matrix::{DenseMatrix, RELATIVE_TOLERANCE};
use nalgebra::{DMatrix, DVector};

use crate::{traits::check_system, Error, LSolver, SolverKind};

#[derive(Clone, Copy, Debug, Default)]
pub struct Dense;

impl LSolver for Dense {
    fn get_type(&self) -> SolverKind {
        SolverKind::Elimination
    }

    fn solve(&self, mat_a: &DenseMatrix, b: &DVector<f64>) -> Result<DVector<f64>, Error> {
        check_system(mat_a, b)?;

        let mut lu = mat_a.to_dmatrix();
        let mut pivots = vec![0; lu.ncols()];
        dense_get_rf(&mut lu, &mut pivots).map_err(|col| Error::LUFactFail { col })?;

        let mut x = b.clone();
        dense_get_rs(&lu, &pivots, &mut x);
        Ok(x)
    }
}

/// Performs the LU factorization of the N by N matrix A.
///
/// This is done using standard Gaussian elimination with partial (row) pivoting.
///
/// A successful LU factorization leaves the matrix A and the pivot array p with the following
/// information:
///
/// 1. p[k] contains the row number of the pivot element chosen at the beginning of elimination
///     step k, k=0, 1, ..., N-1.
///
/// 2. If the unique LU factorization of A is given by PA = LU, where P is a permutation matrix,
///     L is a unit lower triangular matrix, and U is an upper triangular matrix, then the upper
///     triangular part of A (including its diagonal) contains U and the strictly lower
///     triangular part of A contains the multipliers, I-L.
///
/// An updated entry whose magnitude is at most [`RELATIVE_TOLERANCE`] times the largest
/// magnitude that went into it is set to zero. If the pivot chosen at step k is zero, this
/// returns the column (numbered from one) at which it was encountered.
fn dense_get_rf(mat_a: &mut DMatrix<f64>, pivot: &mut [usize]) -> Result<(), usize> {
    let n = mat_a.ncols();
    let mut scale = mat_a.map(f64::abs);

    // k-th elimination step number
    for k in 0..n {
        // find l = pivot row number
        let mut l = k;
        for i in (k + 1)..n {
            if mat_a[(i, k)].abs() > mat_a[(l, k)].abs() {
                l = i;
            }
        }
        pivot[k] = l;

        // check for zero pivot element
        if mat_a[(l, k)] == 0.0 {
            return Err(k + 1);
        }

        // swap a(k,1:n) and a(l,1:n) if necessary
        if l != k {
            mat_a.swap_rows(k, l);
            scale.swap_rows(k, l);
        }

        // Scale the elements below the diagonal in column k by 1.0 / a(k,k). After the above swap
        // a(k,k) holds the pivot element. This stores the pivot row multipliers a(i,k)/a(k,k) in
        // a(i,k), i=k+1, ..., n-1.
        let mult = mat_a[(k, k)].recip();
        for i in (k + 1)..n {
            mat_a[(i, k)] *= mult;
        }

        // row_i = row_i - [a(i,k)/a(k,k)] row_k, i=k+1, ..., n-1
        // The computation is done one column at a time, column j=k+1, ..., n-1.
        for j in (k + 1)..n {
            let a_kj = mat_a[(k, j)];
            if a_kj != 0.0 {
                for i in (k + 1)..n {
                    let a_ik = mat_a[(i, k)];
                    let v = mat_a[(i, j)] - a_kj * a_ik;
                    let s = scale[(i, j)].max((a_ik * scale[(k, j)]).abs());
                    scale[(i, j)] = s;
                    mat_a[(i, j)] = if v.abs() <= RELATIVE_TOLERANCE * s { 0.0 } else { v };
                }
            }
        }
    }

    Ok(())
}

/// Solves the N-dimensional system A x = b using the LU factorization in A and the pivot
/// information in p computed in `dense_get_rf`. The solution x is returned in b. This routine
/// cannot fail if the corresponding call to `dense_get_rf` did not fail.
fn dense_get_rs(mat_a: &DMatrix<f64>, pivot: &[usize], b: &mut DVector<f64>) {
    let n = mat_a.ncols();

    // Permute b, based on pivot information in p
    for (k, &pk) in pivot.iter().enumerate().take(n) {
        if pk != k {
            b.swap_rows(k, pk);
        }
    }

    // Solve Ly = b, store solution y in b
    for k in 0..(n - 1) {
        let bk = b[k];
        for i in (k + 1)..n {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }

    // Solve Ux = y, store solution x in b
    for k in (1..n).rev() {
        b[k] /= mat_a[(k, k)];
        let bk = b[k];
        for i in 0..k {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }
    b[0] /= mat_a[(0, 0)];
}
