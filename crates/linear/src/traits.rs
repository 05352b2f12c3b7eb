use matrix::{Bounded, DenseMatrix, Limits};
use nalgebra::DVector;

use crate::{Error, SolverKind};

pub trait LSolver {
    fn get_type(&self) -> SolverKind;

    /// Solves the linear system `A x = b`.
    ///
    /// ## Arguments
    /// * `mat_a` the square coefficient matrix A.
    /// * `b` the right-hand side, one entry per row of A.
    ///
    /// ## Errors
    /// Every implementation first rejects a non-square `mat_a` or a `b` of the wrong length with
    /// [`Error::InvalidSize`], then an out-of-bounds entry of `b` with
    /// [`matrix::Error::CellValueOverflow`].
    fn solve(&self, mat_a: &DenseMatrix, b: &DVector<f64>) -> Result<DVector<f64>, Error>;
}

/// Input validation shared by all solvers.
pub(crate) fn check_system(mat_a: &DenseMatrix, b: &DVector<f64>) -> Result<(), Error> {
    let (rows, cols) = mat_a.shape();
    if rows != cols || b.len() != rows {
        return Err(Error::InvalidSize {
            rows,
            cols,
            len: b.len(),
        });
    }
    Bounded::check_all(b.iter(), &Limits::current())?;
    Ok(())
}
