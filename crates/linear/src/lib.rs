mod cramer;
mod dense;
mod traits;

pub use cramer::{solve_linear_system, Cramer};
pub use dense::Dense;
pub use traits::LSolver;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("A {rows}x{cols} matrix and a vector of length {len} do not form a square system")]
    InvalidSize { rows: usize, cols: usize, len: usize },

    #[error("The coefficient matrix is singular (det = 0)")]
    SingularSystem,

    #[error("A singular matrix was encountered during a LU factorization (col {col})")]
    LUFactFail { col: usize },

    #[error(transparent)]
    Matrix(#[from] matrix::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    /// Ratios of determinants
    Cramer,
    /// LU factorization with partial pivoting
    Elimination,
}
