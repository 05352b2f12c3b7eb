//! Bounded dense matrices for the matrix calculator.
//!
//! Every [`DenseMatrix`] is validated against the process-wide [`Limits`] when it is built and
//! triangulated once, so rank and determinant queries never redo the elimination.

mod bounded;
mod dense;
mod det;
mod echelon;
mod limits;
mod ops;
#[cfg(test)]
mod tests;

pub use bounded::Bounded;
pub use dense::{DenseMatrix, Fill};
pub use echelon::RELATIVE_TOLERANCE;
pub use limits::Limits;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid matrix size {rows}x{cols}: each dimension must lie in 1..={max}")]
    InvalidSize { rows: usize, cols: usize, max: usize },

    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("The operation requires a square matrix, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },

    #[error("Cell value {value} exceeds the maximum absolute value {max}")]
    CellValueOverflow { value: f64, max: f64 },

    #[error("Cannot combine a {}x{} matrix with a {}x{} matrix", lhs.0, lhs.1, rhs.0, rhs.1)]
    SizeMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("Cannot multiply: left operand has {lhs_cols} columns, right operand has {rhs_rows} rows")]
    ProductSizeMismatch { lhs_cols: usize, rhs_rows: usize },

    #[error("Index ({row}, {col}) is outside a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("The determinant is outside the range of f64")]
    DeterminantOverflow,

    #[error("Invalid limit: {reason}")]
    InvalidLimit { reason: &'static str },
}
