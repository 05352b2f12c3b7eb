use proptest::prelude::*;

use crate::DenseMatrix;


/// Strategy for small integer-valued matrices of the given shape.
fn integer_matrix(rows: usize, cols: usize) -> impl Strategy<Value = DenseMatrix> {
    prop::collection::vec(prop::collection::vec(-50i32..50, cols), rows).prop_map(|rows| {
        let rows: Vec<Vec<f64>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(f64::from).collect())
            .collect();
        DenseMatrix::from_rows(&rows).unwrap()
    })
}

/// Strategy for square integer-valued matrices of order 1 to 6.
fn square_matrix() -> impl Strategy<Value = DenseMatrix> {
    (1usize..=6).prop_flat_map(|n| integer_matrix(n, n))
}

/// Strategy for integer-valued matrices of any shape up to 6x6.
fn any_matrix() -> impl Strategy<Value = DenseMatrix> {
    (1usize..=6, 1usize..=6).prop_flat_map(|(r, c)| integer_matrix(r, c))
}
