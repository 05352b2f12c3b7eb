//! Row echelon form by Gaussian elimination with partial pivoting.

use log::trace;
use nalgebra::DMatrix;

/// An entry produced by elimination is treated as zero when its magnitude is at most this
/// fraction of the magnitudes that were combined to produce it.
pub const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Row-reduced copy of a matrix, computed once per construction.
#[derive(Clone, Debug)]
pub(crate) struct EchelonForm {
    grid: DMatrix<f64>,
    /// number of row swaps performed, each of which flips the determinant's sign
    swaps: usize,
    /// number of rows that are entirely zero after reduction
    zero_rows: usize,
}

impl EchelonForm {
    /// Reduces a copy of `cells` to row echelon form.
    ///
    /// For each pivot column `j`, the row with the largest `|a(k, j)|` among the rows not yet used
    /// as pivots is selected. A column whose largest candidate is zero has no pivot and only the
    /// column index advances. Otherwise the pivot row is swapped into place and every row below
    /// it has a multiple of the pivot row subtracted.
    ///
    /// Alongside the grid, `scale` holds for every entry the largest magnitude that has gone
    /// into it. An updated entry at or below `RELATIVE_TOLERANCE * scale` is cancellation noise
    /// and is snapped to zero. Cells never touched by elimination are kept as they are, however
    /// small.
    pub(crate) fn triangulate(cells: &DMatrix<f64>) -> Self {
        let mut grid = cells.clone();
        let mut scale = cells.map(f64::abs);
        let (m, n) = grid.shape();

        let mut swaps = 0;
        let mut i = 0;
        let mut j = 0;

        while i < m && j < n {
            // find l = pivot row number
            let mut l = i;
            for k in (i + 1)..m {
                if grid[(k, j)].abs() > grid[(l, j)].abs() {
                    l = k;
                }
            }

            if grid[(l, j)] == 0.0 {
                j += 1;
                continue;
            }

            if l != i {
                grid.swap_rows(i, l);
                scale.swap_rows(i, l);
                swaps += 1;
            }

            // row_k = row_k - [a(k,j)/a(i,j)] row_i, k=i+1, ..., m-1
            let pivot = grid[(i, j)];
            for k in (i + 1)..m {
                let mult = grid[(k, j)] / pivot;
                grid[(k, j)] = 0.0;
                if mult == 0.0 {
                    continue;
                }
                for c in (j + 1)..n {
                    let v = grid[(k, c)] - mult * grid[(i, c)];
                    let s = scale[(k, c)].max(mult.abs() * scale[(i, c)]);
                    scale[(k, c)] = s;
                    grid[(k, c)] = snap(v, s);
                }
            }

            i += 1;
            j += 1;
        }

        let zero_rows = grid
            .row_iter()
            .filter(|row| row.iter().all(|&v| v == 0.0))
            .count();

        trace!(
            "triangulated {}x{}: swaps={}, zero_rows={}",
            m,
            n,
            swaps,
            zero_rows
        );

        EchelonForm {
            grid,
            swaps,
            zero_rows,
        }
    }

    pub(crate) fn rank(&self) -> usize {
        self.grid.nrows() - self.zero_rows
    }

    /// `-1.0` for an odd number of row swaps, `1.0` otherwise.
    pub(crate) fn sign(&self) -> f64 {
        if self.swaps % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    pub(crate) fn diagonal(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.grid.nrows().min(self.grid.ncols());
        (0..n).map(move |k| self.grid[(k, k)])
    }
}

/// `0.0` if `v` is within the relative tolerance of `scale`, `v` otherwise.
fn snap(v: f64, scale: f64) -> f64 {
    if v.abs() <= RELATIVE_TOLERANCE * scale {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;

    use super::*;

    #[test]
    fn test_upper_triangular() {
        let cells = dmatrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
            7.0, 8.0, 10.0;
        ];
        let ef = EchelonForm::triangulate(&cells);
        for i in 0..3 {
            for j in 0..i {
                assert_eq!(ef.grid[(i, j)], 0.0);
            }
        }
        // the largest entry of the first column becomes the first pivot
        assert_eq!(ef.grid[(0, 0)], 7.0);
        assert_eq!(ef.rank(), 3);
        let det: f64 = ef.sign() * ef.diagonal().product::<f64>();
        assert_relative_eq!(det, -3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_singular_rows_are_zeroed() {
        let cells = dmatrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
            7.0, 8.0, 9.0;
        ];
        let ef = EchelonForm::triangulate(&cells);
        assert_eq!(ef.rank(), 2);
        assert_eq!(ef.zero_rows, 1);
    }

    #[test]
    fn test_column_without_pivot() {
        let cells = dmatrix![
            0.0, 1.0, 2.0;
            0.0, 2.0, 4.0;
        ];
        let ef = EchelonForm::triangulate(&cells);
        assert_eq!(ef.rank(), 1);
        assert_eq!(ef.grid[(0, 0)], 0.0);
        assert_eq!(ef.grid[(0, 1)], 2.0);
        assert_eq!(ef.grid.row(1).iter().filter(|&&v| v != 0.0).count(), 0);
    }

    #[test]
    fn test_swap_sign() {
        let cells = dmatrix![
            0.0, 1.0;
            1.0, 0.0;
        ];
        let ef = EchelonForm::triangulate(&cells);
        assert_eq!(ef.swaps, 1);
        assert_eq!(ef.sign(), -1.0);
    }

    #[test]
    fn test_zero_matrix() {
        let ef = EchelonForm::triangulate(&DMatrix::zeros(3, 4));
        assert_eq!(ef.rank(), 0);
        assert_eq!(ef.swaps, 0);
    }

    #[test]
    fn test_small_cells_are_not_noise() {
        let ef = EchelonForm::triangulate(&dmatrix![
            99999.0, 0.0;
            0.0, 1e-8;
        ]);
        assert_eq!(ef.rank(), 2);
        assert_eq!(ef.diagonal().collect::<Vec<_>>(), vec![99999.0, 1e-8]);

        let ef = EchelonForm::triangulate(&dmatrix![
            1.0, 0.0, 0.0;
            0.0, 1.0, 0.0;
            0.0, 0.0, 1e-13;
        ]);
        assert_eq!(ef.rank(), 3);
    }

    #[test]
    fn test_cancellation_is_snapped() {
        // the last elimination step leaves about 1e-16 of rounding error in a(2, 2)
        let ef = EchelonForm::triangulate(&dmatrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
            7.0, 8.0, 9.0;
        ]);
        assert_eq!(ef.grid[(2, 2)], 0.0);

        assert_eq!(snap(1e-17, 1.0), 0.0);
        assert_eq!(snap(1e-11, 1.0), 1e-11);
    }

    #[test]
    fn test_wide_and_tall() {
        let wide = EchelonForm::triangulate(&dmatrix![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(wide.rank(), 1);

        let tall = EchelonForm::triangulate(&dmatrix![1.0; 2.0; 3.0]);
        assert_eq!(tall.rank(), 1);
        assert_eq!(tall.grid[(0, 0)], 3.0);
    }
}
