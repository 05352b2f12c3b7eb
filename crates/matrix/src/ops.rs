//! Element-wise and matrix arithmetic. Every result is a new matrix validated against the
//! active [`Limits`].

use crate::{DenseMatrix, Error, Limits};

impl DenseMatrix {
    /// Cell-wise sum.
    ///
    /// # Errors
    /// * [`Error::SizeMismatch`] unless both operands have the same shape.
    /// * [`Error::CellValueOverflow`] if a sum is out of bounds.
    pub fn add(&self, rhs: &DenseMatrix) -> Result<DenseMatrix, Error> {
        self.check_same_shape(rhs)?;
        let cells = self.cells().zip_map(rhs.cells(), |a, b| a + b);
        DenseMatrix::from_grid(cells, &Limits::current())
    }

    /// Cell-wise difference `self - rhs`, with the same checks as [`add`](Self::add).
    pub fn subtract(&self, rhs: &DenseMatrix) -> Result<DenseMatrix, Error> {
        self.check_same_shape(rhs)?;
        let cells = self.cells().zip_map(rhs.cells(), |a, b| a - b);
        DenseMatrix::from_grid(cells, &Limits::current())
    }

    /// Multiplies every cell by `factor`.
    pub fn scalar_multiply(&self, factor: f64) -> Result<DenseMatrix, Error> {
        let cells = self.cells().map(|v| v * factor);
        DenseMatrix::from_grid(cells, &Limits::current())
    }

    /// Matrix product `self * rhs`.
    ///
    /// # Errors
    /// * [`Error::ProductSizeMismatch`] unless `self.cols() == rhs.rows()`.
    /// * [`Error::CellValueOverflow`] if an entry of the product is out of bounds.
    pub fn matrix_multiply(&self, rhs: &DenseMatrix) -> Result<DenseMatrix, Error> {
        if self.cols() != rhs.rows() {
            return Err(Error::ProductSizeMismatch {
                lhs_cols: self.cols(),
                rhs_rows: rhs.rows(),
            });
        }
        let cells = self.cells() * rhs.cells();
        DenseMatrix::from_grid(cells, &Limits::current())
    }

    fn check_same_shape(&self, rhs: &DenseMatrix) -> Result<(), Error> {
        if self.shape() == rhs.shape() {
            Ok(())
        } else {
            Err(Error::SizeMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            })
        }
    }
}
