use std::fmt;

use nalgebra::DMatrix;
use rand::Rng;

use crate::{echelon::EchelonForm, Bounded, Error, Limits};

/// How [`DenseMatrix::with_fill`] populates a new matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Zeros,
    Ones,
    /// Requires a square shape.
    Identity,
    /// Uniform integers in the active random bounds `[lower, upper)`.
    RandomInteger,
    /// Uniform reals in the active random bounds `[lower, upper)`.
    RandomReal,
}

/// A dense matrix whose shape and cells respect the [`Limits`] active when it was built.
///
/// The cells never change after construction. The echelon form is computed once by the
/// constructor and serves [`rank`](Self::rank) and [`determinant`](Self::determinant).
#[derive(Clone, Debug)]
pub struct DenseMatrix {
    cells: DMatrix<f64>,
    echelon: EchelonForm,
}

impl DenseMatrix {
    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    /// * [`Error::InvalidSize`] if there are no rows, the rows are empty, or either dimension is
    ///   larger than [`Limits::max_dimension`].
    /// * [`Error::RaggedRows`] if the rows differ in length.
    /// * [`Error::CellValueOverflow`] if any value is out of bounds.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, Error>
    where
        R: AsRef<[f64]>,
    {
        let limits = Limits::current();
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        limits.check_dimensions(nrows, ncols)?;

        for (row, values) in rows.iter().enumerate() {
            let found = values.as_ref().len();
            if found != ncols {
                return Err(Error::RaggedRows {
                    row,
                    expected: ncols,
                    found,
                });
            }
        }

        let cells = DMatrix::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]);
        Self::from_grid(cells, &limits)
    }

    /// Builds a `rows` x `cols` matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, Error> {
        let limits = Limits::current();
        limits.check_dimensions(rows, cols)?;
        let value = Bounded::new(value, &limits)?;
        Self::from_grid(DMatrix::from_element(rows, cols, value.get()), &limits)
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        Self::filled(rows, cols, 0.0)
    }

    pub fn identity(n: usize) -> Result<Self, Error> {
        Self::with_fill(n, n, Fill::Identity)
    }

    /// Builds a matrix according to `fill`, drawing random values from the thread-local
    /// generator.
    pub fn with_fill(rows: usize, cols: usize, fill: Fill) -> Result<Self, Error> {
        Self::with_fill_rng(rows, cols, fill, &mut rand::thread_rng())
    }

    /// Same as [`with_fill`](Self::with_fill) with a caller-supplied generator.
    ///
    /// # Errors
    /// * [`Error::InvalidSize`] for a shape outside the limits.
    /// * [`Error::NonSquare`] for [`Fill::Identity`] with `rows != cols`.
    pub fn with_fill_rng<G>(rows: usize, cols: usize, fill: Fill, rng: &mut G) -> Result<Self, Error>
    where
        G: Rng,
    {
        let limits = Limits::current();
        limits.check_dimensions(rows, cols)?;

        let (lower, upper) = limits.random_bounds();
        let cells = match fill {
            Fill::Zeros => DMatrix::zeros(rows, cols),
            Fill::Ones => DMatrix::from_element(rows, cols, 1.0),
            Fill::Identity => {
                if rows != cols {
                    return Err(Error::NonSquare { rows, cols });
                }
                DMatrix::identity(rows, cols)
            }
            Fill::RandomInteger => {
                DMatrix::from_fn(rows, cols, |_, _| rng.gen_range(lower..upper) as f64)
            }
            Fill::RandomReal => {
                DMatrix::from_fn(rows, cols, |_, _| rng.gen_range(lower as f64..upper as f64))
            }
        };

        Self::from_grid(cells, &limits)
    }

    /// Validates `cells` against `limits` and triangulates them. Every stored cell has passed
    /// through [`Bounded`].
    pub(crate) fn from_grid(cells: DMatrix<f64>, limits: &Limits) -> Result<Self, Error> {
        let (nrows, ncols) = cells.shape();
        limits.check_dimensions(nrows, ncols)?;
        let values = cells
            .iter()
            .map(|&v| Bounded::new(v, limits).map(f64::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::triangulated(DMatrix::from_vec(nrows, ncols, values)))
    }

    fn triangulated(cells: DMatrix<f64>) -> Self {
        let echelon = EchelonForm::triangulate(&cells);
        DenseMatrix { cells, echelon }
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.cells.shape()
    }

    pub fn is_square(&self) -> bool {
        self.cells.is_square()
    }

    /// Returns the value at (`row`, `col`), zero-based.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, Error> {
        self.cells
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Number of linearly independent rows.
    pub fn rank(&self) -> usize {
        self.echelon.rank()
    }

    /// Sum of the main diagonal of a square matrix.
    pub fn trace(&self) -> Result<f64, Error> {
        if !self.is_square() {
            return Err(Error::NonSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.cells.trace())
    }

    pub fn transpose(&self) -> DenseMatrix {
        Self::triangulated(self.cells.transpose())
    }

    pub fn column(&self, col: usize) -> Result<Vec<f64>, Error> {
        if col >= self.cols() {
            return Err(Error::IndexOutOfRange {
                row: 0,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.cells.column(col).iter().copied().collect())
    }

    /// Returns a copy of this matrix with column `col` replaced by `values`.
    pub fn replace_column(&self, col: usize, values: &[f64]) -> Result<DenseMatrix, Error> {
        if col >= self.cols() {
            return Err(Error::IndexOutOfRange {
                row: 0,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        if values.len() != self.rows() {
            return Err(Error::InvalidSize {
                rows: values.len(),
                cols: 1,
                max: self.rows(),
            });
        }

        let mut cells = self.cells.clone();
        cells
            .column_mut(col)
            .iter_mut()
            .zip(values)
            .for_each(|(cell, &v)| *cell = v);
        Self::from_grid(cells, &Limits::current())
    }

    /// Iterates over the rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.cells
            .row_iter()
            .map(|row| row.iter().copied().collect())
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().collect()
    }

    /// Returns an owned copy of the cells.
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        self.cells.clone()
    }

    pub(crate) fn cells(&self) -> &DMatrix<f64> {
        &self.cells
    }

    pub(crate) fn echelon(&self) -> &EchelonForm {
        &self.echelon
    }
}

impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.row_iter() {
            write!(f, "| ")?;
            for v in row.iter() {
                write!(f, "{:>10.2}", v)?;
            }
            writeln!(f, " |")?;
        }
        Ok(())
    }
}
