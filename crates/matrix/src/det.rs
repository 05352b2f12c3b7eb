use log::trace;

use crate::{DenseMatrix, Error};

/// Exponent range kept by the running mantissa before it is renormalized.
const RESCALE_EXPONENT: i32 = 512;

impl DenseMatrix {
    /// Returns the determinant of a square matrix.
    ///
    /// Orders 1 and 2 use the closed forms; larger orders multiply the diagonal of the cached
    /// echelon form and apply the sign of its row swaps. A matrix whose echelon form has a zero
    /// row has a determinant of exactly `0.0`, whatever its order.
    ///
    /// The diagonal product is accumulated as a mantissa and a power-of-two exponent, so
    /// intermediate products cannot overflow. If the final value is not a finite `f64` this
    /// returns [`Error::DeterminantOverflow`].
    pub fn determinant(&self) -> Result<f64, Error> {
        let n = self.rows();
        if n != self.cols() {
            return Err(Error::NonSquare {
                rows: n,
                cols: self.cols(),
            });
        }

        if self.echelon().rank() < n {
            return Ok(0.0);
        }

        let cells = self.cells();
        let det = match n {
            1 => cells[(0, 0)],
            2 => cells[(0, 0)] * cells[(1, 1)] - cells[(0, 1)] * cells[(1, 0)],
            _ => {
                let echelon = self.echelon();
                scaled_product(echelon.diagonal()) * echelon.sign()
            }
        };

        if det.is_finite() {
            Ok(det)
        } else {
            Err(Error::DeterminantOverflow)
        }
    }
}

/// Multiplies `values` keeping the running product as `mantissa * 2^exponent`.
fn scaled_product<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut mantissa = 1.0_f64;
    let mut exponent = 0_i32;

    for v in values {
        mantissa *= v;
        if mantissa == 0.0 || !mantissa.is_finite() {
            return mantissa;
        }
        let e = mantissa.abs().log2().floor() as i32;
        if e.abs() >= RESCALE_EXPONENT {
            mantissa *= pow2(-e);
            exponent += e;
        }
    }

    if exponent != 0 {
        trace!("determinant rescaled: mantissa={:e}, exponent={}", mantissa, exponent);
    }
    ldexp(mantissa, exponent)
}

/// `2^e` for exponents inside the normal range of f64.
fn pow2(e: i32) -> f64 {
    2.0_f64.powi(e)
}

/// `x * 2^e`, applied in steps so that `2^e` itself never leaves the f64 range.
fn ldexp(mut x: f64, mut e: i32) -> f64 {
    const STEP: i32 = 1000;
    while e > STEP {
        x *= pow2(STEP);
        e -= STEP;
        if x.is_infinite() {
            return x;
        }
    }
    while e < -STEP {
        x *= pow2(-STEP);
        e += STEP;
        if x == 0.0 {
            return x;
        }
    }
    x * pow2(e)
}
