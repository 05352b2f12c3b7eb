use std::sync::{PoisonError, RwLock};

use log::warn;

use crate::Error;

static CURRENT: RwLock<Limits> = RwLock::new(Limits::DEFAULT);

/// Process-wide bounds consulted by every matrix construction and operation.
///
/// The active value is only replaced through [`Limits::install`]; the kernel itself never
/// changes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    /// maximum number of rows or columns
    max_dimension: usize,
    /// maximum absolute value of a single cell
    max_abs_value: f64,
    /// inclusive lower bound for random fills
    lower_random_bound: i64,
    /// exclusive upper bound for random fills
    upper_random_bound: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Limits {
    pub const DEFAULT: Limits = Limits {
        max_dimension: 20,
        max_abs_value: 99999.0,
        lower_random_bound: -100,
        upper_random_bound: 100,
    };

    /// Returns a copy of the active limits.
    pub fn current() -> Limits {
        *CURRENT.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the active limits, returning the previous ones.
    pub fn install(self) -> Limits {
        let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, self)
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    pub fn max_abs_value(&self) -> f64 {
        self.max_abs_value
    }

    /// The half-open range `[lower, upper)` random fills draw from.
    pub fn random_bounds(&self) -> (i64, i64) {
        (self.lower_random_bound, self.upper_random_bound)
    }

    pub fn with_max_dimension(self, max_dimension: usize) -> Result<Self, Error> {
        if max_dimension == 0 {
            return Err(Error::InvalidLimit {
                reason: "the maximum dimension must be at least 1",
            });
        }
        Ok(Self {
            max_dimension,
            ..self
        })
    }

    /// Sets the cell bound. The current random bounds must still fit inside it.
    pub fn with_max_abs_value(self, max_abs_value: f64) -> Result<Self, Error> {
        if !(max_abs_value.is_finite() && max_abs_value > 0.0) {
            return Err(Error::InvalidLimit {
                reason: "the maximum absolute value must be finite and positive",
            });
        }
        if !bounds_fit(self.lower_random_bound, self.upper_random_bound, max_abs_value) {
            warn!(
                "rejecting max_abs_value={} while random bounds are [{}, {})",
                max_abs_value, self.lower_random_bound, self.upper_random_bound
            );
            return Err(Error::InvalidLimit {
                reason: "the random bounds exceed the new maximum absolute value",
            });
        }
        Ok(Self {
            max_abs_value,
            ..self
        })
    }

    pub fn with_random_bounds(self, lower: i64, upper: i64) -> Result<Self, Error> {
        if upper <= lower {
            return Err(Error::InvalidLimit {
                reason: "the upper random bound must be strictly greater than the lower one",
            });
        }
        if !bounds_fit(lower, upper, self.max_abs_value) {
            return Err(Error::InvalidLimit {
                reason: "the random bounds exceed the maximum absolute value",
            });
        }
        Ok(Self {
            lower_random_bound: lower,
            upper_random_bound: upper,
            ..self
        })
    }

    pub(crate) fn check_dimensions(&self, rows: usize, cols: usize) -> Result<(), Error> {
        let range = 1..=self.max_dimension;
        if range.contains(&rows) && range.contains(&cols) {
            Ok(())
        } else {
            Err(Error::InvalidSize {
                rows,
                cols,
                max: self.max_dimension,
            })
        }
    }
}

fn bounds_fit(lower: i64, upper: i64, max_abs_value: f64) -> bool {
    (lower.unsigned_abs() as f64) <= max_abs_value && (upper.unsigned_abs() as f64) <= max_abs_value
}
