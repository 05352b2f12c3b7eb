use crate::{Error, Limits};

/// A scalar whose magnitude is known to be within [`Limits::max_abs_value`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Bounded(f64);

impl Bounded {
    /// Fails with [`Error::CellValueOverflow`] when `|value|` exceeds the bound. NaN never passes.
    pub fn new(value: f64, limits: &Limits) -> Result<Self, Error> {
        let max = limits.max_abs_value();
        if value.abs() <= max {
            Ok(Bounded(value))
        } else {
            Err(Error::CellValueOverflow { value, max })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Checks every value, stopping at the first one out of bounds.
    pub fn check_all<'a, I>(values: I, limits: &Limits) -> Result<(), Error>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        values
            .into_iter()
            .try_for_each(|&v| Self::new(v, limits).map(|_| ()))
    }
}

impl From<Bounded> for f64 {
    fn from(value: Bounded) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let limits = Limits::default();
        assert_eq!(Bounded::new(99999.0, &limits).unwrap().get(), 99999.0);
        assert_eq!(Bounded::new(-99999.0, &limits).unwrap().get(), -99999.0);
        assert_eq!(
            Bounded::new(100000.0, &limits),
            Err(Error::CellValueOverflow {
                value: 100000.0,
                max: 99999.0
            })
        );
        assert!(Bounded::new(f64::NAN, &limits).is_err());
        assert!(Bounded::new(f64::NEG_INFINITY, &limits).is_err());
    }

    #[test]
    fn test_check_all() {
        let limits = Limits::default();
        assert!(Bounded::check_all(&[1.0, -2.0, 3.5], &limits).is_ok());
        assert!(matches!(
            Bounded::check_all(&[1.0, 1e6, f64::NAN], &limits),
            Err(Error::CellValueOverflow { value, .. }) if value == 1e6
        ));
    }
}
