use std::{cmp::Ordering, marker::PhantomData, ops::Add};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// # Examples
///
/// ```
/// use airco_core::constraint::NonNegative;
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// let m = NonNegative::new(MassRate::new::<kilogram_per_second>(1.2)).unwrap();
/// assert_eq!(m.as_ref().get::<kilogram_per_second>(), 1.2);
///
/// assert!(NonNegative::new(-0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs `Constrained<T, NonNegative>` if the value is zero or greater.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::Negative`] if the value is less than zero.
    /// - [`ConstraintError::NotANumber`] if the comparison is undefined.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained::<T, NonNegative> {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            None => Err(ConstraintError::NotANumber),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            Some(Ordering::Equal | Ordering::Greater) => Ok(()),
        }
    }
}

impl<T: PartialOrd + Zero> Add for Constrained<T, NonNegative> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Zero for Constrained<T, NonNegative> {
    fn zero() -> Self {
        NonNegative::zero()
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};

    #[test]
    fn accepts_zero_and_positive() {
        assert!(NonNegative::new(0.0).is_ok());
        assert!(NonNegative::new(3.5).is_ok());
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert_eq!(NonNegative::new(-1.0), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn sums_mass_rates() {
        let total: Constrained<MassRate, NonNegative> = [0.5, 1.25, 2.0]
            .into_iter()
            .map(|m| NonNegative::new(MassRate::new::<kilogram_per_second>(m)))
            .collect::<Result<Vec<_>, _>>()
            .expect("all rates are non-negative")
            .into_iter()
            .sum();
        assert_relative_eq!(total.into_inner().get::<kilogram_per_second>(), 3.75);
    }
}
