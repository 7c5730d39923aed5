//! Numeric invariants carried in the type of a value.
//!
//! A mass flow that must not be negative or a fan efficiency in `(0, 1]` is
//! checked once, when its [`Constrained`] wrapper is built. Code that
//! receives the wrapper does not check it again.
//!
//! Markers:
//!
//! - [`NonNegative`]: `x >= 0`
//! - [`StrictlyPositive`]: `x > 0`
//! - [`UnitInterval`]: `0 <= x <= 1`, for relative humidities
//! - [`UnitIntervalLowerOpen`]: `0 < x <= 1`, for efficiencies
//!
//! Each marker has an associated `new` that returns the wrapped value.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::{iter::Sum, marker::PhantomData, ops::Add};

use num_traits::Zero;
use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval, UnitIntervalLowerOpen};

/// An invariant checked by [`Constrained::new`].
///
/// Implemented by zero-sized marker types.
pub trait Constraint<T> {
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] that `value` violates.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// The invariant a rejected value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("negative value where zero or more is required")]
    Negative,
    #[error("zero where a strictly positive value is required")]
    Zero,
    #[error("value is NaN")]
    NotANumber,
    #[error("value lies below the lower bound")]
    BelowMinimum,
    #[error("value lies above the upper bound")]
    AboveMaximum,
}

/// A `T` that satisfies `C`.
///
/// ```
/// use airco_core::constraint::{Constrained, StrictlyPositive};
///
/// let efficiency = Constrained::<_, StrictlyPositive>::new(0.7).unwrap();
/// assert_eq!(efficiency.into_inner(), 0.7);
/// assert!(Constrained::<f64, StrictlyPositive>::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the violated [`ConstraintError`].
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Constraints closed under addition, such as [`NonNegative`], can be summed.
impl<T, C> Sum for Constrained<T, C>
where
    C: Constraint<T>,
    Self: Add<Output = Self> + Zero,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut total = Self::zero();
        for value in iter {
            total = total + value;
        }
        total
    }
}
