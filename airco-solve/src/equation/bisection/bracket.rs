//! Interval bookkeeping for bisection.

use super::Error;

/// Checks that both ends are finite and distinct, and returns them low first.
pub(super) fn ordered([a, b]: [f64; 2]) -> Result<[f64; 2], Error> {
    if let Some(&value) = [a, b].iter().find(|end| !end.is_finite()) {
        return Err(Error::NonFiniteBracket { value });
    }
    #[allow(clippy::float_cmp)]
    if a == b {
        return Err(Error::ZeroWidthBracket { value: a });
    }
    Ok(if a < b { [a, b] } else { [b, a] })
}

/// An interval whose ends have residuals of opposite sign.
///
/// Only the sign at the low end is stored; the high end has the other one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lo: f64,
    hi: f64,
    lo_sign: Sign,
}

impl Bracket {
    /// Returns `None` when the residuals at `lo` and `hi` share a sign.
    pub(super) fn straddling([lo, hi]: [f64; 2], lo_residual: f64, hi_residual: f64) -> Option<Self> {
        let lo_sign = Sign::of(lo_residual);
        (lo_sign != Sign::of(hi_residual)).then_some(Self { lo, hi, lo_sign })
    }

    #[must_use]
    pub fn ends(&self) -> [f64; 2] {
        [self.lo, self.hi]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Whether the width is within `abs_tol + rel_tol * |midpoint|`.
    #[must_use]
    pub fn is_narrow(&self, abs_tol: f64, rel_tol: f64) -> bool {
        self.width() <= abs_tol + rel_tol * self.midpoint().abs()
    }

    /// Moves one end to `x` so the sign change stays inside.
    pub(super) fn close_in(&mut self, x: f64, residual: f64) {
        if Sign::of(residual) == self.lo_sign {
            self.lo = x;
        } else {
            self.hi = x;
        }
    }
}

/// Side of zero a residual falls on. Zero counts as non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    NonNegative,
}

impl Sign {
    #[must_use]
    pub fn of(residual: f64) -> Self {
        if residual < 0.0 {
            Self::Negative
        } else {
            Self::NonNegative
        }
    }
}
