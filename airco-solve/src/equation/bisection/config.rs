/// Stopping criteria for [`solve`](super::solve).
///
/// Iteration stops once the residual magnitude is within `residual_tol`, or
/// once the interval is narrower than `x_abs_tol + x_rel_tol * |x|`. After
/// `max_iters` halvings the best point so far is returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
        }
    }
}

impl Config {
    /// Checks that every tolerance is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first tolerance that is not.
    pub fn validate(&self) -> Result<(), &'static str> {
        let tolerances = [
            (self.x_abs_tol, "x_abs_tol must be finite and non-negative"),
            (self.x_rel_tol, "x_rel_tol must be finite and non-negative"),
            (self.residual_tol, "residual_tol must be finite and non-negative"),
        ];
        tolerances
            .into_iter()
            .find(|(tol, _)| !tol.is_finite() || *tol < 0.0)
            .map_or(Ok(()), |(_, reason)| Err(reason))
    }
}
