//! Bracketed bisection for a single unknown.
//!
//! Psychrometric inversions such as dew point, wet bulb, or the apparatus dew
//! point of a coil have a single unknown temperature and a residual that
//! changes sign across a known interval. Each iteration halves that interval
//! until the residual or the interval width meets the configured tolerance.

mod bracket;
mod config;
mod error;
mod solution;

pub use bracket::{Bracket, Sign};
pub use config::Config;
pub use error::{BoxedError, Error};
pub use solution::{Solution, Status};

use airco_core::Model;
use tracing::{debug, trace};

use crate::equation::{EquationProblem, Evaluation, Observer, ScalarFn, TargetOutput, evaluate};

/// Control actions supported by the bisection solver.
pub enum Action {
    /// Stop and return the best evaluation seen so far.
    StopEarly,
}

/// Iteration event emitted by the bisection solver.
pub struct Event<'a, I, O> {
    /// Iteration counter, starting at 1.
    pub iter: usize,
    /// Bracket that the midpoint was taken from.
    pub bracket: [f64; 2],
    /// Evaluation at the midpoint.
    pub eval: &'a Evaluation<I, O, 1>,
}

/// Finds a root of the equation by repeatedly halving `bracket`.
///
/// The bracket may be given in either order. If an endpoint already satisfies
/// the residual tolerance it is returned without iterating.
///
/// # Errors
///
/// Returns an error if the config is invalid, the bracket is degenerate or
/// does not straddle a root, a residual is not finite, or the model or problem
/// fails during evaluation.
pub fn solve<I, O, Obs>(
    model: &impl Model<Input = I, Output = O>,
    problem: &impl EquationProblem<1, Input = I, Output = O>,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<I, O>, Error>
where
    Obs: for<'a> Observer<Event<'a, I, O>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let [left, right] = bracket::ordered(bracket)?;

    let left_eval = evaluate(model, problem, [left])?;
    let left_residual = finite_residual(&left_eval)?;
    if left_residual.abs() <= config.residual_tol {
        return Ok(Solution::at(left_eval, Status::Converged, 0));
    }

    let right_eval = evaluate(model, problem, [right])?;
    let right_residual = finite_residual(&right_eval)?;
    if right_residual.abs() <= config.residual_tol {
        return Ok(Solution::at(right_eval, Status::Converged, 0));
    }

    let mut bracket = Bracket::straddling([left, right], left_residual, right_residual)
        .ok_or(Error::NoBracket {
            left,
            right,
            left_residual,
            right_residual,
        })?;

    let mut best = if left_residual.abs() <= right_residual.abs() {
        left_eval
    } else {
        right_eval
    };

    for iter in 1..=config.max_iters {
        let mid = bracket.midpoint();
        let mid_eval = evaluate(model, problem, [mid])?;
        let mid_residual = finite_residual(&mid_eval)?;

        trace!(iter, x = mid, residual = mid_residual, "bisection step");

        let x_converged = bracket.is_narrow(config.x_abs_tol, config.x_rel_tol);
        let residual_converged = mid_residual.abs() <= config.residual_tol;
        let is_better = mid_residual.abs() < best.residuals[0].abs();

        let event = Event {
            iter,
            bracket: bracket.ends(),
            eval: &mid_eval,
        };

        if let Some(Action::StopEarly) = observer.observe(&event) {
            let best_eval = if is_better { mid_eval } else { best };
            return Ok(Solution::at(
                best_eval,
                Status::Stopped,
                iter,
            ));
        }

        if x_converged || residual_converged {
            debug!(iter, x = mid, residual = mid_residual, "bisection converged");
            return Ok(Solution::at(mid_eval, Status::Converged, iter));
        }

        bracket.close_in(mid, mid_residual);
        if is_better {
            best = mid_eval;
        }
    }

    debug!(
        max_iters = config.max_iters,
        x = best.x[0],
        residual = best.residuals[0],
        "bisection hit the iteration limit"
    );
    Ok(Solution::at(best, Status::IterationLimit, config.max_iters))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<I, O>(
    model: &impl Model<Input = I, Output = O>,
    problem: &impl EquationProblem<1, Input = I, Output = O>,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<I, O>, Error> {
    solve(model, problem, bracket, config, ())
}

/// Finds `x` in `bracket` where `f(x) = target`.
///
/// A shorthand for [`solve_unobserved`] with a [`ScalarFn`] model and a
/// [`TargetOutput`] problem.
///
/// # Errors
///
/// See [`solve`].
pub fn find_root<F, E>(
    f: F,
    target: f64,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<f64, f64>, Error>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    solve_unobserved(&ScalarFn::new(f), &TargetOutput::new(target), bracket, config)
}

fn finite_residual<I, O>(eval: &Evaluation<I, O, 1>) -> Result<f64, Error> {
    let residual = eval.residuals[0];
    if residual.is_finite() {
        Ok(residual)
    } else {
        Err(Error::NonFiniteResidual {
            x: eval.x[0],
            residual,
        })
    }
}
