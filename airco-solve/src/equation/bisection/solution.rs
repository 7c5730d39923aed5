use airco_core::Snapshot;

use crate::equation::Evaluation;

/// How a bisection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual or the bracket width met its tolerance.
    Converged,
    /// Iterations ran out; the result is the smallest residual seen.
    IterationLimit,
    /// An observer asked to stop.
    Stopped,
}

/// Root estimate returned by [`solve`](super::solve), with the model call
/// that produced it.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub x: f64,
    pub residual: f64,
    pub status: Status,
    pub iters: usize,
    pub snapshot: Snapshot<I, O>,
}

impl<I, O> Solution<I, O> {
    pub(super) fn at(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        let Evaluation {
            x: [x],
            residuals: [residual],
            snapshot,
        } = eval;
        Self {
            x,
            residual,
            status,
            iters,
            snapshot,
        }
    }
}
