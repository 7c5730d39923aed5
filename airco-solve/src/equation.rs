mod evaluate;
mod observe;
mod problem;
mod scalar;

pub mod bisection;

pub use evaluate::{EvalError, EvalErrorOf, EvaluateResult, Evaluation, evaluate};
pub use observe::Observer;
pub use problem::EquationProblem;
pub use scalar::{ScalarFn, TargetOutput};
