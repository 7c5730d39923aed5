use airco_core::{Model, Snapshot};
use thiserror::Error;

use super::EquationProblem;

/// One point visited by a solver: the variables, the model call they
/// produced, and the residuals there.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    /// Zero at a root.
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// The stage of an evaluation that failed, with its error.
#[derive(Debug, Error)]
pub enum EvalError<IE, ME, RE> {
    #[error("could not map x to a model input")]
    Input(#[source] IE),
    #[error("model evaluation failed")]
    Model(#[source] ME),
    #[error("could not compute the residuals")]
    Residual(#[source] RE),
}

/// The [`EvalError`] produced when problem `P` drives model `M`.
pub type EvalErrorOf<M, P, const N: usize> = EvalError<
    <P as EquationProblem<N>>::InputError,
    <M as Model>::Error,
    <P as EquationProblem<N>>::ResidualError,
>;

/// Result of [`evaluate`].
pub type EvaluateResult<M, P, const N: usize> =
    Result<Evaluation<<M as Model>::Input, <M as Model>::Output, N>, EvalErrorOf<M, P, N>>;

/// Evaluates `problem` at `x` by building the model input, calling `model`,
/// and computing residuals from the input and output.
///
/// # Errors
///
/// Returns the [`EvalError`] of whichever stage fails first.
pub fn evaluate<M, P, const N: usize>(model: &M, problem: &P, x: [f64; N]) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    match problem.residuals(&input, &output) {
        Ok(residuals) => Ok(Evaluation {
            x,
            residuals,
            snapshot: Snapshot::new(input, output),
        }),
        Err(err) => Err(EvalError::Residual(err)),
    }
}
