use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

/// A failure raised by caller-supplied code during an evaluation.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Reasons a bisection solve can fail.
///
/// The first group rejects the interval or configuration before any
/// iteration. The rest wrap a failed evaluation at some point inside it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("interval [{value}, {value}] is empty")]
    ZeroWidthBracket { value: f64 },

    #[error("interval endpoint {value} is not finite")]
    NonFiniteBracket { value: f64 },

    #[error(
        "residual keeps its sign over [{left}, {right}] \
         ({left_residual:e} and {right_residual:e})"
    )]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("solver configuration rejected: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("could not map x to a model input")]
    Input(#[source] BoxedError),

    #[error("model evaluation failed")]
    Model(#[source] BoxedError),

    #[error("could not compute the residual")]
    Residual(#[source] BoxedError),

    #[error("residual at x = {x} is {residual}")]
    NonFiniteResidual { x: f64, residual: f64 },
}

impl<IE, ME, RE> From<EvalError<IE, ME, RE>> for Error
where
    IE: StdError + Send + Sync + 'static,
    ME: StdError + Send + Sync + 'static,
    RE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<IE, ME, RE>) -> Self {
        match err {
            EvalError::Input(source) => Self::Input(source.into()),
            EvalError::Model(source) => Self::Model(source.into()),
            EvalError::Residual(source) => Self::Residual(source.into()),
        }
    }
}
