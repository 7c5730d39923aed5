use airco_components::air_conditioning::{
    FanError, MixingError, ProcessError, vav::DesignError,
};
use airco_core::constraint::ConstraintError;
use airco_thermo::PropertyError;
use thiserror::Error;

/// Errors that may occur while working a textbook problem.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TextbookError {
    #[error("no worked problem named `{0}`")]
    UnknownProblem(String),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Mixing(#[from] MixingError),

    #[error(transparent)]
    Fan(#[from] FanError),

    #[error(transparent)]
    Design(#[from] DesignError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}
