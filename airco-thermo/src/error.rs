use airco_solve::equation::bisection;
use thiserror::Error;

/// Errors that may occur when evaluating humid air or water properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, the dew point of perfectly dry air.
    #[error("property `{property}` is undefined at the given state")]
    Undefined {
        property: &'static str,
        context: Option<String>,
    },

    /// The input values are invalid or inconsistent.
    ///
    /// Supersaturated states, a wet bulb above the dry bulb, or two inputs
    /// that do not fix the state all end up here.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A value lies outside the validity range of the correlation.
    #[error("{property} = {value} is outside the valid range {range}")]
    OutOfRange {
        property: &'static str,
        value: f64,
        range: &'static str,
    },

    /// The calculation failed, for example a root find without a bracket.
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl From<bisection::Error> for PropertyError {
    fn from(err: bisection::Error) -> Self {
        Self::Calculation(err.to_string())
    }
}
