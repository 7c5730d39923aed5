use std::{convert::Infallible, marker::PhantomData};

use airco_core::Model;

use super::EquationProblem;

/// A scalar model backed by a fallible closure.
///
/// Lets a property correlation such as `t -> W_sat(t)` be handed to a solver
/// without declaring a dedicated model type.
pub struct ScalarFn<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> ScalarFn<F, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _error: PhantomData,
        }
    }
}

impl<F, E> Model for ScalarFn<F, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Input = f64;
    type Output = f64;
    type Error = E;

    fn call(&self, input: &f64) -> Result<f64, E> {
        (self.f)(*input)
    }
}

/// Drives a scalar model output to a target value.
///
/// The residual is `output - target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetOutput {
    pub target: f64,
}

impl TargetOutput {
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for TargetOutput {
    type Input = f64;
    type Output = f64;
    type InputError = Infallible;
    type ResidualError = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([output - self.target])
    }
}
