/// A system of `N` equations posed over a [`Model`](airco_core::Model).
///
/// The problem maps the solver's unknowns to a model input, then measures how
/// far the resulting input/output pair is from satisfying the equations. A
/// root is reached when every residual is zero.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type InputError: std::error::Error + Send + Sync + 'static;
    type ResidualError: std::error::Error + Send + Sync + 'static;

    /// Builds the model input from the solver variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` cannot be mapped to a valid input.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::InputError>;

    /// Computes the residuals for one model evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if the residuals cannot be computed.
    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::ResidualError>;
}
