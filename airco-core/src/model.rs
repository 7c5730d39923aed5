/// A deterministic calculation from a typed input to a typed output.
///
/// Psychrometric property lookups and equipment balances are all expressed
/// as models so the solvers can drive them without knowing what they compute.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs the calculation for the given input.
    ///
    /// # Errors
    ///
    /// Each model reports its own domain failure, for example a property
    /// lookup outside the valid range.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// One input/output pair recorded from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Doubler;

    impl Model for Doubler {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(2.0 * input)
        }
    }

    #[test]
    fn snapshot_records_call() {
        let input = 1.5;
        let output = Doubler.call(&input).expect("infallible");
        let snapshot = Snapshot::new(input, output);
        assert_eq!(snapshot, Snapshot { input: 1.5, output: 3.0 });
    }
}
