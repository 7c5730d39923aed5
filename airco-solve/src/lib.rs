pub mod equation;
