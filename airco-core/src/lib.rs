pub mod constraint;
mod model;
pub mod units;

pub use model::{Model, Snapshot};
