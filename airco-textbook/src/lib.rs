//! Worked air-conditioning problems from HVAC engineering textbooks.
//!
//! Every problem is a function returning a [`Report`] of labeled quantities.
//! [`catalog`] lists them by name so a front end can run them on demand.
//!
//! ```no_run
//! let report = airco_textbook::find("cav_design")?.run()?;
//! for entry in &report.entries {
//!     println!("{} / {}: {:?}", entry.part, entry.label, entry.value);
//! }
//! # Ok::<(), airco_textbook::TextbookError>(())
//! ```

mod catalog;
mod error;
mod report;
mod support;

pub mod problems;

pub use catalog::{Problem, catalog, find};
pub use error::TextbookError;
pub use report::{Entry, Part, Report, Value};
