//! Air-conditioning components.
//!
//! Each component relates humid air states and flows through mass and energy
//! balances:
//!
//! - [`AirConditioningProcess`] balances one stream through a coil,
//!   humidifier, washer, or zone given any consistent subset of knowns.
//! - [`AdiabaticMixing`] combines or splits streams.
//! - [`SpaceConditionLine`] is the locus of supply states that meet a zone's
//!   sensible heat ratio.
//! - [`Fan`] heats a stream by its pressure rise and inefficiency.
//! - [`vav`] sizes and analyzes multi-zone variable air volume systems.

mod condition_line;
mod fan;
mod mixing;
mod process;
mod saturation;
pub mod vav;

pub use condition_line::{SpaceConditionLine, StatePoint};
pub use fan::{Fan, FanError, FanSpec};
pub use mixing::{AdiabaticMixing, MixingError, PartialStream};
pub use process::{AirConditioningProcess, ProcessBuilder, ProcessError};
