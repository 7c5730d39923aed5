//! The worked problems.
//!
//! Each problem is a plain function that builds its own inputs, works the
//! solution in order, and returns a [`Report`](crate::Report).

mod airco_proc_01;
mod airco_proc_02;
mod cav_design;
mod cav_vav_part_load;
mod vav_multizone;

pub use airco_proc_01::airco_proc_01;
pub use airco_proc_02::airco_proc_02;
pub use cav_design::cav_design;
pub use cav_vav_part_load::cav_vav_part_load;
pub use vav_multizone::{vav_multizone_analysis, vav_multizone_design, vav_multizone_system};
