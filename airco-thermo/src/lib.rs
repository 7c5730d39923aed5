//! Humid air and water/steam properties for air-conditioning calculations.
//!
//! Humid air follows the ASHRAE Fundamentals psychrometric formulation.
//! Water and steam follow the IAPWS-IF97 industrial formulation for the
//! compressed liquid, superheated vapor, and saturation regions.

mod error;

pub mod humid_air;
pub mod stream;
pub mod water;

pub use error::PropertyError;
pub use humid_air::{HumidAir, Property};
pub use stream::AirStream;
pub use water::Water;
