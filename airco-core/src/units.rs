//! Quantity aliases and temperature helpers used across the workspace.
//!
//! All quantities are `uom` SI quantities with `f64` storage. The [`us`]
//! submodule adds constructors and accessors for the US-customary units
//! common in HVAC practice.

pub mod us;

use uom::si::{
    f64::{
        AvailableEnergy, SpecificHeatCapacity, TemperatureInterval, ThermodynamicTemperature,
    },
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Specific enthalpy, J/kg in SI.
///
/// For humid air the basis is the mass of dry air.
pub type SpecificEnthalpy = AvailableEnergy;

/// Specific heat at constant pressure, J/(kg·K) in SI.
pub type SpecificHeat = SpecificHeatCapacity;

/// Extension method for `ThermodynamicTemperature` to compute a temperature difference.
pub trait TemperatureOps {
    /// Returns `self - other` as a `TemperatureInterval`.
    ///
    /// `uom` does not subtract two absolute temperatures, so this converts both
    /// to kelvin and wraps the difference.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureOps for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::{degree_celsius as delta_celsius, degree_fahrenheit as delta_f},
        thermodynamic_temperature::{degree_celsius, degree_fahrenheit},
    };

    #[test]
    fn minus_is_signed() {
        let supply = ThermodynamicTemperature::new::<degree_celsius>(13.0);
        let room = ThermodynamicTemperature::new::<degree_celsius>(24.0);
        assert_relative_eq!(room.minus(supply).get::<delta_celsius>(), 11.0, epsilon = 1e-12);
        assert_relative_eq!(supply.minus(room).get::<delta_f>(), -19.8, epsilon = 1e-9);
    }

    #[test]
    fn minus_across_units() {
        let t_c = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let t_f = ThermodynamicTemperature::new::<degree_fahrenheit>(77.0);
        assert_relative_eq!(t_f.minus(t_c).get::<delta_celsius>(), 0.0, epsilon = 1e-12);
    }
}
