//! US-customary constructors and accessors.
//!
//! Most units map directly onto `uom` units. Btu per hour does not exist in
//! `uom`, so it is converted here with the International Table Btu.

use uom::si::{
    available_energy::btu_it_per_pound,
    f64::{
        MassRate, Power, Pressure, TemperatureInterval, ThermodynamicTemperature, VolumeRate,
    },
    mass_rate::{pound_per_hour, pound_per_minute},
    power::watt,
    pressure::inch_of_water_60,
    temperature_interval::degree_fahrenheit as delta_fahrenheit,
    thermodynamic_temperature::degree_fahrenheit,
    volume_rate::cubic_foot_per_minute,
};

use super::SpecificEnthalpy;

/// Watts per Btu (IT) per hour.
pub const WATT_PER_BTU_PER_HOUR: f64 = 1_055.055_852_62 / 3_600.0;

#[must_use]
pub fn fahrenheit(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_fahrenheit>(value)
}

#[must_use]
pub fn in_fahrenheit(temperature: ThermodynamicTemperature) -> f64 {
    temperature.get::<degree_fahrenheit>()
}

#[must_use]
pub fn delta_f(value: f64) -> TemperatureInterval {
    TemperatureInterval::new::<delta_fahrenheit>(value)
}

#[must_use]
pub fn in_delta_f(interval: TemperatureInterval) -> f64 {
    interval.get::<delta_fahrenheit>()
}

#[must_use]
pub fn btu_per_hour(value: f64) -> Power {
    Power::new::<watt>(value * WATT_PER_BTU_PER_HOUR)
}

#[must_use]
pub fn in_btu_per_hour(power: Power) -> f64 {
    power.get::<watt>() / WATT_PER_BTU_PER_HOUR
}

#[must_use]
pub fn lb_per_hour(value: f64) -> MassRate {
    MassRate::new::<pound_per_hour>(value)
}

#[must_use]
pub fn in_lb_per_hour(rate: MassRate) -> f64 {
    rate.get::<pound_per_hour>()
}

#[must_use]
pub fn lb_per_minute(value: f64) -> MassRate {
    MassRate::new::<pound_per_minute>(value)
}

#[must_use]
pub fn in_lb_per_minute(rate: MassRate) -> f64 {
    rate.get::<pound_per_minute>()
}

#[must_use]
pub fn cfm(value: f64) -> VolumeRate {
    VolumeRate::new::<cubic_foot_per_minute>(value)
}

#[must_use]
pub fn in_cfm(rate: VolumeRate) -> f64 {
    rate.get::<cubic_foot_per_minute>()
}

/// Inches of water column at 60 °F, the usual fan pressure unit.
#[must_use]
pub fn inch_of_water(value: f64) -> Pressure {
    Pressure::new::<inch_of_water_60>(value)
}

#[must_use]
pub fn btu_per_lb(value: f64) -> SpecificEnthalpy {
    SpecificEnthalpy::new::<btu_it_per_pound>(value)
}

#[must_use]
pub fn in_btu_per_lb(enthalpy: SpecificEnthalpy) -> f64 {
    enthalpy.get::<btu_it_per_pound>()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, power::kilowatt,
        thermodynamic_temperature::degree_celsius, volume_rate::cubic_meter_per_second,
    };

    #[test]
    fn ton_of_refrigeration() {
        assert_relative_eq!(btu_per_hour(12_000.0).get::<kilowatt>(), 3.516_85, epsilon = 1e-5);
        assert_relative_eq!(in_btu_per_hour(btu_per_hour(-42.0)), -42.0, epsilon = 1e-9);
    }

    #[test]
    fn temperatures() {
        assert_relative_eq!(fahrenheit(212.0).get::<degree_celsius>(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(in_delta_f(delta_f(20.0)), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn flows() {
        assert_relative_eq!(
            lb_per_minute(60.0).get::<kilogram_per_second>(),
            lb_per_hour(3600.0).get::<kilogram_per_second>(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            cfm(2118.88).get::<cubic_meter_per_second>(),
            1.0,
            epsilon = 1e-4
        );
    }
}
