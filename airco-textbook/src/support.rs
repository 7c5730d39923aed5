//! Shorthand for the state and quantity constructors the problems repeat.

use airco_core::units::us;
use airco_thermo::{
    HumidAir, Property, PropertyError, humid_air::relations::STANDARD_PRESSURE,
};
use uom::si::{
    f64::{Pressure, Ratio, ThermodynamicTemperature},
    pressure::pascal,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

/// Barometric pressure used by the SI problems that state one.
pub(crate) const P_TEXTBOOK: f64 = 101_300.0;

pub(crate) fn celsius(t: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(t)
}

pub(crate) fn pascals(p: f64) -> Pressure {
    Pressure::new::<pascal>(p)
}

pub(crate) fn standard() -> Pressure {
    pascals(STANDARD_PRESSURE)
}

pub(crate) fn fraction(x: f64) -> Ratio {
    Ratio::new::<ratio>(x)
}

/// State from dry bulb and wet bulb.
pub(crate) fn db_wb(
    p: Pressure,
    t: ThermodynamicTemperature,
    twb: ThermodynamicTemperature,
) -> Result<HumidAir, PropertyError> {
    HumidAir::with_pressure(p, Property::DryBulb(t), Property::WetBulb(twb))
}

/// State from dry bulb and relative humidity as a fraction.
pub(crate) fn db_rh(
    p: Pressure,
    t: ThermodynamicTemperature,
    rh: f64,
) -> Result<HumidAir, PropertyError> {
    HumidAir::with_pressure(p, Property::DryBulb(t), Property::RelativeHumidity(fraction(rh)))
}

/// State from dry bulb and humidity ratio.
pub(crate) fn db_w(p: Pressure, t: ThermodynamicTemperature, w: Ratio) -> Result<HumidAir, PropertyError> {
    HumidAir::with_pressure(p, Property::DryBulb(t), Property::HumidityRatio(w))
}

/// State at standard pressure from °F and relative humidity as a fraction.
pub(crate) fn f_rh(t_f: f64, rh: f64) -> Result<HumidAir, PropertyError> {
    HumidAir::new(
        Property::DryBulb(us::fahrenheit(t_f)),
        Property::RelativeHumidity(fraction(rh)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn shorthands_agree_on_one_state() -> Result<(), PropertyError> {
        let p = pascals(P_TEXTBOOK);
        let air = db_wb(p, celsius(21.0), celsius(15.0))?;
        let again = db_w(p, celsius(21.0), air.humidity_ratio())?;
        assert_relative_eq!(again.wet_bulb().get::<degree_celsius>(), 15.0, epsilon = 1e-6);

        let same = db_rh(p, celsius(21.0), air.relative_humidity().get::<ratio>())?;
        assert_relative_eq!(
            same.humidity_ratio().get::<ratio>(),
            air.humidity_ratio().get::<ratio>(),
            max_relative = 1e-9
        );
        Ok(())
    }

    #[test]
    fn fahrenheit_states_sit_at_standard_pressure() -> Result<(), PropertyError> {
        let air = f_rh(75.0, 0.5)?;
        assert_relative_eq!(us::in_fahrenheit(air.dry_bulb()), 75.0, epsilon = 1e-9);
        assert_relative_eq!(air.relative_humidity().get::<ratio>(), 0.5, epsilon = 1e-9);
        assert_eq!(air.pressure(), standard());
        Ok(())
    }
}
