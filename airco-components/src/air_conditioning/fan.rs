//! Fans that heat the air they move.

use airco_core::{
    constraint::{Constrained, ConstraintError, NonNegative, UnitIntervalLowerOpen},
    units::TemperatureOps,
};
use airco_thermo::{HumidAir, PropertyError};
use thiserror::Error;
use uom::si::{
    f64::{MassRate, Power, Pressure, Ratio, TemperatureInterval},
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    specific_volume::cubic_meter_per_kilogram,
    temperature_interval::kelvin,
};

/// Errors that may occur when building a fan.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FanError {
    #[error("invalid {parameter}: {source}")]
    InvalidParameter {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Pressure rise and efficiencies of a fan and its motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanSpec {
    pub pressure_rise: Constrained<Pressure, NonNegative>,
    pub efficiency: Constrained<Ratio, UnitIntervalLowerOpen>,
    /// Motor efficiency, where motor losses also heat the air stream.
    pub motor_efficiency: Constrained<Ratio, UnitIntervalLowerOpen>,
}

impl FanSpec {
    /// Creates a fan with its motor outside the air stream.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::InvalidParameter`] for a negative pressure rise or
    /// an efficiency outside `(0, 1]`.
    pub fn new(pressure_rise: Pressure, efficiency: Ratio) -> Result<Self, FanError> {
        Ok(Self {
            pressure_rise: NonNegative::new(pressure_rise).map_err(invalid("pressure rise"))?,
            efficiency: UnitIntervalLowerOpen::new(efficiency).map_err(invalid("fan efficiency"))?,
            motor_efficiency: UnitIntervalLowerOpen::one(),
        })
    }

    /// Puts the motor in the air stream with the given efficiency.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::InvalidParameter`] for an efficiency outside `(0, 1]`.
    pub fn with_motor_efficiency(mut self, efficiency: Ratio) -> Result<Self, FanError> {
        self.motor_efficiency =
            UnitIntervalLowerOpen::new(efficiency).map_err(invalid("motor efficiency"))?;
        Ok(self)
    }

    /// Temperature rise of air at `state` passing through this fan.
    fn temperature_rise(&self, state: &HumidAir) -> f64 {
        let v = state.specific_volume().get::<cubic_meter_per_kilogram>();
        let cp = state.specific_heat().get::<joule_per_kilogram_kelvin>();
        v * self.pressure_rise_si() / (self.efficiency_si() * self.motor_efficiency_si() * cp)
    }

    fn pressure_rise_si(&self) -> f64 {
        self.pressure_rise.into_inner().get::<pascal>()
    }

    fn efficiency_si(&self) -> f64 {
        self.efficiency.into_inner().get::<ratio>()
    }

    fn motor_efficiency_si(&self) -> f64 {
        self.motor_efficiency.into_inner().get::<ratio>()
    }
}

fn invalid(parameter: &'static str) -> impl Fn(ConstraintError) -> FanError {
    move |source| FanError::InvalidParameter { parameter, source }
}

/// A fan and the state change it causes.
///
/// The humidity ratio is unchanged and the temperature rises by
/// `ΔT = v Δp / (η_fan η_motor cp)`, evaluated at whichever state was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fan {
    spec: FanSpec,
    air_in: HumidAir,
    air_out: HumidAir,
    mass_rate: Option<MassRate>,
    /// Specific volume of the state used to evaluate the rise, m³/kg.
    v: f64,
}

impl Fan {
    /// Solves the fan from its inlet state.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::Property`] if the outlet is outside the property range.
    pub fn from_inlet(
        spec: FanSpec,
        air_in: HumidAir,
        mass_rate: Option<MassRate>,
    ) -> Result<Self, FanError> {
        let dt = TemperatureInterval::new::<kelvin>(spec.temperature_rise(&air_in));
        let air_out = air_in.with_dry_bulb(air_in.dry_bulb() + dt)?;
        Ok(Self::assemble(spec, air_in, air_out, &air_in, mass_rate))
    }

    /// Solves the fan from its outlet state, as when a draw-through fan sits
    /// after a cooling coil.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::Property`] if the inlet is outside the property range.
    pub fn from_outlet(
        spec: FanSpec,
        air_out: HumidAir,
        mass_rate: Option<MassRate>,
    ) -> Result<Self, FanError> {
        let dt = TemperatureInterval::new::<kelvin>(spec.temperature_rise(&air_out));
        let air_in = air_out.with_dry_bulb(air_out.dry_bulb() - dt)?;
        Ok(Self::assemble(spec, air_in, air_out, &air_out, mass_rate))
    }

    fn assemble(
        spec: FanSpec,
        air_in: HumidAir,
        air_out: HumidAir,
        reference: &HumidAir,
        mass_rate: Option<MassRate>,
    ) -> Self {
        Self {
            spec,
            air_in,
            air_out,
            mass_rate,
            v: reference.specific_volume().get::<cubic_meter_per_kilogram>(),
        }
    }

    #[must_use]
    pub fn spec(&self) -> &FanSpec {
        &self.spec
    }

    #[must_use]
    pub fn air_in(&self) -> HumidAir {
        self.air_in
    }

    #[must_use]
    pub fn air_out(&self) -> HumidAir {
        self.air_out
    }

    #[must_use]
    pub fn temperature_rise(&self) -> TemperatureInterval {
        self.air_out.dry_bulb().minus(self.air_in.dry_bulb())
    }

    /// Returns the heat added to the air, `ṁ cp ΔT`, if the flow is known.
    #[must_use]
    pub fn heat_gain(&self) -> Option<Power> {
        let m = self.mass_rate?.get::<kilogram_per_second>();
        let cp = self.air_in.specific_heat().get::<joule_per_kilogram_kelvin>();
        Some(Power::new::<watt>(m * cp * self.temperature_rise().get::<kelvin>()))
    }

    /// Returns the shaft power, `ṁ v Δp / η_fan`, if the flow is known.
    #[must_use]
    pub fn fan_power(&self) -> Option<Power> {
        let m = self.mass_rate?.get::<kilogram_per_second>();
        Some(Power::new::<watt>(
            m * self.v * self.spec.pressure_rise_si() / self.spec.efficiency_si(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use airco_core::units::us;
    use airco_thermo::Property;
    use approx::assert_relative_eq;
    use uom::si::{ratio::percent, thermodynamic_temperature::degree_celsius};

    fn spec() -> FanSpec {
        FanSpec::new(us::inch_of_water(3.0), Ratio::new::<ratio>(0.7))
            .and_then(|spec| spec.with_motor_efficiency(Ratio::new::<ratio>(0.84)))
            .expect("valid fan")
    }

    fn supply() -> HumidAir {
        HumidAir::new(
            Property::DryBulb(us::fahrenheit(58.0)),
            Property::RelativeHumidity(Ratio::new::<percent>(80.0)),
        )
        .expect("valid state")
    }

    #[test]
    fn draw_through_fan_heats_cooled_air() -> Result<(), FanError> {
        let m = us::lb_per_hour(17_215.0);
        let fan = Fan::from_outlet(spec(), supply(), Some(m))?;

        let rise = us::in_delta_f(fan.temperature_rise());
        assert_relative_eq!(rise, 1.847, epsilon = 5e-3);
        assert_eq!(fan.air_in().humidity_ratio(), fan.air_out().humidity_ratio());

        let heat = fan.heat_gain().expect("flow given").get::<watt>();
        let shaft = fan.fan_power().expect("flow given").get::<watt>();
        assert_relative_eq!(shaft, 0.84 * heat, max_relative = 2e-3);
        Ok(())
    }

    #[test]
    fn inlet_and_outlet_forms_agree() -> Result<(), FanError> {
        let outlet = Fan::from_outlet(spec(), supply(), None)?;
        let inlet = Fan::from_inlet(spec(), outlet.air_in(), None)?;

        // Each form takes the rise at the state it was given.
        assert_relative_eq!(
            outlet.temperature_rise().get::<kelvin>(),
            spec().temperature_rise(&supply()),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            inlet.temperature_rise().get::<kelvin>(),
            spec().temperature_rise(&outlet.air_in()),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            inlet.air_out().dry_bulb().get::<degree_celsius>(),
            supply().dry_bulb().get::<degree_celsius>(),
            epsilon = 1e-2
        );
        assert!(inlet.heat_gain().is_none());
        Ok(())
    }

    #[test]
    fn rejects_invalid_parameters() {
        let zero = FanSpec::new(Pressure::new::<pascal>(500.0), Ratio::new::<ratio>(0.0));
        assert!(matches!(
            zero,
            Err(FanError::InvalidParameter { parameter: "fan efficiency", .. })
        ));
        let negative = FanSpec::new(Pressure::new::<pascal>(-1.0), Ratio::new::<ratio>(0.6));
        assert!(matches!(negative, Err(FanError::InvalidParameter { .. })));
    }
}
