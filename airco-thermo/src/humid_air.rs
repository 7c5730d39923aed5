//! Moist air states.
//!
//! A [`HumidAir`] state is fixed by the barometric pressure plus any two
//! independent psychrometric properties. All other properties are computed
//! once at construction, so a state is an immutable bundle of consistent
//! values that can be passed freely between calculations.

pub mod relations;

mod resolve;

use airco_core::units::SpecificEnthalpy;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        MassDensity, Pressure, Ratio, SpecificHeatCapacity, SpecificVolume,
        ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::degree_celsius,
};

use crate::PropertyError;

use relations::{STANDARD_PRESSURE, T_MAX, T_MIN};

/// Humidity ratios this far below zero are treated as rounding noise.
const W_NOISE: f64 = 1e-12;

/// Relative humidities this far above one are treated as rounding noise.
const RH_NOISE: f64 = 1e-6;

/// An independent psychrometric property used to fix a [`HumidAir`] state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    DryBulb(ThermodynamicTemperature),
    WetBulb(ThermodynamicTemperature),
    DewPoint(ThermodynamicTemperature),
    RelativeHumidity(Ratio),
    /// Mass of water vapor per mass of dry air.
    HumidityRatio(Ratio),
    /// Enthalpy per mass of dry air.
    Enthalpy(SpecificEnthalpy),
}

impl Property {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::DryBulb(_) => "dry bulb",
            Self::WetBulb(_) => "wet bulb",
            Self::DewPoint(_) => "dew point",
            Self::RelativeHumidity(_) => "relative humidity",
            Self::HumidityRatio(_) => "humidity ratio",
            Self::Enthalpy(_) => "enthalpy",
        }
    }
}

/// A humid air state at a given barometric pressure.
///
/// # Example
///
/// ```
/// use airco_thermo::{HumidAir, Property};
/// use uom::si::{
///     f64::{Ratio, ThermodynamicTemperature},
///     ratio::percent,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let air = HumidAir::new(
///     Property::DryBulb(ThermodynamicTemperature::new::<degree_celsius>(25.0)),
///     Property::RelativeHumidity(Ratio::new::<percent>(50.0)),
/// )
/// .unwrap();
///
/// let twb = air.wet_bulb().get::<degree_celsius>();
/// assert!((twb - 17.89).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidAir {
    pressure: f64,
    dry_bulb: f64,
    humidity_ratio: f64,
    relative_humidity: f64,
    vapor_pressure: f64,
    wet_bulb: f64,
    dew_point: Option<f64>,
    enthalpy: f64,
    specific_volume: f64,
}

impl HumidAir {
    /// Creates a state at standard atmospheric pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidInput`] if the two properties do not fix
    /// a physical state, and [`PropertyError::OutOfRange`] if the state lies
    /// outside -100 °C to 200 °C.
    pub fn new(a: Property, b: Property) -> Result<Self, PropertyError> {
        Self::with_pressure(Pressure::new::<pascal>(STANDARD_PRESSURE), a, b)
    }

    /// Creates a state at the given barometric pressure.
    ///
    /// # Errors
    ///
    /// See [`HumidAir::new`]. Also fails if the pressure is not positive.
    pub fn with_pressure(pressure: Pressure, a: Property, b: Property) -> Result<Self, PropertyError> {
        let p = pressure.get::<pascal>();
        check_pressure(p)?;
        let (t, w) = resolve::dry_bulb_and_humidity_ratio(p, a, b)?;
        tracing::trace!(?a, ?b, t, w, "resolved humid air state");
        Self::from_si(p, t, w)
    }

    /// Creates a saturated state at the given dry bulb.
    ///
    /// # Errors
    ///
    /// See [`HumidAir::with_pressure`].
    pub fn saturated(
        pressure: Pressure,
        dry_bulb: ThermodynamicTemperature,
    ) -> Result<Self, PropertyError> {
        Self::with_pressure(
            pressure,
            Property::DryBulb(dry_bulb),
            Property::RelativeHumidity(Ratio::new::<ratio>(1.0)),
        )
    }

    /// Creates a state from plain SI numbers: Pa, °C, and kg/kg.
    ///
    /// # Errors
    ///
    /// Returns an error if the numbers do not describe a physical state.
    pub fn from_si(p: f64, t: f64, w: f64) -> Result<Self, PropertyError> {
        check_pressure(p)?;
        if !t.is_finite() || !w.is_finite() {
            return Err(PropertyError::InvalidInput(format!(
                "non-finite state: t = {t} °C, W = {w}"
            )));
        }
        if !(T_MIN..=T_MAX).contains(&t) {
            return Err(PropertyError::OutOfRange {
                property: "dry bulb",
                value: t,
                range: "-100 °C to 200 °C",
            });
        }
        if w < -W_NOISE {
            return Err(PropertyError::InvalidInput(format!(
                "humidity ratio must not be negative, got {w}"
            )));
        }
        let w = w.max(0.0);

        let pw = relations::vapor_pressure_from_humidity_ratio(w, p);
        let pws = relations::saturation_pressure(t);
        let rh = pw / pws;
        if rh > 1.0 + RH_NOISE {
            return Err(PropertyError::InvalidInput(format!(
                "supersaturated state: t = {t:.3} °C, W = {w:.6} exceeds saturation ({:.6})",
                relations::humidity_ratio_from_vapor_pressure(pws, p)
            )));
        }

        let wet_bulb = if rh >= 1.0 {
            t
        } else {
            relations::wet_bulb(t, w, p)?
        };
        let dew_point = if pw >= relations::saturation_pressure(T_MIN) {
            Some(relations::saturation_temperature(pw)?.min(t))
        } else {
            None
        };

        Ok(Self {
            pressure: p,
            dry_bulb: t,
            humidity_ratio: w,
            relative_humidity: rh.min(1.0),
            vapor_pressure: pw,
            wet_bulb,
            dew_point,
            enthalpy: relations::enthalpy(t, w),
            specific_volume: relations::specific_volume(t, w, p),
        })
    }

    /// Returns the state at a new dry bulb with the same humidity ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if cooling to `dry_bulb` would supersaturate the air.
    pub fn with_dry_bulb(&self, dry_bulb: ThermodynamicTemperature) -> Result<Self, PropertyError> {
        Self::from_si(
            self.pressure,
            dry_bulb.get::<degree_celsius>(),
            self.humidity_ratio,
        )
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure)
    }

    #[must_use]
    pub fn dry_bulb(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.dry_bulb)
    }

    #[must_use]
    pub fn wet_bulb(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.wet_bulb)
    }

    /// Returns the dew point, or `None` for dry air or a dew point below -100 °C.
    #[must_use]
    pub fn dew_point(&self) -> Option<ThermodynamicTemperature> {
        self.dew_point
            .map(ThermodynamicTemperature::new::<degree_celsius>)
    }

    #[must_use]
    pub fn relative_humidity(&self) -> Ratio {
        Ratio::new::<ratio>(self.relative_humidity)
    }

    /// Returns the humidity ratio in kg of vapor per kg of dry air.
    #[must_use]
    pub fn humidity_ratio(&self) -> Ratio {
        Ratio::new::<ratio>(self.humidity_ratio)
    }

    /// Returns the humidity ratio of saturated air at this dry bulb.
    #[must_use]
    pub fn saturation_humidity_ratio(&self) -> Ratio {
        Ratio::new::<ratio>(relations::saturation_humidity_ratio(
            self.dry_bulb,
            self.pressure,
        ))
    }

    #[must_use]
    pub fn vapor_pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.vapor_pressure)
    }

    /// Returns the enthalpy per kg of dry air.
    #[must_use]
    pub fn enthalpy(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<joule_per_kilogram>(self.enthalpy)
    }

    /// Returns the volume per kg of dry air.
    #[must_use]
    pub fn specific_volume(&self) -> SpecificVolume {
        SpecificVolume::new::<cubic_meter_per_kilogram>(self.specific_volume)
    }

    /// Returns the mass of dry air per unit volume of humid air.
    ///
    /// Multiplying by a volume flow gives the dry-air mass flow.
    #[must_use]
    pub fn density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(1.0 / self.specific_volume)
    }

    /// Returns the total mass of dry air and vapor per unit volume.
    #[must_use]
    pub fn moist_air_density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(
            (1.0 + self.humidity_ratio) / self.specific_volume,
        )
    }

    /// Returns the humid specific heat per kg of dry air.
    #[must_use]
    pub fn specific_heat(&self) -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(relations::specific_heat(
            self.humidity_ratio,
        ))
    }

    /// Returns `(pressure Pa, dry bulb °C, humidity ratio kg/kg)`.
    #[must_use]
    pub fn si(&self) -> (f64, f64, f64) {
        (self.pressure, self.dry_bulb, self.humidity_ratio)
    }
}

fn check_pressure(p: f64) -> Result<(), PropertyError> {
    if p.is_finite() && p > 0.0 {
        Ok(())
    } else {
        Err(PropertyError::InvalidInput(format!(
            "pressure must be positive, got {p} Pa"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram, pressure::kilopascal, ratio::percent,
    };

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn dry_and_wet_bulb() -> Result<(), PropertyError> {
        let air = HumidAir::new(
            Property::DryBulb(celsius(21.0)),
            Property::WetBulb(celsius(15.0)),
        )?;
        assert_relative_eq!(air.humidity_ratio().get::<ratio>(), 0.008_163, max_relative = 1e-3);
        assert_relative_eq!(air.relative_humidity().get::<percent>(), 52.77, epsilon = 0.01);
        assert_relative_eq!(air.enthalpy().get::<kilojoule_per_kilogram>(), 41.86, epsilon = 0.01);
        assert_relative_eq!(
            air.specific_volume().get::<cubic_meter_per_kilogram>(),
            0.8442,
            epsilon = 1e-4
        );
        assert_relative_eq!(air.wet_bulb().get::<degree_celsius>(), 15.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn pair_order_does_not_matter() -> Result<(), PropertyError> {
        let a = Property::DryBulb(celsius(25.0));
        let b = Property::RelativeHumidity(Ratio::new::<percent>(50.0));
        assert_eq!(HumidAir::new(a, b)?, HumidAir::new(b, a)?);
        Ok(())
    }

    #[test]
    fn every_valid_pair_recovers_the_state() -> Result<(), PropertyError> {
        let reference = HumidAir::new(
            Property::DryBulb(celsius(30.0)),
            Property::RelativeHumidity(Ratio::new::<percent>(40.0)),
        )?;
        let props = [
            Property::DryBulb(reference.dry_bulb()),
            Property::WetBulb(reference.wet_bulb()),
            Property::DewPoint(reference.dew_point().expect("humid air")),
            Property::RelativeHumidity(reference.relative_humidity()),
            Property::HumidityRatio(reference.humidity_ratio()),
            Property::Enthalpy(reference.enthalpy()),
        ];

        for (i, &a) in props.iter().enumerate() {
            for &b in &props[i + 1..] {
                let dependent = matches!(
                    (a, b),
                    (Property::DewPoint(_), Property::HumidityRatio(_))
                        | (Property::WetBulb(_), Property::Enthalpy(_))
                );
                match HumidAir::new(a, b) {
                    Ok(air) => {
                        assert!(!dependent, "{} and {} accepted", a.name(), b.name());
                        assert_relative_eq!(
                            air.dry_bulb().get::<degree_celsius>(),
                            30.0,
                            epsilon = 1e-6
                        );
                        assert_relative_eq!(
                            air.humidity_ratio().get::<ratio>(),
                            reference.humidity_ratio().get::<ratio>(),
                            epsilon = 1e-9
                        );
                    }
                    Err(err) => assert!(dependent, "{} and {}: {err}", a.name(), b.name()),
                }
            }
        }
        Ok(())
    }

    #[test]
    fn dew_point_and_saturation() -> Result<(), PropertyError> {
        let air = HumidAir::new(
            Property::DryBulb(celsius(25.0)),
            Property::RelativeHumidity(Ratio::new::<percent>(50.0)),
        )?;
        let tdp = air.dew_point().expect("humid air has a dew point");
        assert_relative_eq!(tdp.get::<degree_celsius>(), 13.864, epsilon = 1e-3);

        let saturated = HumidAir::saturated(air.pressure(), celsius(13.864))?;
        assert_relative_eq!(
            saturated.humidity_ratio().get::<ratio>(),
            air.humidity_ratio().get::<ratio>(),
            max_relative = 1e-4
        );
        Ok(())
    }

    #[test]
    fn dry_air_has_no_dew_point() -> Result<(), PropertyError> {
        let air = HumidAir::new(
            Property::DryBulb(celsius(20.0)),
            Property::HumidityRatio(Ratio::new::<ratio>(0.0)),
        )?;
        assert!(air.dew_point().is_none());
        assert_relative_eq!(air.relative_humidity().get::<ratio>(), 0.0);
        Ok(())
    }

    #[test]
    fn below_freezing_uses_ice() -> Result<(), PropertyError> {
        let air = HumidAir::new(
            Property::DryBulb(celsius(-5.0)),
            Property::RelativeHumidity(Ratio::new::<percent>(80.0)),
        )?;
        assert_relative_eq!(air.humidity_ratio().get::<ratio>(), 0.001_979_1, max_relative = 1e-4);
        assert_relative_eq!(air.wet_bulb().get::<degree_celsius>(), -5.884, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn reduced_pressure_raises_humidity_ratio() -> Result<(), PropertyError> {
        let t = Property::DryBulb(celsius(20.0));
        let rh = Property::RelativeHumidity(Ratio::new::<percent>(60.0));
        let sea_level = HumidAir::new(t, rh)?;
        let altitude = HumidAir::with_pressure(Pressure::new::<kilopascal>(85.0), t, rh)?;
        assert!(altitude.humidity_ratio() > sea_level.humidity_ratio());
        assert!(altitude.density() < sea_level.density());
        Ok(())
    }

    #[test]
    fn rejects_invalid_states() {
        let t = Property::DryBulb(celsius(20.0));
        assert!(matches!(
            HumidAir::new(t, Property::RelativeHumidity(Ratio::new::<percent>(110.0))),
            Err(PropertyError::InvalidInput(_))
        ));
        assert!(matches!(
            HumidAir::new(t, Property::WetBulb(celsius(22.0))),
            Err(PropertyError::InvalidInput(_))
        ));
        assert!(matches!(
            HumidAir::new(t, Property::HumidityRatio(Ratio::new::<ratio>(0.02))),
            Err(PropertyError::InvalidInput(_))
        ));
        assert!(matches!(
            HumidAir::new(t, Property::DryBulb(celsius(25.0))),
            Err(PropertyError::InvalidInput(_))
        ));
        assert!(matches!(
            HumidAir::new(Property::DryBulb(celsius(250.0)), Property::HumidityRatio(Ratio::new::<ratio>(0.0))),
            Err(PropertyError::OutOfRange { .. })
        ));
        assert!(matches!(
            HumidAir::with_pressure(Pressure::new::<pascal>(0.0), t, Property::HumidityRatio(Ratio::new::<ratio>(0.0))),
            Err(PropertyError::InvalidInput(_))
        ));
    }

    #[test]
    fn air_above_boiling_has_a_wet_bulb() -> Result<(), PropertyError> {
        for t in [101.0, 120.0, 150.0, 199.0] {
            let air = HumidAir::new(
                Property::DryBulb(celsius(t)),
                Property::HumidityRatio(Ratio::new::<ratio>(0.01)),
            )?;
            let twb = air.wet_bulb().get::<degree_celsius>();
            assert!(twb > 0.0 && twb < 100.0, "wet bulb {twb} °C at {t} °C");
            assert_relative_eq!(
                relations::humidity_ratio_from_wet_bulb(t, twb, air.si().0),
                0.01,
                epsilon = 1e-6
            );

            let again = HumidAir::new(
                Property::DryBulb(celsius(t)),
                Property::WetBulb(air.wet_bulb()),
            )?;
            assert_relative_eq!(again.humidity_ratio().get::<ratio>(), 0.01, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn sensible_change_keeps_humidity_ratio() -> Result<(), PropertyError> {
        let air = HumidAir::new(
            Property::DryBulb(celsius(12.0)),
            Property::RelativeHumidity(Ratio::new::<percent>(90.0)),
        )?;
        let warm = air.with_dry_bulb(celsius(30.0))?;
        assert_eq!(warm.humidity_ratio(), air.humidity_ratio());
        assert!(warm.relative_humidity() < air.relative_humidity());
        assert!(air.with_dry_bulb(celsius(0.0)).is_err());
        Ok(())
    }
}
