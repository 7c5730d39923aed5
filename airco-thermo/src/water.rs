//! Liquid water and steam states.
//!
//! Humidifiers and washers add water or steam to an air stream, and the
//! energy they carry is the specific enthalpy of that water. This module
//! covers the compressed liquid, superheated vapor, and saturation regions of
//! IAPWS-IF97, which span every humidification and condensate state found in
//! air conditioning.

mod if97;

use airco_core::units::SpecificEnthalpy;
use uom::si::{
    available_energy::kilojoule_per_kilogram,
    f64::{MassDensity, Pressure, Ratio, SpecificVolume, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::megapascal,
    ratio::ratio,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::PropertyError;

/// A pure water state: compressed liquid, saturated mixture, or superheated vapor.
///
/// # Example
///
/// ```
/// use airco_thermo::Water;
/// use uom::si::{
///     available_energy::kilojoule_per_kilogram, f64::{Ratio, ThermodynamicTemperature},
///     ratio::ratio, thermodynamic_temperature::degree_celsius,
/// };
///
/// let steam = Water::saturated_at_temperature(
///     ThermodynamicTemperature::new::<degree_celsius>(100.0),
///     Ratio::new::<ratio>(1.0),
/// )
/// .unwrap();
/// assert!((steam.enthalpy().get::<kilojoule_per_kilogram>() - 2675.57).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Water {
    temperature: f64,
    pressure: f64,
    quality: Option<f64>,
    enthalpy: f64,
    specific_volume: f64,
}

impl Water {
    /// Creates a single-phase state from temperature and pressure.
    ///
    /// A pressure at or above the saturation pressure gives liquid, and a
    /// lower pressure gives vapor.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfRange`] outside regions 1 and 2.
    pub fn from_temperature_pressure(
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<Self, PropertyError> {
        let t = temperature.get::<kelvin>();
        let p = pressure.get::<megapascal>();
        check_temperature(t, if97::T_REGION2_MAX)?;
        if !(p > 0.0 && p <= if97::P_MAX) {
            return Err(PropertyError::OutOfRange {
                property: "pressure",
                value: p,
                range: "0 to 100 MPa",
            });
        }

        let liquid = t <= if97::T_REGION1_MAX && p >= if97::saturation_pressure(t);
        let (h, v) = if liquid {
            if97::region1(p, t)
        } else if t <= if97::T_REGION1_MAX || p <= if97::boundary_23_pressure(t) {
            if97::region2(p, t)
        } else {
            return Err(PropertyError::OutOfRange {
                property: "pressure",
                value: p,
                range: "below the region 2/3 boundary",
            });
        };

        Ok(Self {
            temperature: t,
            pressure: p,
            quality: None,
            enthalpy: h,
            specific_volume: v,
        })
    }

    /// Creates a saturated state from temperature and vapor quality.
    ///
    /// # Errors
    ///
    /// Returns an error if the quality is outside `[0, 1]` or the temperature is
    /// outside 273.16 K to 623.15 K.
    pub fn saturated_at_temperature(
        temperature: ThermodynamicTemperature,
        quality: Ratio,
    ) -> Result<Self, PropertyError> {
        let t = temperature.get::<kelvin>();
        check_temperature(t, if97::T_REGION1_MAX)?;
        Self::saturated(t, if97::saturation_pressure(t), quality.get::<ratio>())
    }

    /// Creates a saturated state from pressure and vapor quality.
    ///
    /// # Errors
    ///
    /// Returns an error if the quality is outside `[0, 1]` or the saturation
    /// temperature is outside 273.16 K to 623.15 K.
    pub fn saturated_at_pressure(pressure: Pressure, quality: Ratio) -> Result<Self, PropertyError> {
        let p = pressure.get::<megapascal>();
        let p_min = if97::saturation_pressure(if97::T_TRIPLE);
        let p_max = if97::saturation_pressure(if97::T_REGION1_MAX);
        if !(p_min..=p_max).contains(&p) {
            return Err(PropertyError::OutOfRange {
                property: "saturation pressure",
                value: p,
                range: "611.7 Pa to 16.53 MPa",
            });
        }
        Self::saturated(if97::saturation_temperature(p), p, quality.get::<ratio>())
    }

    fn saturated(t: f64, p: f64, x: f64) -> Result<Self, PropertyError> {
        if !(0.0..=1.0).contains(&x) {
            return Err(PropertyError::InvalidInput(format!(
                "vapor quality must be within 0 to 1, got {x}"
            )));
        }
        let (h_f, v_f) = if97::region1(p, t);
        let (h_g, v_g) = if97::region2(p, t);
        Ok(Self {
            temperature: t,
            pressure: p,
            quality: Some(x),
            enthalpy: h_f + x * (h_g - h_f),
            specific_volume: v_f + x * (v_g - v_f),
        })
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.temperature)
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<megapascal>(self.pressure)
    }

    /// Returns the vapor quality, or `None` for a single-phase state.
    #[must_use]
    pub fn quality(&self) -> Option<Ratio> {
        self.quality.map(Ratio::new::<ratio>)
    }

    #[must_use]
    pub fn enthalpy(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<kilojoule_per_kilogram>(self.enthalpy)
    }

    #[must_use]
    pub fn specific_volume(&self) -> SpecificVolume {
        SpecificVolume::new::<cubic_meter_per_kilogram>(self.specific_volume)
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(1.0 / self.specific_volume)
    }
}

/// Saturation pressure of water at `temperature`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfRange`] outside 273.15 K to 647.096 K.
pub fn saturation_pressure(temperature: ThermodynamicTemperature) -> Result<Pressure, PropertyError> {
    let t = temperature.get::<kelvin>();
    if !(273.15..=647.096).contains(&t) {
        return Err(PropertyError::OutOfRange {
            property: "temperature",
            value: t,
            range: "273.15 K to 647.096 K",
        });
    }
    Ok(Pressure::new::<megapascal>(if97::saturation_pressure(t)))
}

/// Saturation temperature of water at `pressure`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfRange`] outside 611.213 Pa to 22.064 MPa.
pub fn saturation_temperature(pressure: Pressure) -> Result<ThermodynamicTemperature, PropertyError> {
    let p = pressure.get::<megapascal>();
    if !(611.213e-6..=22.064).contains(&p) {
        return Err(PropertyError::OutOfRange {
            property: "pressure",
            value: p,
            range: "611.213 Pa to 22.064 MPa",
        });
    }
    Ok(ThermodynamicTemperature::new::<kelvin>(
        if97::saturation_temperature(p),
    ))
}

fn check_temperature(t: f64, upper: f64) -> Result<(), PropertyError> {
    if (273.15..=upper).contains(&t) {
        Ok(())
    } else {
        Err(PropertyError::OutOfRange {
            property: "temperature",
            value: t,
            range: "273.15 K to the region upper limit",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        pressure::{bar, kilopascal},
        thermodynamic_temperature::degree_celsius,
    };

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn saturation_at_100_celsius() -> Result<(), PropertyError> {
        let liquid = Water::saturated_at_temperature(celsius(100.0), Ratio::new::<ratio>(0.0))?;
        let vapor = Water::saturated_at_temperature(celsius(100.0), Ratio::new::<ratio>(1.0))?;
        assert_relative_eq!(liquid.enthalpy().get::<kilojoule_per_kilogram>(), 419.099, epsilon = 1e-3);
        assert_relative_eq!(vapor.enthalpy().get::<kilojoule_per_kilogram>(), 2675.572, epsilon = 1e-3);
        assert_relative_eq!(vapor.pressure().get::<bar>(), 1.014_18, epsilon = 1e-5);
        assert_relative_eq!(vapor.specific_volume().get::<cubic_meter_per_kilogram>(), 1.6719, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn saturated_steam_at_30_bar() -> Result<(), PropertyError> {
        let steam = Water::saturated_at_pressure(Pressure::new::<bar>(30.0), Ratio::new::<ratio>(1.0))?;
        assert_relative_eq!(steam.temperature().get::<degree_celsius>(), 233.858, epsilon = 1e-3);
        assert_relative_eq!(steam.enthalpy().get::<kilojoule_per_kilogram>(), 2803.265, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn wet_steam_interpolates_by_quality() -> Result<(), PropertyError> {
        let wet = Water::saturated_at_temperature(celsius(100.0), Ratio::new::<ratio>(0.5))?;
        assert_relative_eq!(
            wet.enthalpy().get::<kilojoule_per_kilogram>(),
            0.5 * (419.099 + 2675.572),
            epsilon = 1e-2
        );
        assert_relative_eq!(wet.quality().expect("two-phase").get::<ratio>(), 0.5);
        Ok(())
    }

    #[test]
    fn subcooled_and_superheated() -> Result<(), PropertyError> {
        let cold = Water::from_temperature_pressure(celsius(20.0), Pressure::new::<kilopascal>(95.0))?;
        assert_relative_eq!(cold.enthalpy().get::<kilojoule_per_kilogram>(), 84.007, epsilon = 1e-3);
        assert!(cold.quality().is_none());
        assert_relative_eq!(cold.density().get::<kilogram_per_cubic_meter>(), 998.2, epsilon = 0.1);

        let hot = Water::from_temperature_pressure(celsius(200.0), Pressure::new::<kilopascal>(101.325))?;
        assert_relative_eq!(hot.enthalpy().get::<kilojoule_per_kilogram>(), 2875.41, epsilon = 1e-2);
        Ok(())
    }

    #[test]
    fn saturation_functions() -> Result<(), PropertyError> {
        assert_relative_eq!(saturation_pressure(celsius(100.0))?.get::<kilopascal>(), 101.418, epsilon = 1e-3);
        assert_relative_eq!(
            saturation_temperature(Pressure::new::<bar>(30.0))?.get::<degree_celsius>(),
            233.858,
            epsilon = 1e-3
        );
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_states() {
        assert!(matches!(
            Water::from_temperature_pressure(celsius(400.0), Pressure::new::<megapascal>(50.0)),
            Err(PropertyError::OutOfRange { .. })
        ));
        assert!(matches!(
            Water::saturated_at_temperature(celsius(100.0), Ratio::new::<ratio>(1.2)),
            Err(PropertyError::InvalidInput(_))
        ));
        assert!(matches!(
            Water::saturated_at_pressure(Pressure::new::<megapascal>(20.0), Ratio::new::<ratio>(1.0)),
            Err(PropertyError::OutOfRange { .. })
        ));
        assert!(saturation_pressure(celsius(-10.0)).is_err());
    }
}
