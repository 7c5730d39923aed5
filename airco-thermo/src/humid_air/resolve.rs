use uom::si::{
    available_energy::joule_per_kilogram, ratio::ratio, thermodynamic_temperature::degree_celsius,
};

use crate::PropertyError;

use super::{
    Property,
    relations::{self, CP_DRY_AIR, T_MAX, T_MIN},
};

/// A property reduced to plain SI numbers.
///
/// Variant order fixes the order in which a pair is matched, so `(a, b)` and
/// `(b, a)` resolve through the same branch.
#[derive(Debug, Clone, Copy)]
enum Value {
    DryBulb(f64),
    HumidityRatio(f64),
    RelativeHumidity(f64),
    WetBulb(f64),
    DewPoint(f64),
    Enthalpy(f64),
}

impl Value {
    fn rank(self) -> u8 {
        match self {
            Self::DryBulb(_) => 0,
            Self::HumidityRatio(_) => 1,
            Self::RelativeHumidity(_) => 2,
            Self::WetBulb(_) => 3,
            Self::DewPoint(_) => 4,
            Self::Enthalpy(_) => 5,
        }
    }

    fn number(self) -> f64 {
        match self {
            Self::DryBulb(x)
            | Self::HumidityRatio(x)
            | Self::RelativeHumidity(x)
            | Self::WetBulb(x)
            | Self::DewPoint(x)
            | Self::Enthalpy(x) => x,
        }
    }
}

impl From<Property> for Value {
    fn from(property: Property) -> Self {
        match property {
            Property::DryBulb(t) => Self::DryBulb(t.get::<degree_celsius>()),
            Property::WetBulb(t) => Self::WetBulb(t.get::<degree_celsius>()),
            Property::DewPoint(t) => Self::DewPoint(t.get::<degree_celsius>()),
            Property::RelativeHumidity(rh) => Self::RelativeHumidity(rh.get::<ratio>()),
            Property::HumidityRatio(w) => Self::HumidityRatio(w.get::<ratio>()),
            Property::Enthalpy(h) => Self::Enthalpy(h.get::<joule_per_kilogram>()),
        }
    }
}

/// Reduces any independent pair of properties to `(dry bulb °C, W kg/kg)`.
pub(super) fn dry_bulb_and_humidity_ratio(
    p: f64,
    a: Property,
    b: Property,
) -> Result<(f64, f64), PropertyError> {
    let (first, second) = (Value::from(a), Value::from(b));
    for (property, value) in [(a, first), (b, second)] {
        if !value.number().is_finite() {
            return Err(PropertyError::InvalidInput(format!(
                "{} must be finite",
                property.name()
            )));
        }
    }
    if first.rank() == second.rank() {
        return Err(PropertyError::InvalidInput(format!(
            "two values of {} do not fix a state",
            a.name()
        )));
    }
    let (first, second) = if first.rank() < second.rank() {
        (first, second)
    } else {
        (second, first)
    };

    match (first, second) {
        (Value::DryBulb(t), Value::HumidityRatio(w)) => Ok((t, w)),
        (Value::DryBulb(t), Value::RelativeHumidity(rh)) => {
            check_relative_humidity(rh)?;
            Ok((t, humidity_ratio(rh * relations::saturation_pressure(t), p)?))
        }
        (Value::DryBulb(t), Value::WetBulb(twb)) => {
            check_not_above(twb, t, "wet bulb")?;
            Ok((t, relations::humidity_ratio_from_wet_bulb(t, twb, p)))
        }
        (Value::DryBulb(t), Value::DewPoint(tdp)) => {
            check_not_above(tdp, t, "dew point")?;
            Ok((t, humidity_ratio(relations::saturation_pressure(tdp), p)?))
        }
        (Value::DryBulb(t), Value::Enthalpy(h)) => {
            Ok((t, relations::humidity_ratio_from_enthalpy(t, h)))
        }
        (Value::HumidityRatio(w), Value::RelativeHumidity(rh)) => {
            check_relative_humidity(rh)?;
            if w <= 0.0 || rh <= 0.0 {
                return Err(PropertyError::InvalidInput(
                    "humidity ratio and relative humidity do not fix the state of dry air".into(),
                ));
            }
            let pw = relations::vapor_pressure_from_humidity_ratio(w, p);
            Ok((relations::saturation_temperature(pw / rh)?, w))
        }
        (Value::HumidityRatio(w), Value::WetBulb(twb)) => {
            Ok((relations::dry_bulb_from_wet_bulb(twb, w, p), w))
        }
        (Value::HumidityRatio(_), Value::DewPoint(_)) => Err(PropertyError::InvalidInput(
            "humidity ratio and dew point are not independent".into(),
        )),
        (Value::HumidityRatio(w), Value::Enthalpy(h)) => {
            Ok((relations::dry_bulb_from_enthalpy(h, w), w))
        }
        (Value::RelativeHumidity(rh), Value::WetBulb(twb)) => {
            check_relative_humidity(rh)?;
            let w_at = |t: f64| relations::humidity_ratio_from_wet_bulb(t, twb, p);
            let rh_at = |t: f64| {
                relations::vapor_pressure_from_humidity_ratio(w_at(t), p)
                    / relations::saturation_pressure(t)
            };
            let t = relations::invert(rh_at, rh, [twb, T_MAX])?;
            Ok((t, w_at(t)))
        }
        (Value::RelativeHumidity(rh), Value::DewPoint(tdp)) => {
            check_relative_humidity(rh)?;
            if rh <= 0.0 {
                return Err(PropertyError::InvalidInput(
                    "zero relative humidity has no dew point".into(),
                ));
            }
            let pw = relations::saturation_pressure(tdp);
            Ok((relations::saturation_temperature(pw / rh)?, humidity_ratio(pw, p)?))
        }
        (Value::RelativeHumidity(rh), Value::Enthalpy(h)) => {
            check_relative_humidity(rh)?;
            // Dry air at the same enthalpy is the warmest possible state.
            let t_hi = (h / CP_DRY_AIR).min(T_MAX);
            if t_hi <= T_MIN {
                return Err(PropertyError::OutOfRange {
                    property: "enthalpy",
                    value: h,
                    range: "states above -100 °C",
                });
            }
            let w_at = |t: f64| {
                let pw = rh * relations::saturation_pressure(t);
                if pw < p {
                    relations::humidity_ratio_from_vapor_pressure(pw, p)
                } else {
                    f64::MAX
                }
            };
            let h_at = |t: f64| relations::enthalpy(t, w_at(t)).min(f64::MAX);
            let t = relations::invert(h_at, h, [T_MIN, t_hi])?;
            Ok((t, w_at(t)))
        }
        (Value::WetBulb(twb), Value::DewPoint(tdp)) => {
            let w = humidity_ratio(relations::saturation_pressure(tdp), p)?;
            Ok((relations::dry_bulb_from_wet_bulb(twb, w, p), w))
        }
        (Value::WetBulb(_), Value::Enthalpy(_)) => Err(PropertyError::InvalidInput(
            "wet bulb and enthalpy are nearly dependent and do not fix a state".into(),
        )),
        (Value::DewPoint(tdp), Value::Enthalpy(h)) => {
            let w = humidity_ratio(relations::saturation_pressure(tdp), p)?;
            Ok((relations::dry_bulb_from_enthalpy(h, w), w))
        }
        (first, second) => Err(PropertyError::Calculation(format!(
            "unordered property pair {first:?} and {second:?}"
        ))),
    }
}

fn humidity_ratio(pw: f64, p: f64) -> Result<f64, PropertyError> {
    if pw < p {
        Ok(relations::humidity_ratio_from_vapor_pressure(pw, p))
    } else {
        Err(PropertyError::InvalidInput(format!(
            "vapor pressure {pw:.1} Pa reaches the total pressure {p:.1} Pa"
        )))
    }
}

fn check_relative_humidity(rh: f64) -> Result<(), PropertyError> {
    if (0.0..=1.0).contains(&rh) {
        Ok(())
    } else {
        Err(PropertyError::InvalidInput(format!(
            "relative humidity must be within 0 to 1, got {rh}"
        )))
    }
}

fn check_not_above(value: f64, dry_bulb: f64, name: &str) -> Result<(), PropertyError> {
    if value <= dry_bulb + 1e-9 {
        Ok(())
    } else {
        Err(PropertyError::InvalidInput(format!(
            "{name} {value:.3} °C is above the dry bulb {dry_bulb:.3} °C"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::{Ratio, ThermodynamicTemperature};

    use crate::humid_air::relations::STANDARD_PRESSURE;

    #[test]
    fn relative_humidity_and_wet_bulb() {
        let (t, w) = dry_bulb_and_humidity_ratio(
            STANDARD_PRESSURE,
            Property::RelativeHumidity(Ratio::new::<ratio>(0.4)),
            Property::WetBulb(ThermodynamicTemperature::new::<degree_celsius>(20.0643)),
        )
        .expect("independent pair");
        assert_relative_eq!(t, 30.0, epsilon = 1e-3);
        assert_relative_eq!(w, 0.010_603, max_relative = 1e-3);
    }

    #[test]
    fn saturated_wet_bulb_is_the_dry_bulb() {
        let (t, _) = dry_bulb_and_humidity_ratio(
            STANDARD_PRESSURE,
            Property::WetBulb(ThermodynamicTemperature::new::<degree_celsius>(10.0)),
            Property::RelativeHumidity(Ratio::new::<ratio>(1.0)),
        )
        .expect("independent pair");
        assert_relative_eq!(t, 10.0, epsilon = 1e-9);
    }
}
