//! Psychrometric relations on plain SI numbers.
//!
//! Temperatures are in °C, pressures in Pa, humidity ratios in kg of water
//! vapor per kg of dry air, and enthalpies in J per kg of dry air. These are
//! the ASHRAE Fundamentals (chapter 1) equations. [`HumidAir`](super::HumidAir)
//! wraps them with units and validation, and the process solvers use them
//! directly when balancing scalar unknowns.

use std::convert::Infallible;

use airco_solve::equation::bisection::{self, Config};

use crate::PropertyError;

/// Standard atmospheric pressure, Pa.
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Ratio of the molar masses of water vapor and dry air.
pub const MOLAR_MASS_RATIO: f64 = 0.621_945;

/// Specific heat of dry air, J/kg·K.
pub const CP_DRY_AIR: f64 = 1_006.0;

/// Specific heat of water vapor, J/kg·K.
pub const CP_VAPOR: f64 = 1_860.0;

/// Enthalpy of saturated water vapor at 0 °C, J/kg.
pub const HG_0C: f64 = 2_501_000.0;

/// Gas constant of dry air, J/kg·K.
pub const R_DRY_AIR: f64 = 287.042;

/// Lower temperature limit of the Hyland-Wexler correlations, °C.
pub const T_MIN: f64 = -100.0;

/// Upper temperature limit of the Hyland-Wexler correlations, °C.
pub const T_MAX: f64 = 200.0;

const KELVIN_OFFSET: f64 = 273.15;

/// Gap kept below the boiling point when bracketing a wet bulb, °C.
const BOILING_MARGIN: f64 = 1e-3;

const ICE: [f64; 7] = [
    -5.674_535_9e3,
    6.392_524_7,
    -9.677_843_0e-3,
    6.221_570_1e-7,
    2.074_782_5e-9,
    -9.484_024_0e-13,
    4.163_501_9,
];

const LIQUID: [f64; 6] = [
    -5.800_220_6e3,
    1.391_499_3,
    -4.864_023_9e-2,
    4.176_476_8e-5,
    -1.445_209_3e-8,
    6.545_967_3,
];

/// Saturation pressure of water vapor, Pa.
///
/// Hyland-Wexler over ice below 0 °C and over liquid water otherwise.
#[must_use]
pub fn saturation_pressure(t: f64) -> f64 {
    let tk = t + KELVIN_OFFSET;
    let ln_p = if t < 0.0 {
        let [c1, c2, c3, c4, c5, c6, c7] = ICE;
        c1 / tk + c2 + tk * (c3 + tk * (c4 + tk * (c5 + tk * c6))) + c7 * tk.ln()
    } else {
        let [c8, c9, c10, c11, c12, c13] = LIQUID;
        c8 / tk + c9 + tk * (c10 + tk * (c11 + tk * c12)) + c13 * tk.ln()
    };
    ln_p.exp()
}

#[must_use]
pub fn humidity_ratio_from_vapor_pressure(pw: f64, p: f64) -> f64 {
    MOLAR_MASS_RATIO * pw / (p - pw)
}

#[must_use]
pub fn vapor_pressure_from_humidity_ratio(w: f64, p: f64) -> f64 {
    p * w / (MOLAR_MASS_RATIO + w)
}

#[must_use]
pub fn saturation_humidity_ratio(t: f64, p: f64) -> f64 {
    humidity_ratio_from_vapor_pressure(saturation_pressure(t), p)
}

/// Humid-air specific heat per kg of dry air, J/kg·K.
#[must_use]
pub fn specific_heat(w: f64) -> f64 {
    CP_DRY_AIR + CP_VAPOR * w
}

/// Enthalpy of water vapor at `t`, J/kg.
#[must_use]
pub fn vapor_enthalpy(t: f64) -> f64 {
    HG_0C + CP_VAPOR * t
}

#[must_use]
pub fn enthalpy(t: f64, w: f64) -> f64 {
    CP_DRY_AIR * t + w * vapor_enthalpy(t)
}

#[must_use]
pub fn dry_bulb_from_enthalpy(h: f64, w: f64) -> f64 {
    (h - HG_0C * w) / specific_heat(w)
}

#[must_use]
pub fn humidity_ratio_from_enthalpy(t: f64, h: f64) -> f64 {
    (h - CP_DRY_AIR * t) / vapor_enthalpy(t)
}

/// Specific volume per kg of dry air, m³/kg.
#[must_use]
pub fn specific_volume(t: f64, w: f64, p: f64) -> f64 {
    R_DRY_AIR * (t + KELVIN_OFFSET) * (1.0 + 1.607_858 * w) / p
}

/// Humidity ratio from dry bulb and thermodynamic wet bulb.
///
/// Uses the ice-bulb form of the psychrometric equation when `twb < 0`.
#[must_use]
pub fn humidity_ratio_from_wet_bulb(t: f64, twb: f64, p: f64) -> f64 {
    let ws = saturation_humidity_ratio(twb, p);
    if twb >= 0.0 {
        ((2501.0 - 2.326 * twb) * ws - 1.006 * (t - twb)) / (2501.0 + 1.86 * t - 4.186 * twb)
    } else {
        ((2830.0 - 0.24 * twb) * ws - 1.006 * (t - twb)) / (2830.0 + 1.86 * t - 2.1 * twb)
    }
}

/// Dry bulb from thermodynamic wet bulb and humidity ratio.
#[must_use]
pub fn dry_bulb_from_wet_bulb(twb: f64, w: f64, p: f64) -> f64 {
    let ws = saturation_humidity_ratio(twb, p);
    if twb >= 0.0 {
        ((2501.0 - 2.326 * twb) * ws + 1.006 * twb - w * (2501.0 - 4.186 * twb))
            / (1.86 * w + 1.006)
    } else {
        ((2830.0 - 0.24 * twb) * ws + 1.006 * twb - w * (2830.0 - 2.1 * twb))
            / (1.86 * w + 1.006)
    }
}

/// Thermodynamic wet bulb of air at `t` with humidity ratio `w`.
///
/// # Errors
///
/// Returns [`PropertyError::Calculation`] if no wet bulb exists between
/// [`T_MIN`] and `t`.
pub fn wet_bulb(t: f64, w: f64, p: f64) -> Result<f64, PropertyError> {
    // Saturated humidity ratio diverges where the vapor pressure reaches `p`.
    let upper = if (saturation_pressure(T_MIN)..saturation_pressure(T_MAX)).contains(&p) {
        t.min(saturation_temperature(p)? - BOILING_MARGIN)
    } else {
        t
    };
    invert(|x| humidity_ratio_from_wet_bulb(t, x, p), w, [T_MIN, upper])
}

/// Temperature at which `pw` is the saturation pressure.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfRange`] if the temperature falls outside
/// [`T_MIN`] to [`T_MAX`].
pub fn saturation_temperature(pw: f64) -> Result<f64, PropertyError> {
    if !(saturation_pressure(T_MIN)..=saturation_pressure(T_MAX)).contains(&pw) {
        return Err(PropertyError::OutOfRange {
            property: "vapor pressure",
            value: pw,
            range: "saturation pressures from -100 °C to 200 °C",
        });
    }
    invert(saturation_pressure, pw, [T_MIN, T_MAX])
}

/// Solves `f(x) = target` on a bracket with the default bisection settings.
pub(crate) fn invert(
    f: impl Fn(f64) -> f64,
    target: f64,
    bracket: [f64; 2],
) -> Result<f64, PropertyError> {
    let solution = bisection::find_root(
        |x| Ok::<_, Infallible>(f(x)),
        target,
        bracket,
        &Config::default(),
    )?;
    Ok(solution.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn saturation_pressure_matches_ashrae_table() {
        assert_relative_eq!(saturation_pressure(-10.0), 259.90, max_relative = 1e-4);
        assert_relative_eq!(saturation_pressure(0.01), 611.657, max_relative = 1e-4);
        assert_relative_eq!(saturation_pressure(20.0), 2338.8, max_relative = 1e-4);
        assert_relative_eq!(saturation_pressure(100.0), 101_418.7, max_relative = 1e-4);
    }

    #[test]
    fn saturation_temperature_inverts_pressure() {
        let t = saturation_temperature(2338.8037).expect("in range");
        assert_relative_eq!(t, 20.0, epsilon = 1e-6);
        assert!(saturation_temperature(1e-6).is_err());
    }

    #[test]
    fn enthalpy_round_trips() {
        let h = enthalpy(24.39, 0.01);
        assert_relative_eq!(h, 50_000.0, max_relative = 1e-4);
        assert_relative_eq!(dry_bulb_from_enthalpy(h, 0.01), 24.39, epsilon = 1e-9);
        assert_relative_eq!(humidity_ratio_from_enthalpy(24.39, h), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn wet_bulb_equation_is_consistent() {
        let w = humidity_ratio_from_wet_bulb(21.0, 15.0, STANDARD_PRESSURE);
        assert_relative_eq!(w, 0.008_162_94, max_relative = 1e-5);
        assert_relative_eq!(
            dry_bulb_from_wet_bulb(15.0, w, STANDARD_PRESSURE),
            21.0,
            epsilon = 1e-9
        );
        let twb = wet_bulb(21.0, w, STANDARD_PRESSURE).expect("wet bulb exists");
        assert_relative_eq!(twb, 15.0, epsilon = 1e-8);
    }

    #[test]
    fn saturated_air_has_equal_wet_and_dry_bulb() {
        let w = saturation_humidity_ratio(20.0, STANDARD_PRESSURE);
        assert_relative_eq!(w, 0.014_695, max_relative = 1e-4);
        let twb = wet_bulb(20.0, w, STANDARD_PRESSURE).expect("wet bulb exists");
        assert_relative_eq!(twb, 20.0, epsilon = 1e-8);
    }

    #[test]
    fn specific_volume_at_standard_conditions() {
        assert_relative_eq!(
            specific_volume(21.0, 0.008_162_94, STANDARD_PRESSURE),
            0.844_23,
            max_relative = 1e-4
        );
    }
}
