//! The space condition line.

use airco_thermo::{
    HumidAir, PropertyError,
    humid_air::relations::{
        CP_DRY_AIR, CP_VAPOR, HG_0C, enthalpy, specific_heat, vapor_enthalpy,
    },
};
use uom::si::{
    f64::{Power, Ratio, ThermodynamicTemperature},
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use super::saturation;

/// Span below the space temperature drawn when the line never saturates, K.
const FALLBACK_SPAN: f64 = 20.0;

/// A dry bulb and humidity ratio pair, ready for plotting on a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePoint {
    pub dry_bulb: ThermodynamicTemperature,
    pub humidity_ratio: Ratio,
}

impl StatePoint {
    fn new(t: f64, w: f64) -> Self {
        Self {
            dry_bulb: ThermodynamicTemperature::new::<degree_celsius>(t),
            humidity_ratio: Ratio::new::<ratio>(w),
        }
    }
}

/// The locus of supply states that absorb a space's loads in the right ratio.
///
/// Any supply state on the line, delivered at the flow that meets the
/// sensible load, also meets the latent load. The line passes through the
/// space state and usually extends down to the saturation curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceConditionLine {
    pressure: f64,
    t_space: f64,
    w_space: f64,
    q_sen: f64,
    q_lat: f64,
}

impl SpaceConditionLine {
    /// Builds the line from the space state and its sensible and latent loads.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidInput`] if the loads are not finite, sum
    /// to zero, or have no sensible part.
    pub fn new(space: HumidAir, q_sen: Power, q_lat: Power) -> Result<Self, PropertyError> {
        let (pressure, t_space, w_space) = space.si();
        let (q_sen, q_lat) = (q_sen.get::<watt>(), q_lat.get::<watt>());
        if !(q_sen.is_finite() && q_lat.is_finite()) || q_sen == 0.0 || q_sen + q_lat == 0.0 {
            return Err(PropertyError::InvalidInput(format!(
                "loads of {q_sen} W sensible and {q_lat} W latent do not define a condition line"
            )));
        }
        Ok(Self {
            pressure,
            t_space,
            w_space,
            q_sen,
            q_lat,
        })
    }

    /// Builds the line from the total load and its sensible heat ratio.
    ///
    /// # Errors
    ///
    /// See [`SpaceConditionLine::new`].
    pub fn from_total(space: HumidAir, q: Power, shr: Ratio) -> Result<Self, PropertyError> {
        let q_sen = q * shr.get::<ratio>();
        Self::new(space, q_sen, q - q_sen)
    }

    #[must_use]
    pub fn sensible_heat(&self) -> Power {
        Power::new::<watt>(self.q_sen)
    }

    #[must_use]
    pub fn latent_heat(&self) -> Power {
        Power::new::<watt>(self.q_lat)
    }

    #[must_use]
    pub fn sensible_heat_ratio(&self) -> Ratio {
        Ratio::new::<ratio>(self.shr())
    }

    #[must_use]
    pub fn space_point(&self) -> StatePoint {
        StatePoint::new(self.t_space, self.w_space)
    }

    /// Returns the approximate slope dW/dT at the space point, per kelvin.
    #[must_use]
    pub fn slope(&self) -> f64 {
        let dt = 0.01;
        (self.w_at(self.t_space) - self.w_at(self.t_space - dt)) / dt
    }

    /// Returns the humidity ratio of the supply state on the line at `t`.
    #[must_use]
    pub fn humidity_ratio_at(&self, t: ThermodynamicTemperature) -> Ratio {
        Ratio::new::<ratio>(self.w_at(t.get::<degree_celsius>()))
    }

    /// Returns the dry bulb on the line at humidity ratio `w`.
    ///
    /// Returns `None` for a purely sensible load, where the line is horizontal.
    #[must_use]
    pub fn dry_bulb_at(&self, w: Ratio) -> Option<ThermodynamicTemperature> {
        let shr = self.shr();
        if (1.0 - shr).abs() <= 1e-9 {
            return None;
        }
        let w = w.get::<ratio>();
        let cp = specific_heat(w);
        let h_space = enthalpy(self.t_space, self.w_space);
        let t = (cp * self.t_space - shr * (h_space - HG_0C * w)) / (cp * (1.0 - shr));
        Some(ThermodynamicTemperature::new::<degree_celsius>(t))
    }

    /// Returns the supply state on the line at dry bulb `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state at `t` would be supersaturated.
    pub fn state_at_dry_bulb(&self, t: ThermodynamicTemperature) -> Result<HumidAir, PropertyError> {
        let t = t.get::<degree_celsius>();
        HumidAir::from_si(self.pressure, t, self.w_at(t))
    }

    /// Finds where the line meets the saturation curve below the space.
    ///
    /// # Errors
    ///
    /// Returns an error if the bisection fails.
    pub fn saturation_intersection(&self) -> Result<Option<HumidAir>, PropertyError> {
        saturation::crossing_below(self.t_space, self.pressure, |t| self.w_at(t))?
            .map(|t| HumidAir::from_si(self.pressure, t, self.w_at(t)))
            .transpose()
    }

    /// Returns the saturated end of the line, or a point 20 K below the space
    /// when the line does not reach saturation.
    ///
    /// # Errors
    ///
    /// See [`SpaceConditionLine::saturation_intersection`].
    pub fn start_point(&self) -> Result<StatePoint, PropertyError> {
        let t = match self.saturation_intersection()? {
            Some(state) => state.si().1,
            None => self.t_space - FALLBACK_SPAN,
        };
        Ok(StatePoint::new(t, self.w_at(t)))
    }

    #[must_use]
    pub fn end_point(&self) -> StatePoint {
        self.space_point()
    }

    fn shr(&self) -> f64 {
        self.q_sen / (self.q_sen + self.q_lat)
    }

    /// Supply humidity ratio at supply dry bulb `t`.
    ///
    /// Solves `h_space - h_supply = cp(W_supply) (T_space - t) / shr` for
    /// `W_supply`, which keeps the supply-to-space process at this ratio.
    fn w_at(&self, t: f64) -> f64 {
        let shr = self.shr();
        let dt = self.t_space - t;
        let h_space = enthalpy(self.t_space, self.w_space);
        (shr * (h_space - CP_DRY_AIR * t) - CP_DRY_AIR * dt) / (shr * vapor_enthalpy(t) + CP_VAPOR * dt)
    }
}
