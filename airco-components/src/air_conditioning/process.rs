//! Single-stream air-conditioning processes.

mod knowns;

use airco_core::units::SpecificEnthalpy;
use airco_thermo::{
    HumidAir, PropertyError,
    humid_air::relations::{STANDARD_PRESSURE, enthalpy, saturation_humidity_ratio},
};
use thiserror::Error;
use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Power, Pressure, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use knowns::{Knowns, Phase};

use super::saturation;

/// Relative tolerance for re-checking balances among known quantities.
const BALANCE_TOLERANCE: f64 = 0.01;

/// Errors that may occur when solving an air-conditioning process.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// The knowns do not determine the requested quantity.
    #[error("process is under-determined: {quantity} is unresolved")]
    Unresolved { quantity: &'static str },

    /// The knowns over-determine the process with contradictory values.
    #[error("process knowns are inconsistent: {balance} balance residual is {residual:.6e}")]
    Inconsistent {
        balance: &'static str,
        residual: f64,
    },

    /// A resolved quantity has no physical meaning.
    #[error("non-physical {quantity}: {value}")]
    NonPhysical { quantity: &'static str, value: f64 },

    /// A humid air state could not be evaluated.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Knowns for an [`AirConditioningProcess`].
///
/// Every setter is optional. Partial state setters such as
/// [`ProcessBuilder::dry_bulb_in`] override the matching part of a full state
/// given with [`ProcessBuilder::air_in`].
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct ProcessBuilder {
    pressure: Option<Pressure>,
    air_in: Option<HumidAir>,
    air_out: Option<HumidAir>,
    dry_bulb_in: Option<ThermodynamicTemperature>,
    dry_bulb_out: Option<ThermodynamicTemperature>,
    humidity_ratio_in: Option<Ratio>,
    humidity_ratio_out: Option<Ratio>,
    mass_rate: Option<MassRate>,
    heat: Option<Power>,
    sensible_heat: Option<Power>,
    latent_heat: Option<Power>,
    sensible_heat_ratio: Option<Ratio>,
    water_rate: Option<MassRate>,
    water_enthalpy: Option<SpecificEnthalpy>,
    contact_factor: Option<Ratio>,
    apparatus_dew_point: Option<HumidAir>,
}

impl ProcessBuilder {
    pub fn air_in(mut self, state: HumidAir) -> Self {
        self.air_in = Some(state);
        self
    }

    pub fn air_out(mut self, state: HumidAir) -> Self {
        self.air_out = Some(state);
        self
    }

    pub fn dry_bulb_in(mut self, t: ThermodynamicTemperature) -> Self {
        self.dry_bulb_in = Some(t);
        self
    }

    pub fn dry_bulb_out(mut self, t: ThermodynamicTemperature) -> Self {
        self.dry_bulb_out = Some(t);
        self
    }

    pub fn humidity_ratio_in(mut self, w: Ratio) -> Self {
        self.humidity_ratio_in = Some(w);
        self
    }

    pub fn humidity_ratio_out(mut self, w: Ratio) -> Self {
        self.humidity_ratio_out = Some(w);
        self
    }

    /// Sets the dry-air mass flow.
    pub fn mass_rate(mut self, m: MassRate) -> Self {
        self.mass_rate = Some(m);
        self
    }

    /// Sets the heat added to the air, excluding energy carried by water.
    pub fn heat(mut self, q: Power) -> Self {
        self.heat = Some(q);
        self
    }

    pub fn sensible_heat(mut self, q: Power) -> Self {
        self.sensible_heat = Some(q);
        self
    }

    pub fn latent_heat(mut self, q: Power) -> Self {
        self.latent_heat = Some(q);
        self
    }

    pub fn sensible_heat_ratio(mut self, shr: Ratio) -> Self {
        self.sensible_heat_ratio = Some(shr);
        self
    }

    /// Sets the water added to the air, negative for condensate.
    pub fn water_rate(mut self, m: MassRate) -> Self {
        self.water_rate = Some(m);
        self
    }

    /// Sets the specific enthalpy of the added or removed water.
    pub fn water_enthalpy(mut self, h: SpecificEnthalpy) -> Self {
        self.water_enthalpy = Some(h);
        self
    }

    pub fn contact_factor(mut self, beta: Ratio) -> Self {
        self.contact_factor = Some(beta);
        self
    }

    pub fn apparatus_dew_point(mut self, state: HumidAir) -> Self {
        self.apparatus_dew_point = Some(state);
        self
    }

    /// Resolves every quantity the knowns determine.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Inconsistent`] if the knowns contradict each
    /// other, [`ProcessError::NonPhysical`] for a non-positive mass flow, and
    /// [`ProcessError::Property`] if the ADP search fails.
    pub fn solve(self) -> Result<AirConditioningProcess, ProcessError> {
        let pressure = self.resolved_pressure();
        let mut x = self.knowns();

        x.propagate(Phase::Exact);
        if x.hw.is_none() {
            x.hw = Some(0.0);
            x.propagate(Phase::Exact);
        }
        x.propagate(Phase::Approximate);

        if x.tadp.is_none() {
            if let Some((ti, wi, to, wo)) = x.states() {
                if to < ti {
                    let slope = (wo - wi) / (to - ti);
                    let adp = saturation::crossing_below(to, pressure, |t| wi + slope * (t - ti))?;
                    if let Some(ta) = adp {
                        x.tadp = Some(ta);
                        x.wadp = Some(saturation_humidity_ratio(ta, pressure));
                        x.propagate(Phase::Approximate);
                    }
                }
            }
        }

        check(&x)?;
        debug!(
            t_in = ?x.ti,
            t_out = ?x.to,
            mass_rate = ?x.m,
            heat = ?x.q,
            shr = ?x.shr,
            "resolved air-conditioning process"
        );
        Ok(AirConditioningProcess {
            pressure,
            knowns: x,
        })
    }

    fn resolved_pressure(&self) -> f64 {
        self.pressure
            .or_else(|| self.air_in.map(|s| s.pressure()))
            .or_else(|| self.air_out.map(|s| s.pressure()))
            .or_else(|| self.apparatus_dew_point.map(|s| s.pressure()))
            .map_or(STANDARD_PRESSURE, |p| p.get::<pascal>())
    }

    fn knowns(&self) -> Knowns {
        let celsius = |t: ThermodynamicTemperature| t.get::<degree_celsius>();
        let plain = |r: Ratio| r.get::<ratio>();
        let kg_per_s = |m: MassRate| m.get::<kilogram_per_second>();
        let watts = |q: Power| q.get::<watt>();
        let (_, ti, wi) = split(self.air_in);
        let (_, to, wo) = split(self.air_out);
        let (_, tadp, wadp) = split(self.apparatus_dew_point);

        Knowns {
            ti: self.dry_bulb_in.map(celsius).or(ti),
            wi: self.humidity_ratio_in.map(plain).or(wi),
            to: self.dry_bulb_out.map(celsius).or(to),
            wo: self.humidity_ratio_out.map(plain).or(wo),
            m: self.mass_rate.map(kg_per_s),
            q: self.heat.map(watts),
            qs: self.sensible_heat.map(watts),
            ql: self.latent_heat.map(watts),
            qa: None,
            shr: self.sensible_heat_ratio.map(plain),
            mw: self.water_rate.map(kg_per_s),
            hw: self.water_enthalpy.map(|h| h.get::<joule_per_kilogram>()),
            beta: self.contact_factor.map(plain),
            tadp,
            wadp,
        }
    }
}

fn split(state: Option<HumidAir>) -> (Option<f64>, Option<f64>, Option<f64>) {
    match state.map(|s| s.si()) {
        Some((p, t, w)) => (Some(p), Some(t), Some(w)),
        None => (None, None, None),
    }
}

/// Re-checks the balances among all known quantities.
fn check(x: &Knowns) -> Result<(), ProcessError> {
    if let Some(m) = x.m {
        if m <= 0.0 {
            return Err(ProcessError::NonPhysical {
                quantity: "dry-air mass flow",
                value: m,
            });
        }
    }
    let m = x.m.unwrap_or(0.0);

    if let (Some(mw), Some(wi), Some(wo)) = (x.mw, x.wi, x.wo) {
        let residual = mw - m * (wo - wi);
        balance("mass", residual, mw.abs().max(m * 1e-4))?;
    }
    if let (Some(qa), Some(q), Some(mw), Some(hw)) = (x.qa, x.q, x.mw, x.hw) {
        let residual = qa - q - mw * hw;
        let scale = qa.abs().max(q.abs()).max((mw * hw).abs()).max(m * 1000.0);
        balance("energy", residual, scale)?;
    }
    if let (Some(qa), Some((ti, wi, to, wo))) = (x.qa, x.states()) {
        let residual = qa - m * (enthalpy(to, wo) - enthalpy(ti, wi));
        balance("enthalpy", residual, qa.abs().max(m * 1000.0))?;
    }
    Ok(())
}

fn balance(name: &'static str, residual: f64, scale: f64) -> Result<(), ProcessError> {
    if residual.abs() <= BALANCE_TOLERANCE * scale {
        Ok(())
    } else {
        Err(ProcessError::Inconsistent {
            balance: name,
            residual,
        })
    }
}

fn known(value: Option<f64>, quantity: &'static str) -> Result<f64, ProcessError> {
    value.ok_or(ProcessError::Unresolved { quantity })
}

/// A resolved balance over one stream passing through a coil, humidifier,
/// washer, or conditioned space.
///
/// `heat` is the heat added to the air (negative for cooling) and
/// `water_rate` the water added to it (negative for condensate), so that
/// `ṁ (h_out - h_in) = Q + ṁ_w h_w` and `ṁ_w = ṁ (W_out - W_in)`.
///
/// # Example
///
/// ```
/// use airco_components::air_conditioning::AirConditioningProcess;
/// use airco_thermo::{HumidAir, Property};
/// use uom::si::{
///     f64::{MassRate, ThermodynamicTemperature},
///     mass_rate::kilogram_per_second,
///     power::kilowatt,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let inlet = HumidAir::new(
///     Property::DryBulb(ThermodynamicTemperature::new::<degree_celsius>(21.0)),
///     Property::WetBulb(ThermodynamicTemperature::new::<degree_celsius>(15.0)),
/// )
/// .unwrap();
///
/// let heating = AirConditioningProcess::new()
///     .air_in(inlet)
///     .dry_bulb_out(ThermodynamicTemperature::new::<degree_celsius>(41.0))
///     .mass_rate(MassRate::new::<kilogram_per_second>(1.0))
///     .water_rate(MassRate::new::<kilogram_per_second>(0.0))
///     .solve()
///     .unwrap();
///
/// assert!(heating.heat().unwrap().get::<kilowatt>() > 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirConditioningProcess {
    pressure: f64,
    knowns: Knowns,
}

impl AirConditioningProcess {
    /// Starts a process at standard atmospheric pressure.
    ///
    /// The pressure of the first full state given is used instead, if any.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> ProcessBuilder {
        ProcessBuilder::default()
    }

    /// Starts a process at the given barometric pressure.
    pub fn builder(pressure: Pressure) -> ProcessBuilder {
        ProcessBuilder {
            pressure: Some(pressure),
            ..ProcessBuilder::default()
        }
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure)
    }

    /// Returns the inlet state.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Unresolved`] if the inlet is not determined, or
    /// [`ProcessError::Property`] if it is not a physical state.
    pub fn air_in(&self) -> Result<HumidAir, ProcessError> {
        let t = known(self.knowns.ti, "inlet dry bulb")?;
        let w = known(self.knowns.wi, "inlet humidity ratio")?;
        Ok(HumidAir::from_si(self.pressure, t, w)?)
    }

    /// Returns the outlet state.
    ///
    /// # Errors
    ///
    /// See [`AirConditioningProcess::air_in`].
    pub fn air_out(&self) -> Result<HumidAir, ProcessError> {
        let t = known(self.knowns.to, "outlet dry bulb")?;
        let w = known(self.knowns.wo, "outlet humidity ratio")?;
        Ok(HumidAir::from_si(self.pressure, t, w)?)
    }

    pub fn dry_bulb_in(&self) -> Result<ThermodynamicTemperature, ProcessError> {
        known(self.knowns.ti, "inlet dry bulb").map(ThermodynamicTemperature::new::<degree_celsius>)
    }

    pub fn dry_bulb_out(&self) -> Result<ThermodynamicTemperature, ProcessError> {
        known(self.knowns.to, "outlet dry bulb").map(ThermodynamicTemperature::new::<degree_celsius>)
    }

    pub fn humidity_ratio_in(&self) -> Result<Ratio, ProcessError> {
        known(self.knowns.wi, "inlet humidity ratio").map(Ratio::new::<ratio>)
    }

    pub fn humidity_ratio_out(&self) -> Result<Ratio, ProcessError> {
        known(self.knowns.wo, "outlet humidity ratio").map(Ratio::new::<ratio>)
    }

    /// Returns the dry-air mass flow.
    pub fn mass_rate(&self) -> Result<MassRate, ProcessError> {
        known(self.knowns.m, "dry-air mass flow").map(MassRate::new::<kilogram_per_second>)
    }

    /// Returns the heat added to the air, excluding energy carried by water.
    pub fn heat(&self) -> Result<Power, ProcessError> {
        known(self.knowns.q, "heat").map(Power::new::<watt>)
    }

    pub fn sensible_heat(&self) -> Result<Power, ProcessError> {
        known(self.knowns.qs, "sensible heat").map(Power::new::<watt>)
    }

    pub fn latent_heat(&self) -> Result<Power, ProcessError> {
        known(self.knowns.ql, "latent heat").map(Power::new::<watt>)
    }

    pub fn sensible_heat_ratio(&self) -> Result<Ratio, ProcessError> {
        known(self.knowns.shr, "sensible heat ratio").map(Ratio::new::<ratio>)
    }

    /// Returns the water added to the air, negative for condensate.
    pub fn water_rate(&self) -> Result<MassRate, ProcessError> {
        known(self.knowns.mw, "water mass flow").map(MassRate::new::<kilogram_per_second>)
    }

    /// Returns the water enthalpy, zero when it was neither given nor implied.
    pub fn water_enthalpy(&self) -> Result<SpecificEnthalpy, ProcessError> {
        known(self.knowns.hw, "water enthalpy").map(SpecificEnthalpy::new::<joule_per_kilogram>)
    }

    /// Returns the apparatus dew point as a saturated state.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Unresolved`] unless an ADP was given or the
    /// process cools with both states resolved.
    pub fn apparatus_dew_point(&self) -> Result<HumidAir, ProcessError> {
        let t = known(self.knowns.tadp, "apparatus dew point")?;
        let w = known(self.knowns.wadp, "apparatus dew point")?;
        Ok(HumidAir::from_si(self.pressure, t, w)?)
    }

    /// Returns the fraction of the air brought to the ADP.
    pub fn contact_factor(&self) -> Result<Ratio, ProcessError> {
        known(self.knowns.beta, "contact factor").map(Ratio::new::<ratio>)
    }

    /// Returns `1 - beta`, the fraction of air bypassing the coil unchanged.
    pub fn bypass_factor(&self) -> Result<Ratio, ProcessError> {
        known(self.knowns.beta, "contact factor").map(|beta| Ratio::new::<ratio>(1.0 - beta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use airco_core::units::us;
    use airco_thermo::{Property, Water};
    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram,
        mass_rate::kilogram_per_hour,
        power::kilowatt,
        pressure::{bar, kilopascal},
        ratio::percent,
        volume_rate::cubic_meter_per_second,
    };

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn air(t: f64, second: Property) -> HumidAir {
        HumidAir::new(Property::DryBulb(celsius(t)), second).expect("valid state")
    }

    fn wet_bulb(t: f64) -> Property {
        Property::WetBulb(celsius(t))
    }

    fn kg_per_kg(w: f64) -> Property {
        Property::HumidityRatio(Ratio::new::<ratio>(w))
    }

    #[test]
    fn sensible_heating() -> Result<(), ProcessError> {
        let inlet = air(21.0, wet_bulb(15.0));
        let volume = uom::si::f64::VolumeRate::new::<cubic_meter_per_second>(1.5);
        let m = volume * inlet.density();

        let heating = AirConditioningProcess::new()
            .air_in(inlet)
            .dry_bulb_out(celsius(41.0))
            .mass_rate(m)
            .water_rate(MassRate::new::<kilogram_per_second>(0.0))
            .solve()?;

        assert_relative_eq!(heating.mass_rate()?.get::<kilogram_per_second>(), 1.7768, max_relative = 1e-3);
        assert_relative_eq!(heating.heat()?.get::<kilowatt>(), 36.29, max_relative = 2e-3);
        assert_relative_eq!(heating.sensible_heat_ratio()?.get::<ratio>(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(
            heating.humidity_ratio_out()?.get::<ratio>(),
            inlet.humidity_ratio().get::<ratio>()
        );
        assert!(heating.apparatus_dew_point().is_err());
        Ok(())
    }

    #[test]
    fn cooling_and_dehumidification_locates_adp() -> Result<(), ProcessError> {
        let inlet = air(28.0, wet_bulb(20.6));
        let outlet = air(12.5, kg_per_kg(0.008_336));
        let m = MassRate::new::<kilogram_per_second>(1.7245);

        let coil = AirConditioningProcess::new()
            .air_in(inlet)
            .air_out(outlet)
            .mass_rate(m)
            .water_enthalpy(SpecificEnthalpy::new::<joule_per_kilogram>(0.0))
            .solve()?;

        assert_relative_eq!(coil.heat()?.get::<kilowatt>(), -44.15, max_relative = 1e-2);
        assert_relative_eq!(coil.sensible_heat_ratio()?.get::<ratio>(), 0.623, epsilon = 5e-3);
        let adp = coil.apparatus_dew_point()?;
        assert_relative_eq!(adp.dry_bulb().get::<degree_celsius>(), 10.32, epsilon = 0.05);
        assert_relative_eq!(adp.relative_humidity().get::<ratio>(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(coil.contact_factor()?.get::<ratio>(), 0.8768, epsilon = 2e-3);
        assert!(coil.water_rate()?.get::<kilogram_per_second>() < 0.0);
        Ok(())
    }

    #[test]
    fn evaporative_cooling_finds_water_added() -> Result<(), ProcessError> {
        let p = Pressure::new::<kilopascal>(95.0);
        let inlet = HumidAir::with_pressure(p, Property::DryBulb(celsius(38.0)), wet_bulb(20.0))
            .expect("valid state");
        let outlet = HumidAir::with_pressure(p, Property::DryBulb(celsius(25.0)), wet_bulb(20.0))
            .expect("valid state");
        let adp = HumidAir::saturated(p, celsius(20.0)).expect("valid state");
        let water = Water::from_temperature_pressure(celsius(20.0), p).expect("liquid water");

        let cooler = AirConditioningProcess::builder(p)
            .air_in(inlet)
            .air_out(outlet)
            .apparatus_dew_point(adp)
            .mass_rate(MassRate::new::<kilogram_per_second>(0.75))
            .heat(Power::new::<watt>(0.0))
            .water_enthalpy(water.enthalpy())
            .solve()?;

        assert_relative_eq!(inlet.relative_humidity().get::<percent>(), 18.66, epsilon = 0.05);
        assert_relative_eq!(cooler.air_out()?.relative_humidity().get::<percent>(), 64.13, epsilon = 0.1);
        assert_relative_eq!(cooler.water_rate()?.get::<kilogram_per_second>(), 0.004_041, max_relative = 5e-3);
        assert_relative_eq!(cooler.contact_factor()?.get::<ratio>(), 13.0 / 18.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn washer_with_contact_factor() -> Result<(), ProcessError> {
        let inlet = air(15.0, wet_bulb(10.0));
        let adp = HumidAir::saturated(inlet.pressure(), celsius(10.0)).expect("valid state");

        let washer = AirConditioningProcess::new()
            .air_in(inlet)
            .apparatus_dew_point(adp)
            .contact_factor(Ratio::new::<ratio>(0.9))
            .water_rate(MassRate::new::<kilogram_per_hour>(12.10))
            .heat(Power::new::<watt>(0.0))
            .solve()?;

        assert_relative_eq!(washer.dry_bulb_out()?.get::<degree_celsius>(), 10.5, epsilon = 1e-9);
        assert_relative_eq!(washer.humidity_ratio_out()?.get::<ratio>(), 0.007_425, epsilon = 1e-5);
        assert_relative_eq!(washer.mass_rate()?.get::<kilogram_per_second>(), 1.8212, max_relative = 5e-3);
        assert_relative_eq!(washer.bypass_factor()?.get::<ratio>(), 0.1, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn steam_injection_at_30_bar() -> Result<(), ProcessError> {
        let inlet = air(28.0, kg_per_kg(0.010_098));
        let steam = Water::saturated_at_pressure(Pressure::new::<bar>(30.0), Ratio::new::<ratio>(1.0))
            .expect("saturated steam");
        assert_relative_eq!(steam.enthalpy().get::<kilojoule_per_kilogram>(), 2803.265, epsilon = 1e-2);

        let humidifier = AirConditioningProcess::new()
            .air_in(inlet)
            .mass_rate(MassRate::new::<kilogram_per_second>(1.0))
            .water_rate(MassRate::new::<kilogram_per_second>(0.002))
            .water_enthalpy(steam.enthalpy())
            .heat(Power::new::<watt>(0.0))
            .solve()?;

        assert_relative_eq!(humidifier.humidity_ratio_out()?.get::<ratio>(), 0.012_098, epsilon = 1e-9);
        assert!(humidifier.dry_bulb_out()?.get::<degree_celsius>() > 28.0);
        Ok(())
    }

    #[test]
    fn zone_supply_from_shr_and_load() -> Result<(), ProcessError> {
        let zone = HumidAir::new(
            Property::DryBulb(us::fahrenheit(78.0)),
            Property::RelativeHumidity(Ratio::new::<percent>(50.0)),
        )
        .expect("valid state");

        let space = AirConditioningProcess::new()
            .dry_bulb_in(us::fahrenheit(58.0))
            .air_out(zone)
            .heat(us::btu_per_hour(120_000.0))
            .sensible_heat_ratio(Ratio::new::<ratio>(0.7))
            .solve()?;

        assert_relative_eq!(us::in_lb_per_hour(space.mass_rate()?), 17_215.0, max_relative = 5e-3);
        let supply = space.air_in()?;
        let qs = space.sensible_heat()?.get::<watt>();
        let ql = space.latent_heat()?.get::<watt>();
        assert_relative_eq!(qs / (qs + ql), 0.7, epsilon = 1e-9);
        assert!(supply.humidity_ratio() < zone.humidity_ratio());
        Ok(())
    }

    #[test]
    fn unresolved_quantities_are_reported() -> Result<(), ProcessError> {
        let process = AirConditioningProcess::new()
            .air_in(air(20.0, wet_bulb(14.0)))
            .dry_bulb_out(celsius(30.0))
            .solve()?;

        assert_eq!(
            process.mass_rate(),
            Err(ProcessError::Unresolved {
                quantity: "dry-air mass flow"
            })
        );
        assert!(process.air_out().is_err());
        Ok(())
    }

    #[test]
    fn contradictory_knowns_are_inconsistent() {
        let result = AirConditioningProcess::new()
            .air_in(air(20.0, kg_per_kg(0.008)))
            .air_out(air(30.0, kg_per_kg(0.008)))
            .mass_rate(MassRate::new::<kilogram_per_second>(1.0))
            .heat(Power::new::<kilowatt>(50.0))
            .water_enthalpy(SpecificEnthalpy::new::<joule_per_kilogram>(0.0))
            .solve();

        assert!(matches!(
            result,
            Err(ProcessError::Inconsistent { balance: "enthalpy", .. })
        ));
    }

    #[test]
    fn negative_mass_flow_is_non_physical() {
        let result = AirConditioningProcess::new()
            .air_in(air(20.0, kg_per_kg(0.008)))
            .air_out(air(30.0, kg_per_kg(0.008)))
            .heat(Power::new::<kilowatt>(-5.0))
            .water_enthalpy(SpecificEnthalpy::new::<joule_per_kilogram>(0.0))
            .solve();

        assert!(matches!(result, Err(ProcessError::NonPhysical { .. })));
    }
}
