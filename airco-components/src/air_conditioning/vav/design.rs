use airco_thermo::{AirStream, HumidAir, Property};
use tracing::debug;
use uom::si::{
    f64::{
        MassRate, Power, Ratio, TemperatureInterval, ThermodynamicTemperature, VolumeRate,
    },
    power::watt,
    ratio::ratio,
};

use crate::air_conditioning::{AirConditioningProcess, Fan, FanSpec};

use super::{
    CoilLoad, DesignError, Zone, ZoneResult, before_heating, carries_load, heat_between, heated,
    mix_all, zone_flow, zone_return,
};

/// Parameters of the summer design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummerParams {
    /// Supply temperature below the coolest zone.
    pub supply_temperature_difference: TemperatureInterval,
    /// Relative humidity of the supply air.
    pub coil_relative_humidity: Ratio,
    pub supply_fan: Option<FanSpec>,
    pub supply_duct_gain: Power,
    pub return_fan: Option<FanSpec>,
    pub return_duct_gain: Power,
}

impl SummerParams {
    /// Creates parameters with an 85 % coil humidity, no fans, and no duct gains.
    #[must_use]
    pub fn new(supply_temperature_difference: TemperatureInterval) -> Self {
        Self {
            supply_temperature_difference,
            coil_relative_humidity: Ratio::new::<ratio>(0.85),
            supply_fan: None,
            supply_duct_gain: Power::new::<watt>(0.0),
            return_fan: None,
            return_duct_gain: Power::new::<watt>(0.0),
        }
    }
}

/// Results of the summer design.
#[derive(Debug, Clone, PartialEq)]
pub struct SummerResults {
    pub zones: Vec<ZoneResult>,
    pub ventilation_rate: MassRate,
    pub supply_rate: MassRate,
    /// Air delivered to the zones.
    pub supply_air: HumidAir,
    /// Air leaving the cooling coil, upstream of the supply fan and duct.
    pub cooled_air: HumidAir,
    /// Return air reaching the mixing box.
    pub return_air: HumidAir,
    /// Air entering the cooling coil.
    pub mixed_air: HumidAir,
    pub cooling_coil: CoilLoad,
    pub supply_volume_rate: VolumeRate,
    pub return_volume_rate: VolumeRate,
}

impl SummerResults {
    #[must_use]
    pub fn supply_temperature(&self) -> ThermodynamicTemperature {
        self.supply_air.dry_bulb()
    }

    #[must_use]
    pub fn return_temperature(&self) -> ThermodynamicTemperature {
        self.return_air.dry_bulb()
    }
}

/// Parameters of the winter design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinterParams {
    /// Hottest air a reheat coil may deliver to a heating zone.
    pub max_supply_temperature: ThermodynamicTemperature,
    pub supply_fan: Option<FanSpec>,
    /// Smallest zone flow as a fraction of its summer design flow.
    pub min_flow_fraction: Ratio,
}

impl WinterParams {
    /// Creates parameters with no fan and a 60 % minimum flow fraction.
    #[must_use]
    pub fn new(max_supply_temperature: ThermodynamicTemperature) -> Self {
        Self {
            max_supply_temperature,
            supply_fan: None,
            min_flow_fraction: Ratio::new::<ratio>(0.6),
        }
    }
}

/// Results of the winter design.
#[derive(Debug, Clone, PartialEq)]
pub struct WinterResults {
    pub zones: Vec<ZoneResult>,
    pub ventilation_rate: MassRate,
    pub supply_rate: MassRate,
    /// Air leaving the central unit, before any zone reheat.
    pub supply_air: HumidAir,
    pub return_air: HumidAir,
    pub mixed_air: HumidAir,
    /// Preheat at the design point, zero when the mixed air needs cooling.
    pub preheat: Power,
    /// Preheat needed to bring pure ventilation air to the cooled-air temperature.
    pub peak_preheat: Power,
    /// Cooling coil load, zero when the mixed air needs preheat.
    pub cooling_coil: Power,
    pub reheat: Power,
    /// Peak preheat plus total reheat.
    pub total_heat: Power,
    pub supply_volume_rate: VolumeRate,
}

impl WinterResults {
    #[must_use]
    pub fn supply_temperature(&self) -> ThermodynamicTemperature {
        self.supply_air.dry_bulb()
    }

    #[must_use]
    pub fn return_temperature(&self) -> ThermodynamicTemperature {
        self.return_air.dry_bulb()
    }
}

/// A multi-zone VAV system with reheat, sized at design conditions.
///
/// Run [`VavSystem::design_summer`] first. The winter design reuses the
/// summer zone flows and cooled-air temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct VavSystem {
    zones: Vec<Zone>,
    outdoor_air_summer: HumidAir,
    outdoor_air_winter: HumidAir,
    ventilation: VolumeRate,
    summer: Option<SummerResults>,
}

impl VavSystem {
    /// Creates a system from its zones, outdoor design states, and the
    /// outdoor ventilation volume flow.
    #[must_use]
    pub fn new(
        zones: Vec<Zone>,
        outdoor_air_summer: HumidAir,
        outdoor_air_winter: HumidAir,
        ventilation: VolumeRate,
    ) -> Self {
        Self {
            zones,
            outdoor_air_summer,
            outdoor_air_winter,
            ventilation,
            summer: None,
        }
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Returns the stored summer design, if it has been run.
    #[must_use]
    pub fn summer(&self) -> Option<&SummerResults> {
        self.summer.as_ref()
    }

    /// Sizes the system for the summer peak and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::MissingSeason`] if a zone has no summer loads,
    /// or an error from any of the underlying balances.
    pub fn design_summer(&mut self, params: &SummerParams) -> Result<SummerResults, DesignError> {
        let oa = self.outdoor_air_summer;
        let m_vent: MassRate = self.ventilation * oa.density();

        let mut coolest: Option<ThermodynamicTemperature> = None;
        for zone in &self.zones {
            let t = zone.summer()?.zone_air.dry_bulb();
            if coolest.is_none_or(|c| t < c) {
                coolest = Some(t);
            }
        }
        let coolest = coolest.ok_or(DesignError::NoZones)?;
        let supply_air = HumidAir::with_pressure(
            oa.pressure(),
            Property::DryBulb(coolest - params.supply_temperature_difference),
            Property::RelativeHumidity(params.coil_relative_humidity),
        )?;
        debug!(t_supply = ?supply_air.dry_bulb(), "summer supply state");

        let mut zones = Vec::with_capacity(self.zones.len());
        for zone in &self.zones {
            let season = zone.summer()?;
            let m = zone_flow(supply_air, season)?.ok_or_else(|| DesignError::LoadNotCarried {
                zone: zone.name.clone(),
            })?;
            let return_air = zone_return(supply_air, season, m)?;
            debug!(zone = %zone.name, m = ?m, "summer zone flow");
            zones.push(ZoneResult {
                name: zone.name.clone(),
                mass_rate: m,
                supply_air,
                return_air,
                reheat: Power::new::<watt>(0.0),
            });
        }
        let supply_rate: MassRate = zones.iter().map(|z| z.mass_rate).sum();

        let returns = self
            .zones
            .iter()
            .zip(&zones)
            .map(|(zone, result)| {
                let exhaust = zone.summer()?.m_exhaust;
                Ok(AirStream::new(result.return_air, result.mass_rate - exhaust)?)
            })
            .collect::<Result<Vec<_>, DesignError>>()?;
        let return_rate: MassRate = returns.iter().map(AirStream::mass_rate).sum();
        let mut return_air = mix_all(returns)?.state;
        return_air = heated(return_air, return_rate, params.return_duct_gain)?;
        if let Some(spec) = params.return_fan {
            return_air = Fan::from_inlet(spec, return_air, Some(return_rate))?.air_out();
        }

        let mixed_air = mix_all([
            AirStream::new(oa, m_vent)?,
            AirStream::new(return_air, supply_rate - m_vent)?,
        ])?
        .state;

        let mut cooled_air = before_heating(supply_air, supply_rate, params.supply_duct_gain)?;
        if let Some(spec) = params.supply_fan {
            cooled_air = Fan::from_outlet(spec, cooled_air, Some(supply_rate))?.air_in();
        }

        let coil = AirConditioningProcess::new()
            .air_in(mixed_air)
            .air_out(cooled_air)
            .mass_rate(supply_rate)
            .solve()?;
        let cooling_coil = CoilLoad::of(&coil)?;
        debug!(q = ?cooling_coil.total, "summer cooling coil");

        let results = SummerResults {
            zones,
            ventilation_rate: m_vent,
            supply_rate,
            supply_air,
            cooled_air,
            return_air,
            mixed_air,
            cooling_coil,
            supply_volume_rate: AirStream::new(supply_air, supply_rate)?.volume_rate(),
            return_volume_rate: AirStream::new(return_air, supply_rate)?.volume_rate(),
        };
        self.summer = Some(results.clone());
        Ok(results)
    }

    /// Sizes preheat, reheat, and winter flows from the stored summer design.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::SummerDesignMissing`] if the summer design has
    /// not been run, [`DesignError::ReheatRequired`] if a zone without a
    /// reheat coil needs one, or an error from any of the underlying balances.
    pub fn design_winter(&self, params: &WinterParams) -> Result<WinterResults, DesignError> {
        let summer = self.summer.as_ref().ok_or(DesignError::SummerDesignMissing)?;
        let oa = self.outdoor_air_winter;
        let m_vent: MassRate = self.ventilation * oa.density();

        let peak_preheat = AirConditioningProcess::new()
            .air_in(oa)
            .dry_bulb_out(summer.cooled_air.dry_bulb())
            .mass_rate(m_vent)
            .solve()?
            .sensible_heat()?;

        let min_fraction = params.min_flow_fraction.get::<ratio>();
        let mut flows = Vec::with_capacity(self.zones.len());
        for (zone, design) in self.zones.iter().zip(&summer.zones) {
            let season = zone.winter()?;
            let t_in = if season.is_heating() {
                params.max_supply_temperature
            } else {
                summer.supply_temperature()
            };
            let minimum = design.mass_rate * min_fraction;
            let m = if carries_load(t_in, season) {
                let needed = AirConditioningProcess::new()
                    .dry_bulb_in(t_in)
                    .air_out(season.zone_air)
                    .sensible_heat(season.q_sen)
                    .latent_heat(season.q_lat)
                    .solve()?
                    .mass_rate()?;
                if needed < minimum { minimum } else { needed }
            } else {
                minimum
            };
            let supply = AirConditioningProcess::new()
                .air_out(season.zone_air)
                .mass_rate(m)
                .sensible_heat(season.q_sen)
                .latent_heat(season.q_lat)
                .solve()?
                .air_in()?;
            debug!(zone = %zone.name, m = ?m, t_supply = ?supply.dry_bulb(), "winter zone flow");
            flows.push((zone, season, m, supply));
        }

        let t_supply = flows
            .iter()
            .map(|(_, _, _, supply)| supply.dry_bulb())
            .reduce(|a, b| if b < a { b } else { a })
            .ok_or(DesignError::NoZones)?;
        let supply_rate: MassRate = flows.iter().map(|(_, _, m, _)| *m).sum();

        let returns = flows
            .iter()
            .map(|(_, season, m, _)| AirStream::new(season.zone_air, *m - season.m_exhaust))
            .collect::<Result<Vec<_>, _>>()?;
        let return_air = mix_all(returns)?.state;
        let mixed_air = mix_all([
            AirStream::new(oa, m_vent)?,
            AirStream::new(return_air, supply_rate - m_vent)?,
        ])?
        .state;

        let supply_air = mixed_air.with_dry_bulb(t_supply)?;
        let conditioned = match params.supply_fan {
            Some(spec) => Fan::from_outlet(spec, supply_air, Some(supply_rate))?.air_in(),
            None => supply_air,
        };
        let central = heat_between(mixed_air, conditioned, supply_rate)?;
        let zero = Power::new::<watt>(0.0);
        let (preheat, cooling_coil) = if mixed_air.dry_bulb() < conditioned.dry_bulb() {
            (central, zero)
        } else {
            (zero, central)
        };

        let mut zones = Vec::with_capacity(flows.len());
        let mut reheat = zero;
        for (zone, season, m, supply) in flows {
            let q = AirConditioningProcess::new()
                .air_in(supply_air)
                .dry_bulb_out(supply.dry_bulb())
                .mass_rate(m)
                .solve()?
                .sensible_heat()?;
            if !zone.reheat_coil && q.get::<watt>() > 1e-6 {
                return Err(DesignError::ReheatRequired {
                    zone: zone.name.clone(),
                    reheat: q,
                });
            }
            reheat += q;
            zones.push(ZoneResult {
                name: zone.name.clone(),
                mass_rate: m,
                supply_air: supply_air.with_dry_bulb(supply.dry_bulb())?,
                return_air: season.zone_air,
                reheat: q,
            });
        }
        debug!(preheat = ?preheat, reheat = ?reheat, "winter heating loads");

        Ok(WinterResults {
            zones,
            ventilation_rate: m_vent,
            supply_rate,
            supply_air,
            return_air,
            mixed_air,
            preheat,
            peak_preheat,
            cooling_coil,
            reheat,
            total_heat: reheat + peak_preheat,
            supply_volume_rate: AirStream::new(supply_air, supply_rate)?.volume_rate(),
        })
    }
}
