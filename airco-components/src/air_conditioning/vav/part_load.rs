use airco_thermo::{AirStream, HumidAir, Property};
use tracing::{debug, trace};
use uom::si::{
    f64::{MassRate, Power, Ratio, ThermodynamicTemperature, VolumeRate},
    power::watt,
    ratio::ratio,
};

use crate::air_conditioning::{AirConditioningProcess, Fan, FanSpec};

use super::{CoilLoad, DesignError, Zone, ZoneResult, heat_between, mix_all, zone_flow, zone_return};

/// Parameters of a part-load analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartLoadParams {
    /// Relative humidity of the supply air.
    pub coil_relative_humidity: Ratio,
    pub supply_fan: Option<FanSpec>,
    /// Smallest zone flow as a fraction of its design flow.
    pub min_flow_fraction: Ratio,
}

impl Default for PartLoadParams {
    fn default() -> Self {
        Self {
            coil_relative_humidity: Ratio::new::<ratio>(0.85),
            supply_fan: None,
            min_flow_fraction: Ratio::new::<ratio>(0.6),
        }
    }
}

/// Results of a part-load analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PartLoadResults {
    pub zones: Vec<ZoneResult>,
    pub ventilation_rate: MassRate,
    pub supply_rate: MassRate,
    /// Air leaving the central unit.
    pub supply_air: HumidAir,
    pub return_air: HumidAir,
    pub mixed_air: HumidAir,
    pub cooling_coil: CoilLoad,
    /// Total zone reheat.
    pub reheat: Power,
    pub supply_volume_rate: VolumeRate,
    pub return_volume_rate: VolumeRate,
}

impl PartLoadResults {
    #[must_use]
    pub fn supply_temperature(&self) -> ThermodynamicTemperature {
        self.supply_air.dry_bulb()
    }

    #[must_use]
    pub fn return_temperature(&self) -> ThermodynamicTemperature {
        self.return_air.dry_bulb()
    }
}

/// An existing VAV system operating at off-design loads.
///
/// Each zone's summer season holds the part-load loads and its design supply
/// flow. The central unit keeps supplying air at a fixed temperature, and
/// zones that would drop below the minimum flow are reheated.
#[derive(Debug, Clone, PartialEq)]
pub struct VavPartLoad {
    zones: Vec<Zone>,
    supply_temperature: ThermodynamicTemperature,
    outdoor_air: HumidAir,
    ventilation: VolumeRate,
}

impl VavPartLoad {
    #[must_use]
    pub fn new(
        zones: Vec<Zone>,
        supply_temperature: ThermodynamicTemperature,
        outdoor_air: HumidAir,
        ventilation: VolumeRate,
    ) -> Self {
        Self {
            zones,
            supply_temperature,
            outdoor_air,
            ventilation,
        }
    }

    /// Computes zone flows, reheat, and the cooling coil load.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::MissingDesignFlow`] if a zone has no design
    /// supply flow, [`DesignError::NoZones`] for an empty system, or an error
    /// from any of the underlying balances.
    pub fn analyze(&self, params: &PartLoadParams) -> Result<PartLoadResults, DesignError> {
        let oa = self.outdoor_air;
        let m_vent: MassRate = self.ventilation * oa.density();

        let supply_air = HumidAir::with_pressure(
            oa.pressure(),
            Property::DryBulb(self.supply_temperature),
            Property::RelativeHumidity(params.coil_relative_humidity),
        )?;
        let cooled_air = match params.supply_fan {
            Some(spec) => Fan::from_outlet(spec, supply_air, None)?.air_in(),
            None => supply_air,
        };

        let min_fraction = params.min_flow_fraction.get::<ratio>();
        let mut zones = Vec::with_capacity(self.zones.len());
        let mut returns = Vec::with_capacity(self.zones.len());
        let mut reheat = Power::new::<watt>(0.0);
        for zone in &self.zones {
            let season = zone.summer()?;
            let design = season.m_supply.ok_or_else(|| DesignError::MissingDesignFlow {
                zone: zone.name.clone(),
            })?;

            let minimum = design * min_fraction;
            let needed = zone_flow(supply_air, season)?;
            let mut m = needed.unwrap_or(minimum);
            let mut zone_supply = supply_air;
            let mut zone_reheat = Power::new::<watt>(0.0);
            if needed.is_none_or(|needed| needed < minimum) {
                m = minimum;
                let t = AirConditioningProcess::new()
                    .humidity_ratio_in(supply_air.humidity_ratio())
                    .dry_bulb_out(season.zone_air.dry_bulb())
                    .mass_rate(m)
                    .sensible_heat(season.q_sen)
                    .solve()?
                    .dry_bulb_in()?;
                zone_supply = supply_air.with_dry_bulb(t)?;
                zone_reheat = heat_between(supply_air, zone_supply, m)?;
                trace!(zone = %zone.name, reheat = ?zone_reheat, "zone held at minimum flow");
            }
            reheat += zone_reheat;

            let return_air = zone_return(zone_supply, season, m)?;
            debug!(zone = %zone.name, m = ?m, "part-load zone flow");
            returns.push(AirStream::new(return_air, m - season.m_exhaust)?);
            zones.push(ZoneResult {
                name: zone.name.clone(),
                mass_rate: m,
                supply_air: zone_supply,
                return_air,
                reheat: zone_reheat,
            });
        }
        let supply_rate: MassRate = zones.iter().map(|z| z.mass_rate).sum();

        let return_air = mix_all(returns)?.state;
        let mixed_air = mix_all([
            AirStream::new(oa, m_vent)?,
            AirStream::new(return_air, supply_rate - m_vent)?,
        ])?
        .state;

        let coil = AirConditioningProcess::new()
            .air_in(mixed_air)
            .air_out(cooled_air)
            .mass_rate(supply_rate)
            .solve()?;
        let cooling_coil = CoilLoad::of(&coil)?;
        debug!(q = ?cooling_coil.total, reheat = ?reheat, "part-load coil");

        Ok(PartLoadResults {
            zones,
            ventilation_rate: m_vent,
            supply_rate,
            supply_air,
            return_air,
            mixed_air,
            cooling_coil,
            reheat,
            supply_volume_rate: AirStream::new(supply_air, supply_rate)?.volume_rate(),
            return_volume_rate: AirStream::new(return_air, supply_rate)?.volume_rate(),
        })
    }
}
