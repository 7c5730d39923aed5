//! A two-zone VAV system with reheat, in US units.
//!
//! Zone A is a perimeter zone that needs heat in winter; zone B is an
//! interior zone that needs cooling all year. Both are held at 75 °F. The
//! system takes 2,400 ft³/min of outdoor air and has a draw-through supply
//! fan rated at 3 inH₂O and 60 %.
//!
//! The design is worked twice: once step by step from processes and mixing
//! balances, and once through [`VavSystem`].

use airco_components::air_conditioning::{
    AdiabaticMixing, AirConditioningProcess, Fan, FanSpec,
    vav::{PartLoadParams, Season, SummerParams, VavPartLoad, VavSystem, WinterParams, Zone},
};
use airco_core::units::us;
use airco_thermo::{AirStream, HumidAir, Property};
use uom::si::f64::{MassRate, Power, ThermodynamicTemperature};

use crate::{
    Report, TextbookError,
    support::{f_rh, fraction},
};

const VENTILATION_CFM: f64 = 2400.0;
const SUPPLY_DIFFERENCE_F: f64 = 20.0;
const MAX_SUPPLY_F: f64 = 105.0;
const MIN_FLOW_FRACTION: f64 = 0.6;

struct ZoneLoads {
    name: &'static str,
    summer: (f64, f64),
    winter_sensible: f64,
}

const ZONES: [ZoneLoads; 2] = [
    ZoneLoads {
        name: "A",
        summer: (224_844.0, 56_000.0),
        winter_sensible: -143_000.0,
    },
    ZoneLoads {
        name: "B",
        summer: (103_308.0, 20_000.0),
        winter_sensible: 49_092.0,
    },
];

fn fan() -> Result<FanSpec, TextbookError> {
    Ok(FanSpec::new(us::inch_of_water(3.0), fraction(0.6))?)
}

fn summer_zone_air() -> Result<HumidAir, TextbookError> {
    Ok(f_rh(75.0, 0.5)?)
}

fn winter_zone_air() -> Result<HumidAir, TextbookError> {
    Ok(f_rh(75.0, 0.0)?)
}

fn outdoor_summer() -> Result<HumidAir, TextbookError> {
    Ok(HumidAir::new(
        Property::DryBulb(us::fahrenheit(97.0)),
        Property::WetBulb(us::fahrenheit(76.0)),
    )?)
}

fn outdoor_winter() -> Result<HumidAir, TextbookError> {
    Ok(f_rh(7.0, 0.0)?)
}

fn zones() -> Result<Vec<Zone>, TextbookError> {
    ZONES
        .iter()
        .map(|loads| -> Result<Zone, TextbookError> {
            Ok(Zone::new(loads.name)
                .with_summer(Season::new(
                    us::btu_per_hour(loads.summer.0),
                    us::btu_per_hour(loads.summer.1),
                    summer_zone_air()?,
                ))
                .with_winter(Season::new(
                    us::btu_per_hour(loads.winter_sensible),
                    us::btu_per_hour(0.0),
                    winter_zone_air()?,
                )))
        })
        .collect()
}

fn mix(a: HumidAir, m_a: MassRate, b: HumidAir, m_b: MassRate) -> Result<HumidAir, TextbookError> {
    Ok(AdiabaticMixing::of(AirStream::new(a, m_a)?, AirStream::new(b, m_b)?)?
        .out
        .state)
}

/// Works the summer and winter design one balance at a time.
///
/// # Errors
///
/// Returns an error if a property lookup or balance fails.
pub fn vav_multizone_design() -> Result<Report, TextbookError> {
    let mut report = Report::new("Two-zone VAV design, step by step");
    let outdoor = outdoor_summer()?;
    let room = summer_zone_air()?;
    let m_vent: MassRate = us::cfm(VENTILATION_CFM) * outdoor.density();

    // Summer: one supply temperature, a flow per zone.
    let supply = f_rh(us::in_fahrenheit(room.dry_bulb()) - SUPPLY_DIFFERENCE_F, 0.85)?;
    let mut flows = Vec::with_capacity(ZONES.len());
    let mut returns: Option<AirStream> = None;
    for loads in &ZONES {
        let q_sen = us::btu_per_hour(loads.summer.0);
        let m = AirConditioningProcess::new()
            .air_in(supply)
            .dry_bulb_out(room.dry_bulb())
            .sensible_heat(q_sen)
            .solve()?
            .mass_rate()?;
        let zone_return = AirConditioningProcess::new()
            .air_in(supply)
            .dry_bulb_out(room.dry_bulb())
            .mass_rate(m)
            .sensible_heat(q_sen)
            .latent_heat(us::btu_per_hour(loads.summer.1))
            .solve()?
            .air_out()?;
        let stream = AirStream::new(zone_return, m)?;
        returns = Some(match returns {
            Some(acc) => AdiabaticMixing::of(acc, stream)?.out,
            None => stream,
        });
        report
            .part(format!("Summer zone {}", loads.name))
            .mass_rate("supply flow", m)
            .humidity_ratio("return humidity ratio", zone_return.humidity_ratio());
        flows.push(m);
    }
    let m_supply: MassRate = flows.iter().copied().sum();
    let return_air = returns.map(|stream| stream.state).unwrap_or(room);

    let fan = Fan::from_outlet(fan()?, supply, Some(m_supply))?;
    let cooled = fan.air_in();
    let mixed = mix(outdoor, m_vent, return_air, m_supply - m_vent)?;
    let coil = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(cooled)
        .mass_rate(m_supply)
        .solve()?;
    report
        .part("Summer system")
        .temperature("supply dry bulb", supply.dry_bulb())
        .temperature("cooled dry bulb", cooled.dry_bulb())
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .power("coil load", coil.heat()?)
        .power("coil sensible load", coil.sensible_heat()?)
        .power("coil latent load", coil.latent_heat()?)
        .volume_rate("supply volume flow", AirStream::new(supply, m_supply)?.volume_rate())
        .volume_rate("return volume flow", AirStream::new(return_air, m_supply)?.volume_rate());

    winter_by_steps(&mut report, &flows, supply.dry_bulb(), cooled.dry_bulb())?;
    Ok(report)
}

/// Winter half of the step-by-step design.
fn winter_by_steps(
    report: &mut Report,
    summer_flows: &[MassRate],
    summer_supply: ThermodynamicTemperature,
    summer_cooled: ThermodynamicTemperature,
) -> Result<(), TextbookError> {
    let outdoor = outdoor_winter()?;
    let room = winter_zone_air()?;
    let m_vent: MassRate = us::cfm(VENTILATION_CFM) * outdoor.density();

    let peak_preheat = AirConditioningProcess::new()
        .air_in(outdoor)
        .dry_bulb_out(summer_cooled)
        .mass_rate(m_vent)
        .solve()?
        .sensible_heat()?;

    let mut zone_supply = Vec::with_capacity(ZONES.len());
    for (loads, m_summer) in ZONES.iter().zip(summer_flows) {
        let q_sen = us::btu_per_hour(loads.winter_sensible);
        let t_in = if loads.winter_sensible < 0.0 {
            us::fahrenheit(MAX_SUPPLY_F)
        } else {
            summer_supply
        };
        let needed = AirConditioningProcess::new()
            .dry_bulb_in(t_in)
            .air_out(room)
            .sensible_heat(q_sen)
            .latent_heat(us::btu_per_hour(0.0))
            .solve()?
            .mass_rate()?;
        let minimum = *m_summer * MIN_FLOW_FRACTION;
        let m = if needed < minimum { minimum } else { needed };
        let t = AirConditioningProcess::new()
            .air_out(room)
            .mass_rate(m)
            .sensible_heat(q_sen)
            .latent_heat(us::btu_per_hour(0.0))
            .solve()?
            .dry_bulb_in()?;
        zone_supply.push((m, t));
    }

    let m_supply: MassRate = zone_supply.iter().map(|(m, _)| *m).sum();
    let t_supply = zone_supply
        .iter()
        .map(|(_, t)| *t)
        .reduce(|a, b| if b < a { b } else { a })
        .unwrap_or(summer_supply);
    // Every zone returns at the room state, so the return air is the room air.
    let mixed = mix(outdoor, m_vent, room, m_supply - m_vent)?;
    let supply = mixed.with_dry_bulb(t_supply)?;
    let conditioned = Fan::from_outlet(fan()?, supply, Some(m_supply))?.air_in();
    let central = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(conditioned)
        .mass_rate(m_supply)
        .solve()?
        .heat()?;
    let zero = us::btu_per_hour(0.0);
    let (preheat, cooling) = if mixed.dry_bulb() < conditioned.dry_bulb() {
        (central, zero)
    } else {
        (zero, central)
    };

    let mut reheat: Power = zero;
    for (loads, (m, t)) in ZONES.iter().zip(&zone_supply) {
        let q = AirConditioningProcess::new()
            .air_in(supply)
            .dry_bulb_out(*t)
            .mass_rate(*m)
            .solve()?
            .sensible_heat()?;
        reheat += q;
        report
            .part(format!("Winter zone {}", loads.name))
            .mass_rate("supply flow", *m)
            .temperature("supply dry bulb", *t)
            .power("reheat", q);
    }

    report
        .part("Winter system")
        .temperature("supply dry bulb", supply.dry_bulb())
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .power("preheat", preheat)
        .power("peak preheat", peak_preheat)
        .power("coil load", cooling)
        .power("reheat", reheat)
        .power("total heat", reheat + peak_preheat)
        .volume_rate("supply volume flow", AirStream::new(supply, m_supply)?.volume_rate());
    Ok(())
}

/// Sizes the same system with [`VavSystem`].
///
/// # Errors
///
/// Returns an error if the design fails.
pub fn vav_multizone_system() -> Result<Report, TextbookError> {
    let mut system = VavSystem::new(
        zones()?,
        outdoor_summer()?,
        outdoor_winter()?,
        us::cfm(VENTILATION_CFM),
    );
    let summer = system.design_summer(&SummerParams {
        supply_fan: Some(fan()?),
        ..SummerParams::new(us::delta_f(SUPPLY_DIFFERENCE_F))
    })?;
    let winter = system.design_winter(&WinterParams {
        supply_fan: Some(fan()?),
        min_flow_fraction: fraction(MIN_FLOW_FRACTION),
        ..WinterParams::new(us::fahrenheit(MAX_SUPPLY_F))
    })?;

    let mut report = Report::new("Two-zone VAV design");
    for zone in &summer.zones {
        report
            .part(format!("Summer zone {}", zone.name))
            .mass_rate("supply flow", zone.mass_rate);
    }
    report
        .part("Summer system")
        .temperature("supply dry bulb", summer.supply_temperature())
        .temperature("return dry bulb", summer.return_temperature())
        .power("coil load", summer.cooling_coil.total)
        .power("coil sensible load", summer.cooling_coil.sensible)
        .power("coil latent load", summer.cooling_coil.latent)
        .volume_rate("supply volume flow", summer.supply_volume_rate)
        .volume_rate("return volume flow", summer.return_volume_rate);
    for zone in &winter.zones {
        report
            .part(format!("Winter zone {}", zone.name))
            .mass_rate("supply flow", zone.mass_rate)
            .temperature("supply dry bulb", zone.supply_air.dry_bulb())
            .power("reheat", zone.reheat);
    }
    report
        .part("Winter system")
        .temperature("supply dry bulb", winter.supply_temperature())
        .temperature("return dry bulb", winter.return_temperature())
        .power("preheat", winter.preheat)
        .power("peak preheat", winter.peak_preheat)
        .power("coil load", winter.cooling_coil)
        .power("reheat", winter.reheat)
        .power("total heat", winter.total_heat)
        .volume_rate("supply volume flow", winter.supply_volume_rate);
    Ok(report)
}

/// Analyzes the built system on a 77 °F day with reduced zone loads and
/// 55 °F supply air.
///
/// # Errors
///
/// Returns an error if the analysis fails.
pub fn vav_multizone_analysis() -> Result<Report, TextbookError> {
    let room = summer_zone_air()?;
    let part_load = [("A", 143_100.0, 36_000.0, 780.7), ("B", 91_260.0, 20_000.0, 358.7)];
    let zones = part_load
        .iter()
        .map(|&(name, q_sen, q_lat, design)| {
            Zone::new(name).with_summer(
                Season::new(us::btu_per_hour(q_sen), us::btu_per_hour(q_lat), room)
                    .with_design_flow(us::lb_per_minute(design)),
            )
        })
        .collect();
    let outdoor = HumidAir::new(
        Property::DryBulb(us::fahrenheit(77.0)),
        Property::HumidityRatio(fraction(0.0126)),
    )?;

    let analysis = VavPartLoad::new(zones, us::fahrenheit(55.0), outdoor, us::cfm(VENTILATION_CFM));
    let results = analysis.analyze(&PartLoadParams {
        supply_fan: Some(fan()?),
        ..PartLoadParams::default()
    })?;

    let mut report = Report::new("Two-zone VAV part-load analysis");
    for zone in &results.zones {
        report
            .part(format!("Zone {}", zone.name))
            .mass_rate("supply flow", zone.mass_rate)
            .fraction("room relative humidity", zone.return_air.relative_humidity())
            .power("reheat", zone.reheat);
    }
    report
        .part("System")
        .temperature("supply dry bulb", results.supply_temperature())
        .temperature("return dry bulb", results.return_temperature())
        .power("coil load", results.cooling_coil.total)
        .power("coil sensible load", results.cooling_coil.sensible)
        .power("coil latent load", results.cooling_coil.latent)
        .power("reheat", results.reheat)
        .volume_rate("supply volume flow", results.supply_volume_rate)
        .volume_rate("return volume flow", results.return_volume_rate);
    Ok(report)
}
