//! Design of a single-zone constant air volume system with a draw-through
//! supply fan, in US units.

use airco_components::air_conditioning::{AdiabaticMixing, AirConditioningProcess, Fan, FanSpec};
use airco_core::units::{SpecificEnthalpy, us};
use airco_thermo::{AirStream, HumidAir, Water};
use uom::si::{
    f64::{MassRate, Power},
    ratio::ratio,
};

use crate::{
    Report, TextbookError, Value,
    support::{f_rh, fraction},
};

/// Outdoor ventilation air, ft³/min.
const VENTILATION_CFM: f64 = 1000.0;

/// Sizes the system for the summer peak, a high-latent summer day, and the
/// winter peak.
///
/// # Errors
///
/// Returns an error if a property lookup or balance fails.
pub fn cav_design() -> Result<Report, TextbookError> {
    let mut report = Report::new("Constant air volume system design");
    let summer = summer_peak(&mut report)?;
    high_latent(&mut report, &summer)?;
    winter_peak(&mut report)?;
    Ok(report)
}

/// Supply fan: 3 inH₂O at 70 % with an 84 % motor in the air stream.
pub(crate) fn supply_fan() -> Result<FanSpec, TextbookError> {
    Ok(FanSpec::new(us::inch_of_water(3.0), fraction(0.7))?.with_motor_efficiency(fraction(0.84))?)
}

pub(crate) fn mix(
    outdoor: HumidAir,
    m_vent: MassRate,
    room: HumidAir,
    m_supply: MassRate,
) -> Result<HumidAir, TextbookError> {
    Ok(AdiabaticMixing::of(
        AirStream::new(outdoor, m_vent)?,
        AirStream::new(room, m_supply - m_vent)?,
    )?
    .out
    .state)
}

/// Ventilation load of outdoor air brought to the room state.
fn ventilation_load(outdoor: HumidAir, room: HumidAir, m_vent: MassRate) -> Power {
    let dh: SpecificEnthalpy = outdoor.enthalpy() - room.enthalpy();
    m_vent * dh
}

struct SummerDesign {
    room: HumidAir,
    outdoor: HumidAir,
    cooled: HumidAir,
    m_vent: MassRate,
}

/// A zone at 78 °F, 50 % with a 120,000 Btu/h load at SHR 0.7, supplied at
/// 58 °F. Outdoor air is at 95 °F, 55 %.
fn summer_peak(report: &mut Report) -> Result<SummerDesign, TextbookError> {
    let room = f_rh(78.0, 0.5)?;
    let outdoor = f_rh(95.0, 0.55)?;

    let zone = AirConditioningProcess::new()
        .dry_bulb_in(us::fahrenheit(58.0))
        .air_out(room)
        .heat(us::btu_per_hour(120_000.0))
        .sensible_heat_ratio(fraction(0.7))
        .solve()?;
    let supply = zone.air_in()?;
    let m = zone.mass_rate()?;
    let m_vent: MassRate = us::cfm(VENTILATION_CFM) * outdoor.density();

    let mixed = mix(outdoor, m_vent, room, m)?;
    let fan = Fan::from_outlet(supply_fan()?, supply, Some(m))?;
    let cooled = fan.air_in();
    let coil = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(cooled)
        .mass_rate(m)
        .solve()?;
    report
        .part("A. Summer peak")
        .humidity_ratio("supply humidity ratio", supply.humidity_ratio())
        .mass_rate("supply flow", m)
        .mass_rate("ventilation flow", m_vent)
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .add(
            "fan temperature rise",
            Value::TemperatureDifference(fan.temperature_rise()),
        )
        .temperature("cooled dry bulb", cooled.dry_bulb())
        .power("coil load", coil.heat()?)
        .fraction("coil sensible heat ratio", coil.sensible_heat_ratio()?);
    Ok(SummerDesign {
        room,
        outdoor,
        cooled,
        m_vent,
    })
}

/// The same load at SHR 0.5, met by reheating air from the same coil.
fn high_latent(report: &mut Report, design: &SummerDesign) -> Result<(), TextbookError> {
    let zone = AirConditioningProcess::new()
        .humidity_ratio_in(design.cooled.humidity_ratio())
        .air_out(design.room)
        .heat(us::btu_per_hour(120_000.0))
        .sensible_heat_ratio(fraction(0.5))
        .solve()?;
    let supply = zone.air_in()?;
    let m = zone.mass_rate()?;

    let fan = Fan::from_outlet(supply_fan()?, supply, Some(m))?;
    let reheated = fan.air_in();
    let reheater = AirConditioningProcess::new()
        .air_in(design.cooled)
        .air_out(reheated)
        .mass_rate(m)
        .solve()?;
    let mixed = mix(design.outdoor, design.m_vent, design.room, m)?;
    let coil = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(design.cooled)
        .mass_rate(m)
        .solve()?;
    report
        .part("B. High latent load")
        .temperature("supply dry bulb", supply.dry_bulb())
        .mass_rate("supply flow", m)
        .temperature("reheated dry bulb", reheated.dry_bulb())
        .power("reheat", reheater.heat()?)
        .power("fan heat", fan.heat_gain().unwrap_or(us::btu_per_hour(0.0)))
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .power("coil load", coil.heat()?)
        .power(
            "ventilation load",
            ventilation_load(design.outdoor, design.room, design.m_vent),
        );
    Ok(())
}

/// A zone at 72 °F, 50 % losing 150,000 Btu/h at SHR 0.8 with the summer
/// supply flow, rounded to 17,140 lb/h. Outdoor air is at 40 °F, 40 %;
/// saturated steam at 200 °F humidifies the preheated air.
fn winter_peak(report: &mut Report) -> Result<(), TextbookError> {
    let m = us::lb_per_hour(17_140.0);
    let room = f_rh(72.0, 0.5)?;
    let outdoor = f_rh(40.0, 0.4)?;
    let q_zone = us::btu_per_hour(-150_000.0);
    let m_vent: MassRate = us::cfm(VENTILATION_CFM) * outdoor.density();

    let mixed = mix(outdoor, m_vent, room, m)?;
    let supply = AirConditioningProcess::new()
        .air_out(room)
        .mass_rate(m)
        .heat(q_zone)
        .sensible_heat_ratio(fraction(0.8))
        .solve()?
        .air_in()?;

    let steam = Water::saturated_at_temperature(us::fahrenheit(200.0), fraction(1.0))?;
    let m_steam = m * (supply.humidity_ratio() - mixed.humidity_ratio()).get::<ratio>();
    let humidifier = AirConditioningProcess::new()
        .humidity_ratio_in(mixed.humidity_ratio())
        .air_out(supply)
        .mass_rate(m)
        .water_rate(m_steam)
        .water_enthalpy(steam.enthalpy())
        .heat(us::btu_per_hour(0.0))
        .solve()?;
    let preheated = humidifier.air_in()?;
    let preheater = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(preheated)
        .mass_rate(m)
        .solve()?;

    let steam_heat: Power = m_steam * steam.enthalpy();
    let loss = -(q_zone + ventilation_load(outdoor, room, m_vent));
    report
        .part("C. Winter peak")
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .temperature("supply dry bulb", supply.dry_bulb())
        .humidity_ratio("supply humidity ratio", supply.humidity_ratio())
        .mass_rate("steam flow", m_steam)
        .temperature("preheated dry bulb", preheated.dry_bulb())
        .power("preheat", preheater.heat()?)
        .power("heat loss", loss)
        .power("heat input", preheater.heat()? + steam_heat);
    Ok(())
}
