//! Combined processes that condition a space: mixing, coils, reheat, bypass,
//! and winter humidification.

use airco_components::air_conditioning::{AdiabaticMixing, AirConditioningProcess, PartialStream};
use airco_core::units::SpecificEnthalpy;
use airco_thermo::{AirStream, HumidAir, Water};
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Power},
    mass_rate::kilogram_per_second,
    power::watt,
};

use crate::{
    Report, TextbookError,
    support::{P_TEXTBOOK, celsius, db_rh, db_w, db_wb, fraction, pascals},
};

/// Solves the six space-conditioning problems, all at 101.3 kPa.
///
/// # Errors
///
/// Returns an error if a property lookup or balance fails.
pub fn airco_proc_02() -> Result<Report, TextbookError> {
    let mut report = Report::new("Space conditioning with combined processes");
    mixing_and_heating(&mut report)?;
    mixing_and_cooling(&mut report)?;
    space_cooling(&mut report)?;
    cooling_with_reheat(&mut report)?;
    return_air_bypass(&mut report)?;
    heating_with_humidification(&mut report)?;
    Ok(report)
}

fn kg_per_s(m: f64) -> MassRate {
    MassRate::new::<kilogram_per_second>(m)
}

fn watts(q: f64) -> Power {
    Power::new::<watt>(q)
}

fn mix(a: HumidAir, m_a: MassRate, b: HumidAir, m_b: MassRate) -> Result<AirStream, TextbookError> {
    Ok(AdiabaticMixing::of(AirStream::new(a, m_a)?, AirStream::new(b, m_b)?)?.out)
}

/// 25 % outdoor air at 2 °C, 20 % mixed with room air at 23 °C, 40 %, then
/// heated to 35 °C.
fn mixing_and_heating(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let outdoor = db_rh(p, celsius(2.0), 0.2)?;
    let room = db_rh(p, celsius(23.0), 0.4)?;
    let m = kg_per_s(0.5);

    let mixed = mix(outdoor, m * 0.25, room, m * 0.75)?.state;
    let supply = mixed.with_dry_bulb(celsius(35.0))?;
    let heater = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(supply)
        .mass_rate(m)
        .solve()?;
    report
        .part("1. Mixing and heating")
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .temperature("mixed wet bulb", mixed.wet_bulb())
        .fraction("supply relative humidity", supply.relative_humidity())
        .power("heater load", heater.heat()?);
    Ok(())
}

/// Outdoor and return air mixed 1:3 and cooled by a coil with an 8 °C
/// apparatus dew point and a contact factor of 0.75.
fn mixing_and_cooling(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let room = db_wb(p, celsius(30.0), celsius(22.0))?;
    let outdoor = db_wb(p, celsius(34.0), celsius(28.0))?;

    let mixed = mix(outdoor, kg_per_s(0.2), room, kg_per_s(0.6))?.state;
    let coil = AirConditioningProcess::new()
        .air_in(mixed)
        .apparatus_dew_point(HumidAir::saturated(p, celsius(8.0))?)
        .contact_factor(fraction(0.75))
        .mass_rate(kg_per_s(0.8))
        .solve()?;
    let off_coil = coil.air_out()?;
    report
        .part("2. Mixing and cooling")
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .humidity_ratio("mixed humidity ratio", mixed.humidity_ratio())
        .temperature("off-coil dry bulb", off_coil.dry_bulb())
        .fraction("off-coil relative humidity", off_coil.relative_humidity())
        .power("coil load", coil.heat()?);
    Ok(())
}

/// A room at 24 °C, 50 % with 23 kW sensible gain and 2.4 g/s of moisture,
/// supplied at 15 °C.
fn space_cooling(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let room = db_rh(p, celsius(24.0), 0.5)?;
    let q_sen = watts(23_000.0);
    let q_lat = watts(0.0024 * 2_555e3);
    let shr = fraction(q_sen.get::<watt>() / (q_sen + q_lat).get::<watt>());

    let space = AirConditioningProcess::new()
        .dry_bulb_in(celsius(15.0))
        .air_out(room)
        .sensible_heat_ratio(shr)
        .sensible_heat(q_sen)
        .solve()?;
    let supply = space.air_in()?;
    let m = space.mass_rate()?;
    let coil = AirConditioningProcess::new()
        .air_in(room)
        .air_out(supply)
        .mass_rate(m)
        .solve()?;
    report
        .part("3. Space cooling")
        .fraction("sensible heat ratio", shr)
        .humidity_ratio("supply humidity ratio", supply.humidity_ratio())
        .fraction("supply relative humidity", supply.relative_humidity())
        .mass_rate("supply flow", m)
        .power("coil load", coil.heat()?)
        .temperature("apparatus dew point", coil.apparatus_dew_point()?.dry_bulb())
        .fraction("bypass factor", coil.bypass_factor()?);
    Ok(())
}

/// A room at 24 °C db, 18 °C wb with 11 kW sensible and 10 kW latent gain,
/// served by a coil leaving 12 °C, 90 % and a reheater.
fn cooling_with_reheat(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let room = db_wb(p, celsius(24.0), celsius(18.0))?;
    let off_coil = db_rh(p, celsius(12.0), 0.9)?;
    let (q_sen, q_lat) = (watts(11_000.0), watts(10_000.0));
    let shr = fraction(q_sen.get::<watt>() / (q_sen + q_lat).get::<watt>());

    let space = AirConditioningProcess::new()
        .air_out(room)
        .humidity_ratio_in(off_coil.humidity_ratio())
        .sensible_heat_ratio(shr)
        .sensible_heat(q_sen)
        .solve()?;
    let supply = space.air_in()?;
    let m = space.mass_rate()?;

    let coil = AirConditioningProcess::new()
        .air_in(room)
        .air_out(off_coil)
        .mass_rate(m)
        .solve()?;
    let reheater = AirConditioningProcess::new()
        .air_in(off_coil)
        .air_out(supply)
        .mass_rate(m)
        .solve()?;
    report
        .part("4. Cooling with reheat")
        .temperature("supply dry bulb", supply.dry_bulb())
        .mass_rate("supply flow", m)
        .power("coil load", coil.heat()?)
        .temperature("apparatus dew point", coil.apparatus_dew_point()?.dry_bulb())
        .fraction("bypass factor", coil.bypass_factor()?)
        .power("reheat", reheater.heat()?)
        .power("net cooling", coil.heat()? + reheater.heat()?);
    Ok(())
}

/// Return air bypasses a coil leaving saturated air at 6 °C; the rest mixes
/// with 0.26 kg/s of ventilation air at 34 °C, 50 % before the coil.
fn return_air_bypass(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let (q_sen, q_lat) = (watts(14_000.0), watts(9_000.0));
    let shr = fraction(q_sen.get::<watt>() / (q_sen + q_lat).get::<watt>());
    let m_supply = kg_per_s(1.2);
    let ventilation = db_rh(p, celsius(34.0), 0.5)?;
    let m_vent = kg_per_s(0.26);
    let off_coil = HumidAir::saturated(p, celsius(6.0))?;

    // The room state lies on the condition line through the off-coil state.
    let room = AirConditioningProcess::new()
        .air_in(off_coil)
        .dry_bulb_out(celsius(26.0))
        .sensible_heat_ratio(shr)
        .solve()?
        .air_out()?;
    let supply = AirConditioningProcess::new()
        .air_out(room)
        .mass_rate(m_supply)
        .sensible_heat(q_sen)
        .latent_heat(q_lat)
        .solve()?
        .air_in()?;

    let split = AdiabaticMixing::solve(
        PartialStream::state(room),
        PartialStream::state(off_coil),
        PartialStream::known(AirStream::new(supply, m_supply)?),
    )?;
    let m_bypass = split.in1.mass_rate();
    let m_coil = split.in2.mass_rate();

    let coil_in = mix(room, m_coil - m_vent, ventilation, m_vent)?.state;
    let coil = AirConditioningProcess::new()
        .air_in(coil_in)
        .air_out(off_coil)
        .mass_rate(m_coil)
        .solve()?;
    let dh: SpecificEnthalpy = ventilation.enthalpy() - room.enthalpy();
    let q_vent = watts(m_vent.get::<kilogram_per_second>() * dh.get::<joule_per_kilogram>());
    report
        .part("5. Return-air bypass")
        .humidity_ratio("room humidity ratio", room.humidity_ratio())
        .temperature("supply dry bulb", supply.dry_bulb())
        .mass_rate("bypass flow", m_bypass)
        .mass_rate("coil flow", m_coil)
        .temperature("coil inlet dry bulb", coil_in.dry_bulb())
        .power("coil load", coil.heat()?)
        .power("ventilation load", q_vent);
    Ok(())
}

/// A room at 21 °C db, 13 °C wb losing 50 kW sensible and 10 kW latent,
/// supplied at 38 °C. Mixed air is preheated to 21 °C, humidified by a
/// recirculating washer, and reheated.
fn heating_with_humidification(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let room = db_wb(p, celsius(21.0), celsius(13.0))?;
    let outdoor = db_rh(p, celsius(2.0), 0.95)?;

    let space = AirConditioningProcess::new()
        .dry_bulb_in(celsius(38.0))
        .air_out(room)
        .sensible_heat(watts(-50_000.0))
        .latent_heat(watts(-10_000.0))
        .solve()?;
    let m = space.mass_rate()?;
    let supply = space.air_in()?;

    let mixed = mix(room, m * 0.6, outdoor, m * 0.4)?.state;
    let preheater = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(db_w(p, celsius(21.0), mixed.humidity_ratio())?)
        .mass_rate(m)
        .solve()?;
    let preheated = preheater.air_out()?;

    let water = Water::from_temperature_pressure(preheated.wet_bulb(), p)?;
    let washer = AirConditioningProcess::new()
        .air_in(preheated)
        .humidity_ratio_out(supply.humidity_ratio())
        .mass_rate(m)
        .heat(watts(0.0))
        .water_enthalpy(water.enthalpy())
        .solve()?;
    let washed = washer.air_out()?;
    let reheater = AirConditioningProcess::new()
        .air_in(washed)
        .air_out(supply)
        .mass_rate(m)
        .solve()?;
    report
        .part("6. Heating with humidification")
        .mass_rate("supply flow", m)
        .humidity_ratio("supply humidity ratio", supply.humidity_ratio())
        .temperature("mixed dry bulb", mixed.dry_bulb())
        .power("preheat", preheater.heat()?)
        .mass_rate("water evaporated", washer.water_rate()?)
        .fraction("washer contact factor", washer.contact_factor()?)
        .temperature("washer outlet dry bulb", washed.dry_bulb())
        .power("reheat", reheater.heat()?);
    Ok(())
}
