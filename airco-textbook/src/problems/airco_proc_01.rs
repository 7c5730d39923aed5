//! Single processes: heating, cooling, evaporative cooling, humidification,
//! and mixing.
//!
//! Each part is one piece of equipment solved from the data given in the
//! problem statement, at SI conditions.

use airco_components::air_conditioning::{AdiabaticMixing, AirConditioningProcess};
use airco_thermo::{AirStream, HumidAir, Water};
use uom::si::{
    f64::{MassRate, Power, Pressure, VolumeRate},
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::megapascal,
    volume_rate::cubic_meter_per_second,
};

use crate::{
    Report, TextbookError,
    support::{P_TEXTBOOK, celsius, db_rh, db_w, db_wb, fraction, pascals, standard},
};

/// Solves the eight single-process problems.
///
/// # Errors
///
/// Returns an error if a property lookup or balance fails.
pub fn airco_proc_01() -> Result<Report, TextbookError> {
    let mut report = Report::new("Air-conditioning processes");
    sensible_heating(&mut report)?;
    cooling(&mut report)?;
    evaporative_cooling(&mut report)?;
    air_washer(&mut report)?;
    water_injection(&mut report)?;
    steam_injection(&mut report)?;
    mixing(&mut report)?;
    Ok(report)
}

fn volume(v: f64) -> VolumeRate {
    VolumeRate::new::<cubic_meter_per_second>(v)
}

fn kg_per_s(m: f64) -> MassRate {
    MassRate::new::<kilogram_per_second>(m)
}

fn adiabatic() -> Power {
    Power::new::<watt>(0.0)
}

/// 1.5 m³/s of air at 21 °C db, 15 °C wb heated to 41 °C.
fn sensible_heating(report: &mut Report) -> Result<(), TextbookError> {
    let air_in = db_wb(standard(), celsius(21.0), celsius(15.0))?;
    let air_out = air_in.with_dry_bulb(celsius(41.0))?;
    let m: MassRate = volume(1.5) * air_in.density();

    let heater = AirConditioningProcess::new()
        .air_in(air_in)
        .air_out(air_out)
        .mass_rate(m)
        .solve()?;
    report
        .part("1. Sensible heating")
        .mass_rate("dry-air flow", m)
        .power("heat added", heater.heat()?);
    Ok(())
}

/// 1.5 m³/s cooled from 28 °C db, 20.6 °C wb to 12.5 °C with W = 8.336 g/kg.
fn cooling(report: &mut Report) -> Result<(), TextbookError> {
    let air_in = db_wb(standard(), celsius(28.0), celsius(20.6))?;
    let air_out = db_w(standard(), celsius(12.5), fraction(8.336e-3))?;
    let m: MassRate = volume(1.5) * air_in.density();

    let coil = AirConditioningProcess::new()
        .air_in(air_in)
        .air_out(air_out)
        .mass_rate(m)
        .solve()?;
    let adp = coil.apparatus_dew_point()?;
    report
        .part("2. Cooling and dehumidification")
        .mass_rate("dry-air flow", m)
        .power("coil load", coil.heat()?)
        .fraction("sensible heat ratio", coil.sensible_heat_ratio()?)
        .temperature("apparatus dew point", adp.dry_bulb())
        .humidity_ratio("apparatus dew point humidity ratio", adp.humidity_ratio())
        .fraction("contact factor", coil.contact_factor()?);
    Ok(())
}

/// Desert air at 95 kPa cooled along its wet bulb from 38 °C to 25 °C.
fn evaporative_cooling(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(95_000.0);
    let air_in = db_wb(p, celsius(38.0), celsius(20.0))?;
    let air_out = db_wb(p, celsius(25.0), air_in.wet_bulb())?;
    let adp = HumidAir::saturated(p, air_in.wet_bulb())?;
    let water = Water::from_temperature_pressure(celsius(20.0), p)?;

    let cooler = AirConditioningProcess::builder(p)
        .air_in(air_in)
        .air_out(air_out)
        .apparatus_dew_point(adp)
        .mass_rate(kg_per_s(0.75))
        .heat(adiabatic())
        .water_enthalpy(water.enthalpy())
        .solve()?;
    report
        .part("3. Evaporative cooling")
        .fraction("inlet relative humidity", air_in.relative_humidity())
        .fraction("outlet relative humidity", air_out.relative_humidity())
        .mass_rate("water evaporated", cooler.water_rate()?)
        .fraction("contact factor", cooler.contact_factor()?);
    Ok(())
}

/// 1.5 m³/s at 15 °C db, 10 °C wb through a recirculating washer with a
/// contact factor of 0.9.
fn air_washer(report: &mut Report) -> Result<(), TextbookError> {
    let air_in = db_wb(standard(), celsius(15.0), celsius(10.0))?;
    let m: MassRate = volume(1.5) * air_in.density();
    let adp = HumidAir::saturated(standard(), air_in.wet_bulb())?;

    let washer = AirConditioningProcess::new()
        .air_in(air_in)
        .apparatus_dew_point(adp)
        .contact_factor(fraction(0.9))
        .mass_rate(m)
        .heat(adiabatic())
        .solve()?;
    let air_out = washer.air_out()?;
    report
        .part("4. Air washer")
        .temperature("outlet dry bulb", air_out.dry_bulb())
        .humidity_ratio("outlet humidity ratio", air_out.humidity_ratio())
        .mass_rate("water evaporated", washer.water_rate()?)
        .mass_rate("dry-air flow", m);
    Ok(())
}

/// 2 g/s of saturated water at 100 °C sprayed into 1 kg/s of air.
fn water_injection(report: &mut Report) -> Result<(), TextbookError> {
    let air_in = db_wb(standard(), celsius(21.0), celsius(15.0))?;
    let water = Water::saturated_at_temperature(celsius(100.0), fraction(0.0))?;

    let air_out = inject(air_in, kg_per_s(0.002), &water)?;
    report
        .part("5. Water injection")
        .specific_enthalpy("water enthalpy", water.enthalpy())
        .temperature("outlet dry bulb", air_out.dry_bulb())
        .humidity_ratio("outlet humidity ratio", air_out.humidity_ratio());
    Ok(())
}

/// 10 g/s of saturated steam into 1 kg/s of air, at 100 °C and at 30 bar.
fn steam_injection(report: &mut Report) -> Result<(), TextbookError> {
    let air_in = db_wb(standard(), celsius(28.0), celsius(11.9))?;
    let m_steam = kg_per_s(0.01);

    let low = Water::saturated_at_temperature(celsius(100.0), fraction(1.0))?;
    let air_out = inject(air_in, m_steam, &low)?;
    report
        .part("6. Steam injection at 100 °C")
        .specific_enthalpy("steam enthalpy", low.enthalpy())
        .temperature("outlet dry bulb", air_out.dry_bulb())
        .humidity_ratio("outlet humidity ratio", air_out.humidity_ratio());

    let high = Water::saturated_at_pressure(Pressure::new::<megapascal>(3.0), fraction(1.0))?;
    let air_out = inject(air_in, m_steam, &high)?;
    report
        .part("7. Steam injection at 30 bar")
        .temperature("steam temperature", high.temperature())
        .specific_enthalpy("steam enthalpy", high.enthalpy())
        .temperature("outlet dry bulb", air_out.dry_bulb())
        .humidity_ratio("outlet humidity ratio", air_out.humidity_ratio());
    Ok(())
}

/// Adiabatic humidification of 1 kg/s by `m_water` at the state of `water`.
fn inject(air_in: HumidAir, m_water: MassRate, water: &Water) -> Result<HumidAir, TextbookError> {
    Ok(AirConditioningProcess::new()
        .air_in(air_in)
        .mass_rate(kg_per_s(1.0))
        .water_rate(m_water)
        .water_enthalpy(water.enthalpy())
        .heat(adiabatic())
        .solve()?
        .air_out()?)
}

/// 30 % outdoor air at 34 °C, 60 % mixed with return air at 26 °C, 50 %.
fn mixing(report: &mut Report) -> Result<(), TextbookError> {
    let p = pascals(P_TEXTBOOK);
    let outdoor = db_rh(p, celsius(34.0), 0.6)?;
    let room = db_rh(p, celsius(26.0), 0.5)?;

    let mixed = AdiabaticMixing::of(
        AirStream::new(outdoor, kg_per_s(0.3))?,
        AirStream::new(room, kg_per_s(0.7))?,
    )?
    .out;
    report
        .part("8. Adiabatic mixing")
        .temperature("mixed dry bulb", mixed.state.dry_bulb())
        .humidity_ratio("mixed humidity ratio", mixed.state.humidity_ratio());
    Ok(())
}
