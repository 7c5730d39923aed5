//! The single-zone system of the design problem at part load, run first as a
//! constant volume system with reheat and then as a variable volume system.

use airco_components::air_conditioning::{AirConditioningProcess, ProcessBuilder};
use airco_core::units::us;
use airco_thermo::HumidAir;
use uom::si::f64::MassRate;

use super::cav_design::mix;
use crate::{
    Report, TextbookError,
    support::{f_rh, fraction},
};

/// Compares CAV and VAV operation at a 70,000 Btu/h load with SHR 0.7 on an
/// 80 °F, 60 % day.
///
/// # Errors
///
/// Returns an error if a property lookup or balance fails.
pub fn cav_vav_part_load() -> Result<Report, TextbookError> {
    let mut report = Report::new("CAV and VAV part-load operation");
    let outdoor = f_rh(80.0, 0.6)?;
    let cooled = f_rh(58.0, 0.8)?;
    let m_vent: MassRate = us::cfm(1000.0) * outdoor.density();

    constant_volume(&mut report, outdoor, cooled, m_vent)?;
    variable_volume(&mut report, outdoor, cooled, m_vent)?;
    Ok(report)
}

/// Zone balance at 78 °F with the part load.
fn zone() -> ProcessBuilder {
    AirConditioningProcess::new()
        .dry_bulb_out(us::fahrenheit(78.0))
        .heat(us::btu_per_hour(70_000.0))
        .sensible_heat_ratio(fraction(0.7))
}

/// Design flow held constant; the coil keeps its leaving state and the air
/// is reheated to match the reduced sensible load.
fn constant_volume(
    report: &mut Report,
    outdoor: HumidAir,
    cooled: HumidAir,
    m_vent: MassRate,
) -> Result<(), TextbookError> {
    let m = us::lb_per_hour(17_140.0);
    let space = zone()
        .humidity_ratio_in(cooled.humidity_ratio())
        .mass_rate(m)
        .solve()?;
    let supply = space.air_in()?;
    let room = space.air_out()?;

    let mixed = mix(outdoor, m_vent, room, m)?;
    let coil = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(cooled)
        .mass_rate(m)
        .solve()?;
    let reheater = AirConditioningProcess::new()
        .air_in(cooled)
        .air_out(supply)
        .mass_rate(m)
        .solve()?;
    report
        .part("CAV")
        .temperature("supply dry bulb", supply.dry_bulb())
        .fraction("room relative humidity", room.relative_humidity())
        .power("coil load", coil.heat()?)
        .power("reheat", reheater.heat()?);
    Ok(())
}

/// Supply at the coil state with the flow reduced to match the sensible load.
fn variable_volume(
    report: &mut Report,
    outdoor: HumidAir,
    cooled: HumidAir,
    m_vent: MassRate,
) -> Result<(), TextbookError> {
    let space = zone().air_in(cooled).solve()?;
    let m = space.mass_rate()?;
    let room = space.air_out()?;

    let mixed = mix(outdoor, m_vent, room, m)?;
    let coil = AirConditioningProcess::new()
        .air_in(mixed)
        .air_out(cooled)
        .mass_rate(m)
        .solve()?;
    report
        .part("VAV")
        .mass_rate("supply flow", m)
        .fraction("room relative humidity", room.relative_humidity())
        .power("coil load", coil.heat()?);
    Ok(())
}
