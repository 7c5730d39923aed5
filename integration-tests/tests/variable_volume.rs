//! The two-zone VAV system: design worked step by step, the same design
//! through `VavSystem`, and the part-load analysis through `VavPartLoad`.

use airco_textbook::{Report, TextbookError, problems};
use approx::assert_relative_eq;
use integration_tests::{btu_per_hour, cfm, fahrenheit, grams_per_kg, lb_per_minute, ratio};

const TOL: f64 = 0.01;

fn check_summer(r: &Report) {
    assert_relative_eq!(lb_per_minute(r, "Summer zone A", "supply flow"), 768.72, max_relative = TOL);
    assert_relative_eq!(lb_per_minute(r, "Summer zone B", "supply flow"), 353.20, max_relative = TOL);

    let part = "Summer system";
    assert_relative_eq!(fahrenheit(r, part, "supply dry bulb"), 55.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, part, "coil load"), -550_051.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, part, "coil sensible load"), -413_330.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, part, "coil latent load"), -136_721.0, max_relative = TOL);
    assert_relative_eq!(cfm(r, part, "supply volume flow"), 14_739.0, max_relative = TOL);
    assert_relative_eq!(cfm(r, part, "return volume flow"), 15_337.0, max_relative = TOL);
    assert_relative_eq!(
        btu_per_hour(r, part, "coil sensible load") + btu_per_hour(r, part, "coil latent load"),
        btu_per_hour(r, part, "coil load"),
        max_relative = 1e-6
    );
}

fn check_winter(r: &Report) {
    assert_relative_eq!(lb_per_minute(r, "Winter zone A", "supply flow"), 461.23, max_relative = TOL);
    assert_relative_eq!(fahrenheit(r, "Winter zone A", "supply dry bulb"), 96.51, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, "Winter zone A", "reheat"), 249_846.0, max_relative = TOL);
    assert_relative_eq!(lb_per_minute(r, "Winter zone B", "supply flow"), 211.92, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, "Winter zone B", "reheat"), 0.0, epsilon = 1.0);

    let part = "Winter system";
    assert_relative_eq!(fahrenheit(r, part, "supply dry bulb"), 58.93, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, part, "preheat"), 26_415.0, max_relative = 0.02);
    assert_relative_eq!(btu_per_hour(r, part, "peak preheat"), 135_873.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, part, "coil load"), 0.0, epsilon = 1.0);
    assert_relative_eq!(btu_per_hour(r, part, "reheat"), 249_846.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(r, part, "total heat"), 385_719.0, max_relative = TOL);
    assert_relative_eq!(cfm(r, part, "supply volume flow"), 8_800.8, max_relative = TOL);
}

#[test]
fn step_by_step_design() -> Result<(), TextbookError> {
    let r = problems::vav_multizone_design()?;
    check_summer(&r);
    check_winter(&r);

    assert_relative_eq!(
        grams_per_kg(&r, "Summer zone A", "return humidity ratio"),
        8.908,
        max_relative = TOL
    );
    assert_relative_eq!(
        grams_per_kg(&r, "Summer zone B", "return humidity ratio"),
        8.661,
        max_relative = TOL
    );
    assert_relative_eq!(fahrenheit(&r, "Summer system", "cooled dry bulb"), 53.20, max_relative = TOL);
    assert_relative_eq!(fahrenheit(&r, "Summer system", "mixed dry bulb"), 78.31, max_relative = TOL);
    assert_relative_eq!(fahrenheit(&r, "Winter system", "mixed dry bulb"), 54.39, max_relative = TOL);
    Ok(())
}

#[test]
fn system_design_matches_step_by_step() -> Result<(), TextbookError> {
    let r = problems::vav_multizone_system()?;
    check_summer(&r);
    check_winter(&r);
    assert_relative_eq!(fahrenheit(&r, "Summer system", "return dry bulb"), 75.0, max_relative = TOL);
    assert_relative_eq!(fahrenheit(&r, "Winter system", "return dry bulb"), 75.0, max_relative = TOL);
    Ok(())
}

#[test]
fn part_load_analysis() -> Result<(), TextbookError> {
    let r = problems::vav_multizone_analysis()?;

    assert_relative_eq!(lb_per_minute(&r, "Zone A", "supply flow"), 489.24, max_relative = TOL);
    assert_relative_eq!(ratio(&r, "Zone A", "room relative humidity"), 0.4831, max_relative = TOL);
    assert_relative_eq!(lb_per_minute(&r, "Zone B", "supply flow"), 312.01, max_relative = TOL);
    assert_relative_eq!(ratio(&r, "Zone B", "room relative humidity"), 0.4754, max_relative = TOL);

    let part = "System";
    assert_relative_eq!(fahrenheit(&r, part, "supply dry bulb"), 55.0, max_relative = TOL);
    assert_relative_eq!(fahrenheit(&r, part, "return dry bulb"), 75.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(&r, part, "coil load"), -359_246.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(&r, part, "coil sensible load"), -261_454.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(&r, part, "coil latent load"), -97_791.0, max_relative = TOL);
    assert_relative_eq!(btu_per_hour(&r, part, "reheat"), 0.0, epsilon = 1.0);
    assert_relative_eq!(cfm(&r, part, "supply volume flow"), 10_527.0, max_relative = TOL);
    assert_relative_eq!(cfm(&r, part, "return volume flow"), 10_954.0, max_relative = TOL);
    Ok(())
}
