//! Report lookups shared by the worked-problem tests.
//!
//! Each helper panics with the part and label when an entry is missing or
//! holds a different kind of quantity, which is what a failing test needs.

use airco_core::units::us;
use airco_textbook::{Report, Value};
use uom::si::{
    available_energy::kilojoule_per_kilogram, mass_rate::kilogram_per_second, power::kilowatt,
    ratio::ratio as unit_ratio, thermodynamic_temperature::degree_celsius,
};

/// Returns an entry's value.
///
/// # Panics
///
/// Panics if the report has no such entry.
#[must_use]
pub fn value(report: &Report, part: &str, label: &str) -> Value {
    report
        .get(part, label)
        .unwrap_or_else(|| panic!("`{}` has no `{label}` in `{part}`", report.title))
}

fn kind_error(part: &str, label: &str, kind: &str) -> String {
    format!("`{label}` in `{part}` is not a {kind}")
}

#[must_use]
pub fn celsius(report: &Report, part: &str, label: &str) -> f64 {
    value(report, part, label)
        .as_temperature()
        .unwrap_or_else(|| panic!("{}", kind_error(part, label, "temperature")))
        .get::<degree_celsius>()
}

#[must_use]
pub fn fahrenheit(report: &Report, part: &str, label: &str) -> f64 {
    us::in_fahrenheit(
        value(report, part, label)
            .as_temperature()
            .unwrap_or_else(|| panic!("{}", kind_error(part, label, "temperature"))),
    )
}

#[must_use]
pub fn delta_f(report: &Report, part: &str, label: &str) -> f64 {
    match value(report, part, label) {
        Value::TemperatureDifference(dt) => us::in_delta_f(dt),
        _ => panic!("{}", kind_error(part, label, "temperature difference")),
    }
}

/// A fraction, or a humidity ratio in kg/kg.
#[must_use]
pub fn ratio(report: &Report, part: &str, label: &str) -> f64 {
    value(report, part, label)
        .as_ratio()
        .unwrap_or_else(|| panic!("{}", kind_error(part, label, "ratio")))
        .get::<unit_ratio>()
}

#[must_use]
pub fn grams_per_kg(report: &Report, part: &str, label: &str) -> f64 {
    ratio(report, part, label) * 1e3
}

#[must_use]
pub fn kg_per_s(report: &Report, part: &str, label: &str) -> f64 {
    mass_rate(report, part, label).get::<kilogram_per_second>()
}

#[must_use]
pub fn lb_per_hour(report: &Report, part: &str, label: &str) -> f64 {
    us::in_lb_per_hour(mass_rate(report, part, label))
}

#[must_use]
pub fn lb_per_minute(report: &Report, part: &str, label: &str) -> f64 {
    us::in_lb_per_minute(mass_rate(report, part, label))
}

#[must_use]
pub fn cfm(report: &Report, part: &str, label: &str) -> f64 {
    us::in_cfm(
        value(report, part, label)
            .as_volume_rate()
            .unwrap_or_else(|| panic!("{}", kind_error(part, label, "volume rate"))),
    )
}

#[must_use]
pub fn kilowatts(report: &Report, part: &str, label: &str) -> f64 {
    power(report, part, label).get::<kilowatt>()
}

#[must_use]
pub fn btu_per_hour(report: &Report, part: &str, label: &str) -> f64 {
    us::in_btu_per_hour(power(report, part, label))
}

#[must_use]
pub fn kj_per_kg(report: &Report, part: &str, label: &str) -> f64 {
    value(report, part, label)
        .as_specific_enthalpy()
        .unwrap_or_else(|| panic!("{}", kind_error(part, label, "specific enthalpy")))
        .get::<kilojoule_per_kilogram>()
}

fn mass_rate(report: &Report, part: &str, label: &str) -> uom::si::f64::MassRate {
    value(report, part, label)
        .as_mass_rate()
        .unwrap_or_else(|| panic!("{}", kind_error(part, label, "mass rate")))
}

fn power(report: &Report, part: &str, label: &str) -> uom::si::f64::Power {
    value(report, part, label)
        .as_power()
        .unwrap_or_else(|| panic!("{}", kind_error(part, label, "power")))
}
