//! Text rendering of reports and states in either unit system.

use std::fmt::Write;

use airco_core::units::us;
use airco_textbook::{Report, Value};
use airco_thermo::HumidAir;
use uom::si::{
    available_energy::kilojoule_per_kilogram,
    mass_density::{kilogram_per_cubic_meter, pound_per_cubic_foot},
    mass_rate::kilogram_per_second,
    power::kilowatt,
    pressure::{kilopascal, psi},
    ratio::ratio,
    specific_heat_capacity::{btu_it_per_pound_degree_fahrenheit, kilojoule_per_kilogram_kelvin},
    specific_volume::{cubic_foot_per_pound, cubic_meter_per_kilogram},
    temperature_interval::kelvin,
    thermodynamic_temperature::degree_celsius,
    volume_rate::cubic_meter_per_second,
};

use crate::config::{Config, UnitSystem};

/// Converts a value to a number and unit label in the chosen system.
#[must_use]
pub fn convert(value: &Value, units: UnitSystem) -> (f64, &'static str) {
    match (units, *value) {
        (UnitSystem::Si, Value::Temperature(t)) => (t.get::<degree_celsius>(), "°C"),
        (UnitSystem::Us, Value::Temperature(t)) => (us::in_fahrenheit(t), "°F"),
        (UnitSystem::Si, Value::TemperatureDifference(dt)) => (dt.get::<kelvin>(), "K"),
        (UnitSystem::Us, Value::TemperatureDifference(dt)) => (us::in_delta_f(dt), "°F"),
        (UnitSystem::Si, Value::HumidityRatio(w)) => (w.get::<ratio>() * 1e3, "g/kg"),
        (UnitSystem::Us, Value::HumidityRatio(w)) => (w.get::<ratio>(), "lb/lb"),
        (_, Value::Fraction(x)) => (x.get::<ratio>(), ""),
        (UnitSystem::Si, Value::Pressure(p)) => (p.get::<kilopascal>(), "kPa"),
        (UnitSystem::Us, Value::Pressure(p)) => (p.get::<psi>(), "psi"),
        (UnitSystem::Si, Value::MassRate(m)) => (m.get::<kilogram_per_second>(), "kg/s"),
        (UnitSystem::Us, Value::MassRate(m)) => (us::in_lb_per_hour(m), "lb/h"),
        (UnitSystem::Si, Value::VolumeRate(v)) => (v.get::<cubic_meter_per_second>(), "m³/s"),
        (UnitSystem::Us, Value::VolumeRate(v)) => (us::in_cfm(v), "ft³/min"),
        (UnitSystem::Si, Value::Power(q)) => (q.get::<kilowatt>(), "kW"),
        (UnitSystem::Us, Value::Power(q)) => (us::in_btu_per_hour(q), "Btu/h"),
        (UnitSystem::Si, Value::Density(rho)) => (rho.get::<kilogram_per_cubic_meter>(), "kg/m³"),
        (UnitSystem::Us, Value::Density(rho)) => (rho.get::<pound_per_cubic_foot>(), "lb/ft³"),
        (UnitSystem::Si, Value::SpecificVolume(v)) => (v.get::<cubic_meter_per_kilogram>(), "m³/kg"),
        (UnitSystem::Us, Value::SpecificVolume(v)) => (v.get::<cubic_foot_per_pound>(), "ft³/lb"),
        (UnitSystem::Si, Value::SpecificEnthalpy(h)) => (h.get::<kilojoule_per_kilogram>(), "kJ/kg"),
        (UnitSystem::Us, Value::SpecificEnthalpy(h)) => (us::in_btu_per_lb(h), "Btu/lb"),
        (UnitSystem::Si, Value::SpecificHeat(cp)) => {
            (cp.get::<kilojoule_per_kilogram_kelvin>(), "kJ/(kg·K)")
        }
        (UnitSystem::Us, Value::SpecificHeat(cp)) => {
            (cp.get::<btu_it_per_pound_degree_fahrenheit>(), "Btu/(lb·°F)")
        }
    }
}

/// Formats a value with its unit.
#[must_use]
pub fn value(value: &Value, config: &Config) -> String {
    let (number, unit) = convert(value, config.units);
    let decimals = config.decimals;
    if unit.is_empty() {
        format!("{number:.decimals$}")
    } else {
        format!("{number:.decimals$} {unit}")
    }
}

/// Renders a report as aligned text, one block per part.
#[must_use]
pub fn report(report: &Report, config: &Config) -> String {
    let width = report
        .entries
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(out, "{}", "=".repeat(report.title.chars().count()));
    for part in report.parts() {
        let _ = writeln!(out, "\n{part}");
        for entry in report.entries.iter().filter(|entry| entry.part == part) {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                entry.label,
                value(&entry.value, config)
            );
        }
    }
    out
}

/// Renders the properties of a humid air state.
#[must_use]
pub fn state(state: &HumidAir, config: &Config) -> String {
    let mut entries = vec![
        ("pressure", Value::Pressure(state.pressure())),
        ("dry bulb", Value::Temperature(state.dry_bulb())),
        ("wet bulb", Value::Temperature(state.wet_bulb())),
    ];
    if let Some(dew_point) = state.dew_point() {
        entries.push(("dew point", Value::Temperature(dew_point)));
    }
    entries.extend([
        ("relative humidity", Value::Fraction(state.relative_humidity())),
        ("humidity ratio", Value::HumidityRatio(state.humidity_ratio())),
        ("enthalpy", Value::SpecificEnthalpy(state.enthalpy())),
        ("specific volume", Value::SpecificVolume(state.specific_volume())),
        ("density", Value::Density(state.density())),
        ("specific heat", Value::SpecificHeat(state.specific_heat())),
    ]);

    let mut out = String::new();
    for (label, entry) in entries {
        let _ = writeln!(out, "{label:<18} {}", value(&entry, config));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use airco_thermo::Property;
    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Power, Ratio, ThermodynamicTemperature},
        power::watt,
    };

    fn config(units: UnitSystem, decimals: usize) -> Config {
        Config { units, decimals }
    }

    #[test]
    fn converts_to_us_units() {
        let t = Value::Temperature(ThermodynamicTemperature::new::<degree_celsius>(100.0));
        let (number, unit) = convert(&t, UnitSystem::Us);
        assert_relative_eq!(number, 212.0, epsilon = 1e-9);
        assert_eq!(unit, "°F");

        let q = Value::Power(Power::new::<watt>(1_000.0));
        let (number, unit) = convert(&q, UnitSystem::Us);
        assert_relative_eq!(number, 3_412.14, max_relative = 1e-5);
        assert_eq!(unit, "Btu/h");
    }

    #[test]
    fn formats_with_configured_decimals() {
        let w = Value::HumidityRatio(Ratio::new::<ratio>(0.013_424));
        assert_eq!(value(&w, &config(UnitSystem::Si, 2)), "13.42 g/kg");
        assert_eq!(value(&w, &config(UnitSystem::Us, 4)), "0.0134 lb/lb");

        let shr = Value::Fraction(Ratio::new::<ratio>(0.7));
        assert_eq!(value(&shr, &config(UnitSystem::Si, 1)), "0.7");
    }

    #[test]
    fn renders_parts_in_order() {
        let mut report = Report::new("Demo");
        report
            .part("first")
            .power("heat", Power::new::<watt>(1500.0));
        report
            .part("second")
            .fraction("ratio", Ratio::new::<ratio>(0.25));

        let text = super::report(&report, &Config::default());
        let first = text.find("first").expect("first part rendered");
        let second = text.find("second").expect("second part rendered");
        assert!(first < second);
        assert!(text.contains("heat   1.500 kW"));
        assert!(text.starts_with("Demo\n====\n"));
    }

    #[test]
    fn renders_a_state() -> Result<(), airco_thermo::PropertyError> {
        let air = HumidAir::new(
            Property::DryBulb(ThermodynamicTemperature::new::<degree_celsius>(25.0)),
            Property::RelativeHumidity(Ratio::new::<ratio>(0.5)),
        )?;
        let text = state(&air, &config(UnitSystem::Si, 1));
        assert!(text.contains("dry bulb           25.0 °C"));
        assert!(text.contains("relative humidity  0.5"));
        assert!(text.contains("dew point"));
        Ok(())
    }
}
