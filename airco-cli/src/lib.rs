//! The `airco` command-line tool.
//!
//! Commands write to any [`io::Write`] so they can be exercised without a
//! terminal; `main` passes standard output.

pub mod cli;
pub mod config;
pub mod format;

use std::io;

use airco_core::units::us;
use airco_textbook::{Problem, TextbookError, catalog, find};
use airco_thermo::{HumidAir, Property, PropertyError};
use thiserror::Error;
use uom::si::{
    available_energy::kilojoule_per_kilogram,
    f64::{AvailableEnergy, Pressure, Ratio, ThermodynamicTemperature},
    pressure::kilopascal,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use cli::{Cli, Command, RunArgs, StateArgs};
use config::{Config, ConfigError, UnitSystem};

/// Errors reported by the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Textbook(#[from] TextbookError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Executes a parsed command line.
///
/// # Errors
///
/// Returns a [`CliError`] if the configuration cannot be loaded, a problem
/// or state fails to solve, or the output cannot be written.
pub fn run(cli: &Cli, out: &mut impl io::Write) -> Result<(), CliError> {
    match &cli.command {
        Command::List => list(out),
        Command::Run(args) => {
            let config = Config::load(cli.config.as_deref())?
                .with_overrides(args.display.units, args.display.decimals);
            run_problems(args, &config, out)
        }
        Command::State(args) => {
            let config = Config::load(cli.config.as_deref())?
                .with_overrides(args.display.units, args.display.decimals);
            state(args, &config, out)
        }
    }
}

fn list(out: &mut impl io::Write) -> Result<(), CliError> {
    let width = catalog()
        .iter()
        .map(|problem| problem.name.len())
        .max()
        .unwrap_or(0);
    for problem in catalog() {
        writeln!(out, "{:<width$}  {}", problem.name, problem.description)?;
    }
    Ok(())
}

fn run_problems(args: &RunArgs, config: &Config, out: &mut impl io::Write) -> Result<(), CliError> {
    let problems: Vec<&Problem> = if args.all {
        catalog().iter().collect()
    } else {
        args.names
            .iter()
            .map(|name| find(name))
            .collect::<Result<Vec<_>, _>>()?
    };

    for (i, problem) in problems.into_iter().enumerate() {
        let report = problem.run()?;
        tracing::info!(problem = problem.name, entries = report.entries.len(), "solved");
        if i > 0 {
            writeln!(out)?;
        }
        if args.toml {
            write!(out, "{}", toml::to_string(&report)?)?;
        } else {
            write!(out, "{}", format::report(&report, config))?;
        }
    }
    Ok(())
}

fn state(args: &StateArgs, config: &Config, out: &mut impl io::Write) -> Result<(), CliError> {
    let temperature = |t: f64| match config.units {
        UnitSystem::Si => ThermodynamicTemperature::new::<degree_celsius>(t),
        UnitSystem::Us => us::fahrenheit(t),
    };

    let second = if let Some(rh) = args.rh {
        Property::RelativeHumidity(Ratio::new::<ratio>(rh))
    } else if let Some(twb) = args.twb {
        Property::WetBulb(temperature(twb))
    } else if let Some(w) = args.w {
        Property::HumidityRatio(Ratio::new::<ratio>(w))
    } else if let Some(h) = args.h {
        Property::Enthalpy(match config.units {
            UnitSystem::Si => AvailableEnergy::new::<kilojoule_per_kilogram>(h),
            UnitSystem::Us => us::btu_per_lb(h),
        })
    } else if let Some(tdp) = args.tdp {
        Property::DewPoint(temperature(tdp))
    } else {
        return Err(PropertyError::InvalidInput(
            "a second property is required besides the dry bulb".into(),
        )
        .into());
    };

    let air = HumidAir::with_pressure(
        Pressure::new::<kilopascal>(args.pressure),
        Property::DryBulb(temperature(args.tdb)),
        second,
    )?;
    tracing::debug!(?air, "resolved state");
    write!(out, "{}", format::state(&air, config))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use airco_textbook::{Report, Value};
    use approx::assert_relative_eq;
    use clap::Parser;

    fn output(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(args).expect("arguments parse");
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out).expect("output is UTF-8"))
    }

    #[test]
    fn lists_every_problem() -> Result<(), CliError> {
        let text = output(&["airco", "list"])?;
        assert_eq!(text.lines().count(), catalog().len());
        assert!(text.contains("vav_multizone_analysis"));
        Ok(())
    }

    #[test]
    fn unknown_problem_is_an_error() {
        let result = output(&["airco", "run", "no_such_problem"]);
        assert!(matches!(
            result,
            Err(CliError::Textbook(TextbookError::UnknownProblem(_)))
        ));
    }

    #[test]
    fn prints_a_state_in_us_units() -> Result<(), CliError> {
        let text = output(&[
            "airco", "state", "--tdb", "78", "--rh", "0.5", "--units", "us", "--decimals", "1",
        ])?;
        assert!(text.contains("dry bulb           78.0 °F"));
        assert!(text.contains("Btu/lb"));
        Ok(())
    }

    #[test]
    fn report_survives_a_toml_round_trip() -> Result<(), CliError> {
        let report = find("airco_proc_01")?.run()?;
        let text = toml::to_string(&report)?;
        let parsed: Report = toml::from_str(&text).expect("serialized report parses");

        assert_eq!(parsed.title, report.title);
        assert_eq!(parsed.entries.len(), report.entries.len());
        for (a, b) in parsed.entries.iter().zip(&report.entries) {
            assert_eq!(a.part, b.part);
            assert_eq!(a.label, b.label);
            assert_eq!(
                std::mem::discriminant(&a.value),
                std::mem::discriminant(&b.value)
            );
        }

        let heat = parsed
            .get("1. Sensible heating", "heat added")
            .and_then(|value| value.as_power())
            .expect("heat added is a power");
        let expected = report
            .get("1. Sensible heating", "heat added")
            .and_then(|value| value.as_power())
            .expect("heat added is a power");
        assert_relative_eq!(heat.value, expected.value, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn toml_output_holds_kind_tags() -> Result<(), CliError> {
        let text = output(&["airco", "run", "cav_vav_part_load", "--toml"])?;
        let parsed: Report = toml::from_str(&text).expect("printed report parses");
        assert!(matches!(
            parsed.get("VAV", "supply flow"),
            Some(Value::MassRate(_))
        ));
        assert!(text.contains("kind = \"power\""));
        Ok(())
    }
}
