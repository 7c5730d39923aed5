use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config::UnitSystem;

#[derive(Debug, Parser)]
#[command(name = "airco")]
#[command(about = "Psychrometric states and worked air-conditioning problems", long_about = None)]
pub struct Cli {
    /// Display settings file (defaults to ./airco.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter such as `debug` or `airco_components=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the worked problems
    List,
    /// Work one or more problems and print their reports
    Run(RunArgs),
    /// Print the properties of a humid air state
    State(StateArgs),
}

/// Unit system and precision overrides shared by the printing commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct DisplayArgs {
    /// Unit system for inputs and results
    #[arg(long, value_enum)]
    pub units: Option<UnitSystem>,

    /// Digits after the decimal point
    #[arg(long)]
    pub decimals: Option<usize>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Problem names, as shown by `airco list`
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub names: Vec<String>,

    /// Work every problem
    #[arg(long)]
    pub all: bool,

    /// Print reports as TOML with SI values instead of text
    #[arg(long)]
    pub toml: bool,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// A state fixed by dry bulb and one more property.
///
/// Temperatures and enthalpy are read in the selected unit system.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("second").required(true).args(["rh", "twb", "w", "h", "tdp"])))]
pub struct StateArgs {
    /// Dry bulb temperature
    #[arg(long)]
    pub tdb: f64,

    /// Relative humidity, 0 to 1
    #[arg(long)]
    pub rh: Option<f64>,

    /// Wet bulb temperature
    #[arg(long)]
    pub twb: Option<f64>,

    /// Humidity ratio, mass of vapor per mass of dry air
    #[arg(long)]
    pub w: Option<f64>,

    /// Enthalpy per mass of dry air (kJ/kg or Btu/lb)
    #[arg(long)]
    pub h: Option<f64>,

    /// Dew point temperature
    #[arg(long)]
    pub tdp: Option<f64>,

    /// Barometric pressure in kPa
    #[arg(long, default_value_t = 101.325)]
    pub pressure: f64,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_needs_names_or_all() {
        assert!(Cli::try_parse_from(["airco", "run"]).is_err());
        assert!(Cli::try_parse_from(["airco", "run", "cav_design", "--all"]).is_err());

        let cli = Cli::try_parse_from(["airco", "run", "--all", "--units", "us"])
            .expect("--all alone is accepted");
        let Command::Run(args) = cli.command else {
            panic!("expected the run command");
        };
        assert!(args.all);
        assert_eq!(args.display.units, Some(UnitSystem::Us));
    }

    #[test]
    fn state_needs_exactly_one_second_property() {
        assert!(Cli::try_parse_from(["airco", "state", "--tdb", "25"]).is_err());
        assert!(
            Cli::try_parse_from(["airco", "state", "--tdb", "25", "--rh", "0.5", "--w", "0.01"])
                .is_err()
        );

        let cli = Cli::try_parse_from(["airco", "state", "--tdb", "25", "--twb", "18"])
            .expect("dry bulb and wet bulb fix a state");
        let Command::State(args) = cli.command else {
            panic!("expected the state command");
        };
        assert_eq!(args.twb, Some(18.0));
        assert_eq!(args.pressure, 101.325);
    }
}
