//! Multi-zone variable air volume systems.
//!
//! A VAV system supplies air at one temperature to every zone and meets each
//! zone's sensible load by varying that zone's flow. Zones whose flow would
//! fall below a minimum fraction of design are held at the minimum and
//! reheated instead.
//!
//! [`VavSystem`] sizes a system at its summer and winter design conditions.
//! [`VavPartLoad`] analyzes an existing system at off-design loads.

mod design;
mod part_load;
mod zone;

use airco_core::constraint::ConstraintError;
use airco_thermo::{AirStream, HumidAir, PropertyError};
use thiserror::Error;
use uom::si::{
    f64::{MassRate, Power, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
};

pub use design::{SummerParams, SummerResults, VavSystem, WinterParams, WinterResults};
pub use part_load::{PartLoadParams, PartLoadResults, VavPartLoad};
pub use zone::{Season, Zone, ZoneResult};

use super::{AdiabaticMixing, AirConditioningProcess, FanError, MixingError, ProcessError};

/// Errors that may occur when designing or analyzing a VAV system.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DesignError {
    #[error("the summer design must be run before the winter design")]
    SummerDesignMissing,

    #[error("the system has no zones")]
    NoZones,

    #[error("zone {zone} has no {season} loads")]
    MissingSeason { zone: String, season: &'static str },

    #[error("zone {zone} has no design supply flow")]
    MissingDesignFlow { zone: String },

    #[error("supply air cannot carry the sensible load of zone {zone}")]
    LoadNotCarried { zone: String },

    #[error("zone {zone} needs {reheat:?} of reheat but has no reheat coil")]
    ReheatRequired { zone: String, reheat: Power },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Mixing(#[from] MixingError),

    #[error(transparent)]
    Fan(#[from] FanError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

/// Total, sensible, and latent heat added by a coil.
///
/// Cooling loads are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoilLoad {
    pub total: Power,
    pub sensible: Power,
    pub latent: Power,
}

impl CoilLoad {
    fn of(coil: &AirConditioningProcess) -> Result<Self, ProcessError> {
        Ok(Self {
            total: coil.heat()?,
            sensible: coil.sensible_heat()?,
            latent: coil.latent_heat()?,
        })
    }
}

/// Whether air supplied at `t_in` meets a zone's sensible load with a
/// positive flow.
fn carries_load(t_in: ThermodynamicTemperature, season: &Season) -> bool {
    let q = season.q_sen.get::<watt>();
    let t_zone = season.zone_air.dry_bulb();
    (q > 0.0 && t_in < t_zone) || (q < 0.0 && t_in > t_zone)
}

/// Flow that meets a zone's sensible load with supply air at `supply`.
///
/// Returns `None` when no positive flow can, as for a zone with no load.
fn zone_flow(supply: HumidAir, season: &Season) -> Result<Option<MassRate>, DesignError> {
    if !carries_load(supply.dry_bulb(), season) {
        return Ok(None);
    }
    let m = AirConditioningProcess::new()
        .air_in(supply)
        .dry_bulb_out(season.zone_air.dry_bulb())
        .sensible_heat(season.q_sen)
        .solve()?
        .mass_rate()?;
    Ok(Some(m))
}

/// Air leaving a zone supplied at `supply` with flow `m`.
fn zone_return(supply: HumidAir, season: &Season, m: MassRate) -> Result<HumidAir, DesignError> {
    Ok(AirConditioningProcess::new()
        .air_in(supply)
        .dry_bulb_out(season.zone_air.dry_bulb())
        .mass_rate(m)
        .sensible_heat(season.q_sen)
        .latent_heat(season.q_lat)
        .solve()?
        .air_out()?)
}

/// State after adding `q` to a stream at constant humidity ratio.
fn heated(state: HumidAir, m: MassRate, q: Power) -> Result<HumidAir, DesignError> {
    if q.get::<watt>() == 0.0 {
        return Ok(state);
    }
    Ok(sensible(m, q).air_in(state).solve()?.air_out()?)
}

/// State that reaches `state` after gaining `q` at constant humidity ratio.
fn before_heating(state: HumidAir, m: MassRate, q: Power) -> Result<HumidAir, DesignError> {
    if q.get::<watt>() == 0.0 {
        return Ok(state);
    }
    Ok(sensible(m, q).air_out(state).solve()?.air_in()?)
}

fn sensible(m: MassRate, q: Power) -> super::ProcessBuilder {
    AirConditioningProcess::new()
        .mass_rate(m)
        .heat(q)
        .water_rate(MassRate::new::<kilogram_per_second>(0.0))
}

/// Mixes any number of streams into one.
fn mix_all(streams: impl IntoIterator<Item = AirStream>) -> Result<AirStream, DesignError> {
    let mut streams = streams.into_iter();
    let first = streams.next().ok_or(DesignError::NoZones)?;
    streams.try_fold(first, |acc, next| Ok(AdiabaticMixing::of(acc, next)?.out))
}

/// Heat that takes a stream at constant humidity ratio from `from` to `to`.
fn heat_between(from: HumidAir, to: HumidAir, m: MassRate) -> Result<Power, DesignError> {
    Ok(AirConditioningProcess::new()
        .air_in(from)
        .air_out(to)
        .mass_rate(m)
        .solve()?
        .heat()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use airco_core::units::us;
    use airco_thermo::Property;
    use approx::assert_relative_eq;
    use uom::si::{f64::Ratio, ratio::percent};

    fn state(t_f: f64, rh: f64) -> HumidAir {
        HumidAir::new(
            Property::DryBulb(us::fahrenheit(t_f)),
            Property::RelativeHumidity(Ratio::new::<percent>(rh)),
        )
        .expect("valid state")
    }

    #[test]
    fn heating_round_trips() -> Result<(), DesignError> {
        let m = us::lb_per_minute(500.0);
        let q = us::btu_per_hour(20_000.0);
        let warm = heated(state(55.0, 85.0), m, q)?;
        let back = before_heating(warm, m, q)?;
        assert_relative_eq!(us::in_fahrenheit(back.dry_bulb()), 55.0, epsilon = 1e-9);
        assert_relative_eq!(
            us::in_btu_per_hour(heat_between(state(55.0, 85.0), warm, m)?),
            20_000.0,
            max_relative = 1e-9
        );
        Ok(())
    }

    #[test]
    fn mixing_many_streams_conserves_flow() -> Result<(), DesignError> {
        let streams = [(75.0, 50.0, 400.0), (72.0, 40.0, 250.0), (78.0, 45.0, 100.0)]
            .map(|(t, rh, m)| AirStream::new(state(t, rh), us::lb_per_minute(m)).expect("flow"));
        let mixed = mix_all(streams)?;
        assert_relative_eq!(us::in_lb_per_minute(mixed.mass_rate()), 750.0, max_relative = 1e-12);
        assert!(mix_all(Vec::new()).is_err());
        Ok(())
    }
}
