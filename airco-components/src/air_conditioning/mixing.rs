//! Adiabatic mixing of two humid air streams.

use airco_core::constraint::ConstraintError;
use airco_thermo::{
    AirStream, HumidAir, PropertyError,
    humid_air::relations::{dry_bulb_from_enthalpy, enthalpy},
};
use thiserror::Error;
use tracing::{debug, warn};
use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};

/// Relative mismatch above which a given outlet flow is reported and replaced.
const FLOW_MISMATCH: f64 = 1e-3;

/// Enthalpy difference, J/kg, below which the lever rule uses humidity ratio.
const LEVER_EPS: f64 = 1e-3;

/// Errors that may occur when solving a mixing balance.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MixingError {
    /// The known states and flows do not determine the balance.
    #[error("mixing is under-determined: {0}")]
    Underdetermined(&'static str),

    /// Both inlets have the same state, so the flow split is arbitrary.
    #[error("inlet states coincide, so the flow split cannot be found")]
    IndistinctInlets,

    /// A solved flow is negative or the outlet flow is zero.
    #[error("non-physical {quantity}: {value} kg/s")]
    NonPhysical { quantity: &'static str, value: f64 },

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

/// A stream whose state, flow, or both may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialStream {
    pub state: Option<HumidAir>,
    pub mass_rate: Option<MassRate>,
}

impl PartialStream {
    #[must_use]
    pub fn known(stream: AirStream) -> Self {
        Self {
            state: Some(stream.state),
            mass_rate: Some(stream.mass_rate()),
        }
    }

    #[must_use]
    pub fn state(state: HumidAir) -> Self {
        Self {
            state: Some(state),
            mass_rate: None,
        }
    }

    #[must_use]
    pub fn flow(mass_rate: MassRate) -> Self {
        Self {
            state: None,
            mass_rate: Some(mass_rate),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    fn flow_si(&self) -> Option<f64> {
        self.mass_rate.map(|m| m.get::<kilogram_per_second>())
    }
}

/// Two inlet streams mixed adiabatically into one outlet.
///
/// Dry air and water vapor are conserved, and so is enthalpy:
/// `ṁ₁ + ṁ₂ = ṁ`, `ṁ₁W₁ + ṁ₂W₂ = ṁW`, and `ṁ₁h₁ + ṁ₂h₂ = ṁh`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdiabaticMixing {
    pub in1: AirStream,
    pub in2: AirStream,
    pub out: AirStream,
}

impl AdiabaticMixing {
    /// Mixes two complete streams.
    ///
    /// # Errors
    ///
    /// Returns an error if both flows are zero.
    pub fn of(in1: AirStream, in2: AirStream) -> Result<Self, MixingError> {
        Self::solve(
            PartialStream::known(in1),
            PartialStream::known(in2),
            PartialStream::unknown(),
        )
    }

    /// Completes the balance from whatever states and flows are known.
    ///
    /// Three cases are handled:
    ///
    /// 1. Both inlets are complete, so the outlet follows directly.
    /// 2. All three states are known, so missing flows follow from the lever
    ///    rule given any one flow.
    /// 3. One inlet state is unknown but the flows are known or derivable, so
    ///    that state is back-solved from the outlet.
    ///
    /// # Errors
    ///
    /// Returns [`MixingError::Underdetermined`] if none of the cases apply, and
    /// [`MixingError::NonPhysical`] if a solved flow is negative.
    pub fn solve(
        in1: PartialStream,
        in2: PartialStream,
        out: PartialStream,
    ) -> Result<Self, MixingError> {
        match (in1.state, in1.flow_si(), in2.state, in2.flow_si(), out.state) {
            (Some(s1), Some(m1), Some(s2), Some(m2), _) => Self::forward(s1, m1, s2, m2, out),
            (Some(s1), _, Some(s2), _, Some(s)) => Self::lever(s1, s2, s, [in1, in2, out]),
            (Some(s1), _, None, _, Some(s)) => {
                let (m1, m2, m) = flows(in1, in2, out)?;
                let s2 = back_solve(s, m, s1, m1, m2)?;
                Self::assemble(s1, m1, s2, m2, s, m)
            }
            (None, _, Some(s2), _, Some(s)) => {
                let (m1, m2, m) = flows(in1, in2, out)?;
                let s1 = back_solve(s, m, s2, m2, m1)?;
                Self::assemble(s1, m1, s2, m2, s, m)
            }
            _ => Err(MixingError::Underdetermined(
                "need both inlets, all three states, or one inlet state plus the outlet",
            )),
        }
    }

    fn forward(
        s1: HumidAir,
        m1: f64,
        s2: HumidAir,
        m2: f64,
        out: PartialStream,
    ) -> Result<Self, MixingError> {
        let m = m1 + m2;
        if m <= 0.0 {
            return Err(MixingError::NonPhysical {
                quantity: "outlet flow",
                value: m,
            });
        }
        if let Some(given) = out.flow_si() {
            if (given - m).abs() > FLOW_MISMATCH * m {
                warn!(given, sum = m, "mixing outlet flow differs from the inlet sum; using the sum");
            }
        }

        let (p, t1, w1) = s1.si();
        let (_, t2, w2) = s2.si();
        let w = (m1 * w1 + m2 * w2) / m;
        let h = (m1 * enthalpy(t1, w1) + m2 * enthalpy(t2, w2)) / m;
        let p = out.state.map_or(p, |s| s.si().0);
        let s = HumidAir::from_si(p, dry_bulb_from_enthalpy(h, w), w)?;
        debug!(t_out = s.si().1, w_out = w, m_out = m, "mixed two streams");
        Self::assemble(s1, m1, s2, m2, s, m)
    }

    fn lever(
        s1: HumidAir,
        s2: HumidAir,
        s: HumidAir,
        [in1, in2, out]: [PartialStream; 3],
    ) -> Result<Self, MixingError> {
        let (x1, x2, x) = {
            let (h1, h2, h) = (h_of(s1), h_of(s2), h_of(s));
            if (h1 - h2).abs() > LEVER_EPS {
                (h1, h2, h)
            } else {
                let (w1, w2, w) = (s1.si().2, s2.si().2, s.si().2);
                if (w1 - w2).abs() <= 1e-12 {
                    return Err(MixingError::IndistinctInlets);
                }
                (w1, w2, w)
            }
        };

        // Fraction of the outlet that comes from inlet 1.
        let y1 = (x - x2) / (x1 - x2);
        let m = match (out.flow_si(), in1.flow_si(), in2.flow_si()) {
            (Some(m), _, _) => m,
            (None, Some(m1), _) if y1.abs() > 0.0 => m1 / y1,
            (None, _, Some(m2)) if (1.0 - y1).abs() > 0.0 => m2 / (1.0 - y1),
            _ => {
                return Err(MixingError::Underdetermined(
                    "the lever rule needs at least one flow",
                ));
            }
        };
        let m1 = m * y1;
        Self::assemble(s1, m1, s2, m - m1, s, m)
    }

    fn assemble(
        s1: HumidAir,
        m1: f64,
        s2: HumidAir,
        m2: f64,
        s: HumidAir,
        m: f64,
    ) -> Result<Self, MixingError> {
        for (quantity, value) in [("inlet 1 flow", m1), ("inlet 2 flow", m2), ("outlet flow", m)] {
            if value < -1e-12 || value.is_nan() {
                return Err(MixingError::NonPhysical { quantity, value });
            }
        }
        let stream = |state, m: f64| {
            AirStream::new(state, MassRate::new::<kilogram_per_second>(m.max(0.0)))
        };
        Ok(Self {
            in1: stream(s1, m1)?,
            in2: stream(s2, m2)?,
            out: stream(s, m)?,
        })
    }
}

fn h_of(state: HumidAir) -> f64 {
    let (_, t, w) = state.si();
    enthalpy(t, w)
}

/// Returns `(m1, m2, m)` when any two of them are known.
fn flows(
    in1: PartialStream,
    in2: PartialStream,
    out: PartialStream,
) -> Result<(f64, f64, f64), MixingError> {
    match (in1.flow_si(), in2.flow_si(), out.flow_si()) {
        (Some(m1), Some(m2), _) => Ok((m1, m2, m1 + m2)),
        (Some(m1), None, Some(m)) => Ok((m1, m - m1, m)),
        (None, Some(m2), Some(m)) => Ok((m - m2, m2, m)),
        _ => Err(MixingError::Underdetermined(
            "back-solving an inlet state needs two of the three flows",
        )),
    }
}

/// Solves the inlet state that, mixed with `known`, gives `out`.
fn back_solve(
    out: HumidAir,
    m: f64,
    known: HumidAir,
    m_known: f64,
    m_missing: f64,
) -> Result<HumidAir, MixingError> {
    if m_missing <= 0.0 {
        return Err(MixingError::NonPhysical {
            quantity: "back-solved inlet flow",
            value: m_missing,
        });
    }
    let (p, _, w) = out.si();
    let w_known = known.si().2;
    let w_missing = (m * w - m_known * w_known) / m_missing;
    let h_missing = (m * h_of(out) - m_known * h_of(known)) / m_missing;
    Ok(HumidAir::from_si(
        p,
        dry_bulb_from_enthalpy(h_missing, w_missing),
        w_missing,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use airco_thermo::Property;
    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, Ratio, ThermodynamicTemperature},
        pressure::kilopascal,
        ratio::ratio,
        thermodynamic_temperature::degree_celsius,
    };

    fn state(t: f64, rh: f64) -> HumidAir {
        HumidAir::with_pressure(
            Pressure::new::<kilopascal>(101.3),
            Property::DryBulb(ThermodynamicTemperature::new::<degree_celsius>(t)),
            Property::RelativeHumidity(Ratio::new::<ratio>(rh)),
        )
        .expect("valid state")
    }

    fn stream(state: HumidAir, m: f64) -> AirStream {
        AirStream::new(state, MassRate::new::<kilogram_per_second>(m)).expect("valid flow")
    }

    fn kg_s(m: MassRate) -> f64 {
        m.get::<kilogram_per_second>()
    }

    #[test]
    fn outdoor_and_return_air() -> Result<(), MixingError> {
        let outdoor = stream(state(34.0, 0.6), 0.3);
        let recirculated = stream(state(26.0, 0.5), 0.7);
        let mixed = AdiabaticMixing::of(outdoor, recirculated)?;

        assert_relative_eq!(kg_s(mixed.out.mass_rate()), 1.0);
        assert_relative_eq!(
            mixed.out.state.dry_bulb().get::<degree_celsius>(),
            28.43,
            epsilon = 0.01
        );
        assert_relative_eq!(
            mixed.out.state.humidity_ratio().get::<ratio>(),
            0.013_424,
            epsilon = 2e-5
        );
        assert_relative_eq!(
            kg_s(mixed.out.water_rate()),
            kg_s(outdoor.water_rate() + recirculated.water_rate()),
            epsilon = 1e-12
        );
        Ok(())
    }

    #[test]
    fn lever_rule_recovers_flows() -> Result<(), MixingError> {
        let a = state(34.0, 0.6);
        let b = state(26.0, 0.5);
        let forward = AdiabaticMixing::of(stream(a, 0.3), stream(b, 0.7))?;

        let from_outlet = AdiabaticMixing::solve(
            PartialStream::state(a),
            PartialStream::state(b),
            PartialStream::known(forward.out),
        )?;
        assert_relative_eq!(kg_s(from_outlet.in1.mass_rate()), 0.3, epsilon = 1e-9);
        assert_relative_eq!(kg_s(from_outlet.in2.mass_rate()), 0.7, epsilon = 1e-9);

        let from_inlet = AdiabaticMixing::solve(
            PartialStream::known(stream(a, 0.3)),
            PartialStream::state(b),
            PartialStream::state(forward.out.state),
        )?;
        assert_relative_eq!(kg_s(from_inlet.out.mass_rate()), 1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn back_solves_missing_inlet() -> Result<(), MixingError> {
        let a = state(34.0, 0.6);
        let b = state(26.0, 0.5);
        let forward = AdiabaticMixing::of(stream(a, 0.3), stream(b, 0.7))?;

        let solved = AdiabaticMixing::solve(
            PartialStream::known(stream(a, 0.3)),
            PartialStream::unknown(),
            PartialStream::known(forward.out),
        )?;
        assert_relative_eq!(
            solved.in2.state.dry_bulb().get::<degree_celsius>(),
            26.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(kg_s(solved.in2.mass_rate()), 0.7, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn missing_information_is_reported() {
        let result = AdiabaticMixing::solve(
            PartialStream::state(state(30.0, 0.5)),
            PartialStream::unknown(),
            PartialStream::flow(MassRate::new::<kilogram_per_second>(1.0)),
        );
        assert!(matches!(result, Err(MixingError::Underdetermined(_))));

        let same = state(20.0, 0.5);
        let result = AdiabaticMixing::solve(
            PartialStream::state(same),
            PartialStream::state(same),
            PartialStream::known(stream(same, 1.0)),
        );
        assert_eq!(result, Err(MixingError::IndistinctInlets));
    }

    #[test]
    fn outlet_outside_inlets_is_non_physical() {
        let result = AdiabaticMixing::solve(
            PartialStream::state(state(30.0, 0.5)),
            PartialStream::state(state(20.0, 0.5)),
            PartialStream::known(stream(state(35.0, 0.5), 1.0)),
        );
        assert!(matches!(result, Err(MixingError::NonPhysical { .. })));
    }
}
