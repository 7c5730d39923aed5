//! Scalar unknowns of a single-stream process and the rules that relate them.
//!
//! Temperatures are in °C, humidity ratios in kg/kg, flows in kg/s, heat
//! rates in W, and the water enthalpy in J/kg. Each rule fills in one unknown
//! once everything it depends on is known. A pass applies every rule in turn,
//! and passes repeat until nothing changes.

use airco_thermo::humid_air::relations::{
    CP_DRY_AIR, CP_VAPOR, HG_0C, dry_bulb_from_enthalpy, enthalpy, humidity_ratio_from_enthalpy,
    specific_heat, vapor_enthalpy,
};
use tracing::trace;

const EPS: f64 = 1e-12;

/// Smallest temperature or humidity-ratio difference used as a divisor.
const DIFF_EPS: f64 = 1e-9;

/// Smallest enthalpy difference used as a divisor, J/kg.
const DH_EPS: f64 = 1e-6;

const MAX_PASSES: usize = 64;

/// Whether the sensible balance may use an approximate specific heat.
///
/// The exact phase uses `cp(W_in)` only. The approximate phase falls back to
/// `cp(W_out)` or dry air when the inlet humidity is still unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Phase {
    Exact,
    Approximate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct Knowns {
    pub ti: Option<f64>,
    pub wi: Option<f64>,
    pub to: Option<f64>,
    pub wo: Option<f64>,
    pub m: Option<f64>,
    /// Heat added to the air by the coil, excluding the water stream.
    pub q: Option<f64>,
    pub qs: Option<f64>,
    pub ql: Option<f64>,
    /// Total enthalpy change of the air, `qs + ql`.
    pub qa: Option<f64>,
    pub shr: Option<f64>,
    pub mw: Option<f64>,
    pub hw: Option<f64>,
    pub beta: Option<f64>,
    pub tadp: Option<f64>,
    pub wadp: Option<f64>,
}

fn fill(slot: &mut Option<f64>, value: f64) -> bool {
    if slot.is_none() && value.is_finite() {
        *slot = Some(value);
        true
    } else {
        false
    }
}

fn nonzero(x: Option<f64>, eps: f64) -> Option<f64> {
    x.filter(|x| x.abs() > eps)
}

impl Knowns {
    /// Applies passes until no rule fills in anything new.
    pub fn propagate(&mut self, phase: Phase) {
        for pass in 0..MAX_PASSES {
            if !self.step(phase) {
                trace!(pass, ?phase, "process balances settled");
                return;
            }
        }
    }

    fn step(&mut self, phase: Phase) -> bool {
        let mut changed = self.heat_split();
        changed |= self.mass_balance();
        changed |= self.energy_balance();
        changed |= self.enthalpy_balance();
        changed |= self.sensible_balance(phase);
        changed |= self.latent_balance();
        changed |= self.condition_line();
        changed |= self.contact_factor();
        changed
    }

    fn positive_flow(&self) -> Option<f64> {
        self.m.filter(|&m| m > 0.0)
    }

    pub fn states(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.ti?, self.wi?, self.to?, self.wo?))
    }

    /// `qa = qs + ql` and `shr = qs / qa`.
    fn heat_split(&mut self) -> bool {
        let mut changed = false;
        if let (Some(qs), Some(ql)) = (self.qs, self.ql) {
            changed |= fill(&mut self.qa, qs + ql);
        }
        if let (Some(qa), Some(ql)) = (self.qa, self.ql) {
            changed |= fill(&mut self.qs, qa - ql);
        }
        if let (Some(qa), Some(qs)) = (self.qa, self.qs) {
            changed |= fill(&mut self.ql, qa - qs);
        }
        if let (Some(qs), Some(qa)) = (self.qs, nonzero(self.qa, EPS)) {
            changed |= fill(&mut self.shr, qs / qa);
        }
        if let (Some(shr), Some(qa)) = (self.shr, self.qa) {
            changed |= fill(&mut self.qs, shr * qa);
        }
        if let (Some(shr), Some(qs)) = (nonzero(self.shr, EPS), self.qs) {
            changed |= fill(&mut self.qa, qs / shr);
        }
        changed
    }

    /// `mw = m (W_out - W_in)`.
    fn mass_balance(&mut self) -> bool {
        let mut changed = false;
        if let (Some(m), Some(wi), Some(wo)) = (self.m, self.wi, self.wo) {
            changed |= fill(&mut self.mw, m * (wo - wi));
        }
        if let (Some(m), Some(wi), Some(mw)) = (self.positive_flow(), self.wi, self.mw) {
            changed |= fill(&mut self.wo, wi + mw / m);
        }
        if let (Some(m), Some(wo), Some(mw)) = (self.positive_flow(), self.wo, self.mw) {
            changed |= fill(&mut self.wi, wo - mw / m);
        }
        if let (Some(mw), Some(wi), Some(wo)) = (self.mw, self.wi, self.wo) {
            if (wo - wi).abs() > DIFF_EPS {
                changed |= fill(&mut self.m, mw / (wo - wi));
            }
        }
        changed
    }

    /// `qa = q + mw hw`.
    fn energy_balance(&mut self) -> bool {
        let mut changed = false;
        if self.hw == Some(0.0) {
            if let Some(q) = self.q {
                changed |= fill(&mut self.qa, q);
            }
            if let Some(qa) = self.qa {
                changed |= fill(&mut self.q, qa);
            }
        }
        if let (Some(q), Some(mw), Some(hw)) = (self.q, self.mw, self.hw) {
            changed |= fill(&mut self.qa, q + mw * hw);
        }
        if let (Some(qa), Some(mw), Some(hw)) = (self.qa, self.mw, self.hw) {
            changed |= fill(&mut self.q, qa - mw * hw);
        }
        if let (Some(qa), Some(q), Some(mw)) = (self.qa, self.q, nonzero(self.mw, EPS)) {
            changed |= fill(&mut self.hw, (qa - q) / mw);
        }
        if let (Some(qa), Some(q), Some(hw)) = (self.qa, self.q, nonzero(self.hw, EPS)) {
            changed |= fill(&mut self.mw, (qa - q) / hw);
        }
        changed
    }

    /// `qa = m (h_out - h_in)`.
    fn enthalpy_balance(&mut self) -> bool {
        let mut changed = false;
        if let Some((ti, wi, to, wo)) = self.states() {
            let dh = enthalpy(to, wo) - enthalpy(ti, wi);
            if let Some(m) = self.m {
                changed |= fill(&mut self.qa, m * dh);
            }
            if let Some(qa) = self.qa {
                if dh.abs() > DH_EPS {
                    changed |= fill(&mut self.m, qa / dh);
                }
            }
        }
        if let (Some(qa), Some(m)) = (self.qa, self.positive_flow()) {
            let dh = qa / m;
            if let (Some(ti), Some(wi), Some(wo)) = (self.ti, self.wi, self.wo) {
                changed |= fill(&mut self.to, dry_bulb_from_enthalpy(enthalpy(ti, wi) + dh, wo));
            }
            if let (Some(to), Some(wo), Some(wi)) = (self.to, self.wo, self.wi) {
                changed |= fill(&mut self.ti, dry_bulb_from_enthalpy(enthalpy(to, wo) - dh, wi));
            }
            if let (Some(ti), Some(wi), Some(to)) = (self.ti, self.wi, self.to) {
                changed |= fill(&mut self.wo, humidity_ratio_from_enthalpy(to, enthalpy(ti, wi) + dh));
            }
            if let (Some(to), Some(wo), Some(ti)) = (self.to, self.wo, self.ti) {
                changed |= fill(&mut self.wi, humidity_ratio_from_enthalpy(ti, enthalpy(to, wo) - dh));
            }
        }
        changed
    }

    /// `qs = m cp(W_in) (T_out - T_in)`.
    fn sensible_balance(&mut self, phase: Phase) -> bool {
        let cp = match (self.wi, phase) {
            (Some(wi), _) => specific_heat(wi),
            (None, Phase::Approximate) => self.wo.map_or(CP_DRY_AIR, specific_heat),
            (None, Phase::Exact) => return false,
        };
        let mut changed = false;
        if let (Some(m), Some(ti), Some(to)) = (self.m, self.ti, self.to) {
            changed |= fill(&mut self.qs, m * cp * (to - ti));
        }
        if let (Some(qs), Some(ti), Some(to)) = (self.qs, self.ti, self.to) {
            if (to - ti).abs() > DIFF_EPS {
                changed |= fill(&mut self.m, qs / (cp * (to - ti)));
            }
        }
        if let (Some(qs), Some(m)) = (self.qs, self.positive_flow()) {
            let dt = qs / (m * cp);
            if let Some(ti) = self.ti {
                changed |= fill(&mut self.to, ti + dt);
            }
            if let Some(to) = self.to {
                changed |= fill(&mut self.ti, to - dt);
            }
        }
        changed
    }

    /// `ql = m (W_out - W_in) hg(T_out)`.
    fn latent_balance(&mut self) -> bool {
        let Some(to) = self.to else {
            return false;
        };
        let hg = vapor_enthalpy(to);
        let mut changed = false;
        if let (Some(m), Some(wi), Some(wo)) = (self.m, self.wi, self.wo) {
            changed |= fill(&mut self.ql, m * (wo - wi) * hg);
        }
        if let (Some(ql), Some(wi), Some(wo)) = (self.ql, self.wi, self.wo) {
            if (wo - wi).abs() > DIFF_EPS {
                changed |= fill(&mut self.m, ql / ((wo - wi) * hg));
            }
        }
        if let (Some(ql), Some(m)) = (self.ql, self.positive_flow()) {
            let dw = ql / (m * hg);
            if let Some(wi) = self.wi {
                changed |= fill(&mut self.wo, wi + dw);
            }
            if let Some(wo) = self.wo {
                changed |= fill(&mut self.wi, wo - dw);
            }
        }
        changed
    }

    /// Inlet and outlet lie on a line of constant sensible heat ratio.
    ///
    /// Combines the sensible and latent balances with `qs = shr · qa` so any
    /// one of the four state values follows from the other three.
    fn condition_line(&mut self) -> bool {
        let Some(shr) = self.shr else {
            return false;
        };
        let mut changed = false;
        if let (Some(ti), Some(wi), Some(to)) = (self.ti, self.wi, self.to) {
            let ho = enthalpy(ti, wi) + specific_heat(wi) * (to - ti) / shr;
            changed |= fill(&mut self.wo, humidity_ratio_from_enthalpy(to, ho));
        }
        if let (Some(ti), Some(to), Some(wo)) = (self.ti, self.to, self.wo) {
            let dt = to - ti;
            let ho = enthalpy(to, wo);
            changed |= fill(
                &mut self.wi,
                (shr * (ho - CP_DRY_AIR * ti) - CP_DRY_AIR * dt)
                    / (shr * vapor_enthalpy(ti) + CP_VAPOR * dt),
            );
        }
        if let (Some(ti), Some(wi), Some(wo)) = (self.ti, self.wi, self.wo) {
            let cp = specific_heat(wi);
            let den = shr * specific_heat(wo) - cp;
            if den.abs() > DIFF_EPS {
                changed |= fill(
                    &mut self.to,
                    (shr * (enthalpy(ti, wi) - HG_0C * wo) - cp * ti) / den,
                );
            }
        }
        if let (Some(to), Some(wo), Some(wi)) = (self.to, self.wo, self.wi) {
            let cp = specific_heat(wi);
            if (1.0 - shr).abs() > DIFF_EPS {
                changed |= fill(
                    &mut self.ti,
                    (cp * to - shr * (enthalpy(to, wo) - HG_0C * wi)) / (cp * (1.0 - shr)),
                );
            }
        }
        changed
    }

    /// The outlet sits a fraction `beta` of the way from inlet to the ADP.
    fn contact_factor(&mut self) -> bool {
        let (Some(ta), Some(wa)) = (self.tadp, self.wadp) else {
            return false;
        };
        let mut changed = false;
        if let (Some(beta), Some(ti), Some(wi)) = (self.beta, self.ti, self.wi) {
            changed |= fill(&mut self.to, ti - beta * (ti - ta));
            changed |= fill(&mut self.wo, wi - beta * (wi - wa));
        }
        if let (Some(beta), Some(to), Some(wo)) = (self.beta, self.to, self.wo) {
            if (1.0 - beta).abs() > DIFF_EPS {
                changed |= fill(&mut self.ti, (to - beta * ta) / (1.0 - beta));
                changed |= fill(&mut self.wi, (wo - beta * wa) / (1.0 - beta));
            }
        }
        if let (Some(ti), Some(to)) = (self.ti, self.to) {
            if (ti - ta).abs() > DIFF_EPS {
                changed |= fill(&mut self.beta, (ti - to) / (ti - ta));
            } else if let (Some(wi), Some(wo)) = (self.wi, self.wo) {
                if (wi - wa).abs() > EPS {
                    changed |= fill(&mut self.beta, (wi - wo) / (wi - wa));
                }
            }
        }
        changed
    }
}
