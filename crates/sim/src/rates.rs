//! Rate (propensity) evaluation for the seven event types.

use crate::params::{EffectiveRates, Params};
use crate::state::State;
use crate::template::{EventKind, ModelTemplate, N_EVENTS, Transmission};
use sirgen_covar::Covariates;

/// Evaluates the instantaneous rate of every event in the template.
///
/// Returns one rate per event in template order. Each rate expression is
/// proportional to the occupancy of its source compartment, so rates vanish
/// when compartments are empty and valid inputs can never drive a
/// compartment negative.
///
/// The infection rate under frequency-dependent transmission divides by
/// `N`; the caller must guarantee `N > 0` whenever `I > 0` (true for any
/// state reachable from a valid initial condition, since infectious
/// individuals are alive). The division is short-circuited when `S * I`
/// is zero, so an extinct population yields rate zero rather than NaN.
///
/// Rates are *not* checked for sign here; the engine validates every rate
/// it consumes and aborts on negative or NaN values.
pub fn rates(
    template: &ModelTemplate,
    state: &State,
    params: &Params,
    covariates: &Covariates,
) -> [f64; N_EVENTS] {
    let eff = params.effective(covariates);
    let mut out = [0.0; N_EVENTS];
    for (slot, event) in out.iter_mut().zip(template.events().iter()) {
        *slot = event_rate(event.kind, template.transmission(), state, &eff);
    }
    out
}

fn event_rate(
    kind: EventKind,
    transmission: Transmission,
    state: &State,
    eff: &EffectiveRates,
) -> f64 {
    let s = state.s as f64;
    let i = state.i as f64;
    let r = state.r as f64;
    let n = state.n as f64;
    match kind {
        EventKind::Birth => eff.mu * n,
        EventKind::Infection => {
            let mass = s * i;
            match transmission {
                Transmission::DensityDependent => eff.beta * mass,
                Transmission::FrequencyDependent => {
                    if mass == 0.0 {
                        0.0
                    } else {
                        eff.beta * mass / n
                    }
                }
            }
        }
        EventKind::Recovery => eff.gamma * i,
        EventKind::DeathS => eff.d * s,
        EventKind::DeathI => (eff.d + eff.eta) * i,
        EventKind::DeathR => eff.d * r,
        EventKind::Vaccination => eff.p * s,
    }
}
