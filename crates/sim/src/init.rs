//! Initial state construction from named fractions and population size.

use crate::error::SimError;
use crate::params::Params;
use crate::state::State;
use crate::template::ProcessModel;

/// Builds the initial state at `t0` from a validated parameter set.
///
/// `N_0` is allocated proportionally across the initial-condition weights
/// `S_0 : I_0 : R_0` (SIR) or `S_0 : I_0` (SIS, `R_0` ignored). Each
/// compartment is rounded to the nearest integer with ties to even, so the
/// compartment sum may differ from the rounded `N_0` by up to one per
/// compartment; `n` is set from `N_0` directly, not from the sum, and the
/// discrepancy is accepted rather than corrected. `cases` starts at zero.
///
/// # Errors
///
/// Returns a validation error when `rho` is outside `[0, 1]`, any of
/// `{S_0, I_0, R_0, N_0}` is negative or non-finite, or every participating
/// fraction is zero.
pub fn initialize(params: &Params, process: ProcessModel) -> Result<State, SimError> {
    params.validate()?;

    let (s_w, i_w, r_w) = match process {
        ProcessModel::Sir => (params.s_0, params.i_0, params.r_0),
        ProcessModel::Sis => (params.s_0, params.i_0, 0.0),
    };
    let total = s_w + i_w + r_w;
    if total <= 0.0 {
        return Err(SimError::ZeroInitialFractions);
    }
    let scale = params.n_0 / total;

    Ok(State {
        s: (s_w * scale).round_ties_even() as u64,
        i: (i_w * scale).round_ties_even() as u64,
        r: (r_w * scale).round_ties_even() as u64,
        n: params.n_0.round_ties_even() as u64,
        cases: 0,
    })
}
