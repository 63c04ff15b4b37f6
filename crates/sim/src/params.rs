//! Base parameter set and covariate-adjusted effective rates.

use crate::error::SimError;
use sirgen_covar::Covariates;

/// Base parameters for a simulation run.
///
/// Supplied once at simulator construction as defaults and immutable during
/// a run; [`RunOverrides`](crate::engine::RunOverrides) can substitute a
/// different set per run without mutating the stored defaults.
///
/// Rate parameters may be driven by covariates at run time, so only
/// finiteness is checked here; keeping every effective (base + covariate)
/// rate non-negative over the horizon is the caller's responsibility, and a
/// violation surfaces as [`SimError::InvalidRate`] during the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Recovery rate.
    pub gamma: f64,
    /// Per-capita birth rate.
    pub mu: f64,
    /// Per-capita death rate.
    pub d: f64,
    /// Excess mortality of infectious individuals.
    pub eta: f64,
    /// Transmission rate.
    pub beta_par: f64,
    /// Reporting probability for the binomial observation model.
    pub rho: f64,
    /// Initial susceptible fraction (relative weight).
    pub s_0: f64,
    /// Initial infectious fraction (relative weight).
    pub i_0: f64,
    /// Initial recovered fraction (relative weight, SIR only).
    pub r_0: f64,
    /// Initial total population size.
    pub n_0: f64,
    /// Per-capita vaccination rate of susceptibles.
    pub p: f64,
}

impl Params {
    /// Validates the parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidReportingRate`] when `rho` is outside
    /// `[0, 1]`, [`SimError::NegativeParameter`] when an initial condition
    /// is negative, and [`SimError::NonFiniteParameter`] when any value is
    /// NaN or infinite.
    pub fn validate(&self) -> Result<(), SimError> {
        let named = [
            ("gamma", self.gamma),
            ("mu", self.mu),
            ("d", self.d),
            ("eta", self.eta),
            ("beta_par", self.beta_par),
            ("rho", self.rho),
            ("S_0", self.s_0),
            ("I_0", self.i_0),
            ("R_0", self.r_0),
            ("N_0", self.n_0),
            ("p", self.p),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(SimError::NonFiniteParameter { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(SimError::InvalidReportingRate { value: self.rho });
        }
        for (name, value) in [
            ("S_0", self.s_0),
            ("I_0", self.i_0),
            ("R_0", self.r_0),
            ("N_0", self.n_0),
        ] {
            if value < 0.0 {
                return Err(SimError::NegativeParameter { name, value });
            }
        }
        Ok(())
    }

    /// Combines base parameters with interpolated covariate offsets.
    pub(crate) fn effective(&self, c: &Covariates) -> EffectiveRates {
        EffectiveRates {
            gamma: self.gamma + c.gamma_t,
            mu: self.mu + c.mu_t,
            d: self.d + c.d_t,
            eta: self.eta + c.eta_t,
            beta: self.beta_par + c.beta_par_t,
            p: self.p + c.p_t,
        }
    }
}

impl Default for Params {
    /// Defaults describe a closed SIS-style population of 100 000 with no
    /// infectious seed: `gamma = 24`, `mu = d = 1/70`, `eta = 1e-5`,
    /// `beta_par = 1e-4`, `rho = 0.1`, `S_0 = 1`, `I_0 = R_0 = 0`,
    /// `N_0 = 1e5`, `p = 0`.
    fn default() -> Self {
        Self {
            gamma: 24.0,
            mu: 1.0 / 70.0,
            d: 1.0 / 70.0,
            eta: 1e-5,
            beta_par: 1e-4,
            rho: 0.1,
            s_0: 1.0,
            i_0: 0.0,
            r_0: 0.0,
            n_0: 1e5,
            p: 0.0,
        }
    }
}

/// Covariate-adjusted rate parameters, recomputed at every rate evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EffectiveRates {
    pub gamma: f64,
    pub mu: f64,
    pub d: f64,
    pub eta: f64,
    pub beta: f64,
    pub p: f64,
}
