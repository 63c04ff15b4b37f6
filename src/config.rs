use std::path::PathBuf;

use serde::Deserialize;

/// Top-level sirgen configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SirgenConfig {
    /// Base RNG seed; replicate r runs with `seed + r`.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of Monte Carlo replicates.
    #[serde(default = "default_replicates")]
    pub replicates: u32,

    /// Optional cap on events per run.
    #[serde(default)]
    pub max_events: Option<u64>,

    /// Output CSV path.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Model template selection.
    pub model: ModelToml,

    /// Base parameters.
    #[serde(default)]
    pub params: ParamsToml,

    /// Sample time specification.
    pub times: TimesToml,

    /// Covariate table; flat zeros over the horizon when omitted.
    #[serde(default)]
    pub covar: CovarToml,
}

fn default_replicates() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// "SIR" or "SIS".
    pub process: String,
    /// "density-dependent" or "frequency-dependent".
    pub transmission: String,
}

/// Base parameters; defaults match [`sirgen_sim::Params::default`].
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ParamsToml {
    pub gamma: Option<f64>,
    pub mu: Option<f64>,
    pub d: Option<f64>,
    pub eta: Option<f64>,
    pub beta_par: Option<f64>,
    pub rho: Option<f64>,
    #[serde(rename = "S_0")]
    pub s_0: Option<f64>,
    #[serde(rename = "I_0")]
    pub i_0: Option<f64>,
    #[serde(rename = "R_0")]
    pub r_0: Option<f64>,
    #[serde(rename = "N_0")]
    pub n_0: Option<f64>,
    pub p: Option<f64>,
}

/// Sample times: either an explicit list or a start/end/step grid.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimesToml {
    /// Simulation start time; defaults to the first sample time.
    #[serde(default)]
    pub t0: Option<f64>,
    /// Explicit sample times (overrides start/end/step).
    #[serde(default)]
    pub values: Option<Vec<f64>>,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CovarToml {
    /// Explicit covariate rows, sorted by time.
    #[serde(default)]
    pub rows: Option<Vec<CovarRowToml>>,
}

/// One covariate row; omitted offsets default to zero.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CovarRowToml {
    pub time: f64,
    #[serde(default)]
    pub gamma_t: f64,
    #[serde(default)]
    pub mu_t: f64,
    #[serde(default)]
    pub d_t: f64,
    #[serde(default)]
    pub eta_t: f64,
    #[serde(default)]
    pub beta_par_t: f64,
    #[serde(default)]
    pub p_t: f64,
}
