//! Conversion from TOML configuration to validated library configs.

use anyhow::{Result, bail};

use sirgen_covar::{CovariateTable, Covariates};
use sirgen_sim::{Params, ProcessModel, SimConfig, Transmission};

use crate::config::{CovarToml, ParamsToml, SirgenConfig, TimesToml};

/// Builds a full simulator config from the parsed TOML file.
pub fn build_sim_config(config: &SirgenConfig) -> Result<SimConfig> {
    let process = parse_process(&config.model.process)?;
    let transmission = parse_transmission(&config.model.transmission)?;
    let params = build_params(&config.params);
    let times = build_times(&config.times)?;
    let t0 = config.times.t0.unwrap_or(times[0]);
    let t_end = *times.last().expect("build_times returns non-empty");
    let covar = build_covar(&config.covar, t0, t_end)?;

    Ok(SimConfig {
        process,
        transmission,
        params,
        t0,
        times,
        covar,
        max_events: config.max_events,
    })
}

fn parse_process(s: &str) -> Result<ProcessModel> {
    match s.to_ascii_uppercase().as_str() {
        "SIR" => Ok(ProcessModel::Sir),
        "SIS" => Ok(ProcessModel::Sis),
        _ => bail!("unknown process model {s:?}: expected \"SIR\" or \"SIS\""),
    }
}

fn parse_transmission(s: &str) -> Result<Transmission> {
    match s.to_ascii_lowercase().as_str() {
        "density-dependent" | "density" => Ok(Transmission::DensityDependent),
        "frequency-dependent" | "frequency" => Ok(Transmission::FrequencyDependent),
        _ => bail!(
            "unknown transmission form {s:?}: expected \"density-dependent\" or \"frequency-dependent\""
        ),
    }
}

fn build_params(toml: &ParamsToml) -> Params {
    let d = Params::default();
    Params {
        gamma: toml.gamma.unwrap_or(d.gamma),
        mu: toml.mu.unwrap_or(d.mu),
        d: toml.d.unwrap_or(d.d),
        eta: toml.eta.unwrap_or(d.eta),
        beta_par: toml.beta_par.unwrap_or(d.beta_par),
        rho: toml.rho.unwrap_or(d.rho),
        s_0: toml.s_0.unwrap_or(d.s_0),
        i_0: toml.i_0.unwrap_or(d.i_0),
        r_0: toml.r_0.unwrap_or(d.r_0),
        n_0: toml.n_0.unwrap_or(d.n_0),
        p: toml.p.unwrap_or(d.p),
    }
}

fn build_times(toml: &TimesToml) -> Result<Vec<f64>> {
    if let Some(values) = &toml.values {
        if values.is_empty() {
            bail!("[times].values must not be empty");
        }
        return Ok(values.clone());
    }
    let (Some(start), Some(end), Some(step)) = (toml.start, toml.end, toml.step) else {
        bail!("[times] needs either `values` or all of `start`, `end`, `step`");
    };
    if !(step > 0.0 && step.is_finite()) {
        bail!("[times].step must be positive and finite, got {step}");
    }
    if end < start {
        bail!("[times].end {end} must be >= start {start}");
    }
    let n = ((end - start) / step).floor() as usize;
    // Multiply rather than accumulate so long grids do not drift.
    Ok((0..=n).map(|k| start + k as f64 * step).collect())
}

fn build_covar(toml: &CovarToml, t0: f64, t_end: f64) -> Result<CovariateTable> {
    let table = match &toml.rows {
        Some(rows) => {
            let times = rows.iter().map(|r| r.time).collect();
            let values = rows
                .iter()
                .map(|r| Covariates {
                    gamma_t: r.gamma_t,
                    mu_t: r.mu_t,
                    d_t: r.d_t,
                    eta_t: r.eta_t,
                    beta_par_t: r.beta_par_t,
                    p_t: r.p_t,
                })
                .collect();
            CovariateTable::new(times, values)?
        }
        None => CovariateTable::flat(t0, t_end.max(t0 + 1.0), Covariates::ZERO)?,
    };
    Ok(table)
}
