//! Gillespie direct-method simulation engine.

use rand::Rng;
use tracing::{debug, trace};

use sirgen_covar::CovariateTable;

use crate::error::SimError;
use crate::init::initialize;
use crate::observe::observe;
use crate::params::Params;
use crate::rates::rates;
use crate::template::{ModelTemplate, ProcessModel, Transmission};
use crate::trajectory::{Record, Trajectory};

/// Construction-time configuration for a [`Simulator`].
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Process model variant.
    pub process: ProcessModel,
    /// Transmission form.
    pub transmission: Transmission,
    /// Default base parameters.
    pub params: Params,
    /// Simulation start time; must be `<=` the first sample time.
    pub t0: f64,
    /// Requested sample times, strictly increasing.
    pub times: Vec<f64>,
    /// Covariate table; must span `[t0, last sample time]`.
    pub covar: CovariateTable,
    /// Optional safeguard against runaway event rates.
    pub max_events: Option<u64>,
}

/// Per-run overrides for [`Simulator::run_with`].
///
/// Either field left as `None` falls back to the construction-time default;
/// the stored defaults are never mutated.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Replacement parameter set for this run.
    pub params: Option<Params>,
    /// Replacement sample times for this run.
    pub times: Option<Vec<f64>>,
}

/// An exact continuous-time Markov jump simulator for SIR/SIS epidemics.
///
/// Construction resolves the model template and validates every input;
/// [`run`](Self::run) then executes Gillespie's direct method: draw an
/// exponential waiting time from the total rate, pick the event by a
/// cumulative-sum draw, apply its delta, and record state at each requested
/// sample time.
///
/// A `Simulator` is immutable after construction, so independent Monte
/// Carlo replicates may share it across threads, each with its own seeded
/// random source.
#[derive(Debug, Clone)]
pub struct Simulator {
    template: ModelTemplate,
    params: Params,
    t0: f64,
    times: Vec<f64>,
    covar: CovariateTable,
    max_events: Option<u64>,
}

impl Simulator {
    /// Validates a configuration and resolves its model template.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the parameter set is invalid, the
    /// sample times are empty, non-finite, or not strictly increasing,
    /// `t0` lies after the first sample time, or the covariate table does
    /// not cover `[t0, last sample time]`.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.params.validate()?;
        validate_times(&config.times)?;
        if !config.t0.is_finite() || config.t0 > config.times[0] {
            return Err(SimError::StartAfterFirstSample {
                t0: config.t0,
                first: config.times[0],
            });
        }
        let t_end = *config.times.last().expect("times validated non-empty");
        validate_coverage(&config.covar, config.t0, t_end)?;

        Ok(Self {
            template: ModelTemplate::new(config.process, config.transmission),
            params: config.params,
            t0: config.t0,
            times: config.times,
            covar: config.covar,
            max_events: config.max_events,
        })
    }

    /// Default base parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Default sample times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Simulation start time.
    pub fn t0(&self) -> f64 {
        self.t0
    }

    /// The resolved model template.
    pub fn template(&self) -> &ModelTemplate {
        &self.template
    }

    /// Runs one simulation with the construction-time defaults.
    ///
    /// # Errors
    ///
    /// Returns a model error if a rate evaluates negative or NaN, or the
    /// event-budget error if `max_events` is exceeded. On error the partial
    /// trajectory is discarded.
    pub fn run(&self, rng: &mut impl Rng) -> Result<Trajectory, SimError> {
        self.run_with(&RunOverrides::default(), rng)
    }

    /// Runs one simulation, substituting any supplied overrides.
    ///
    /// Overridden parameters and times are validated exactly like their
    /// construction-time counterparts.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus validation errors for the overrides.
    pub fn run_with(
        &self,
        overrides: &RunOverrides,
        rng: &mut impl Rng,
    ) -> Result<Trajectory, SimError> {
        let params = match overrides.params {
            Some(p) => {
                p.validate()?;
                p
            }
            None => self.params,
        };
        let times: &[f64] = match &overrides.times {
            Some(t) => {
                validate_times(t)?;
                if self.t0 > t[0] {
                    return Err(SimError::StartAfterFirstSample {
                        t0: self.t0,
                        first: t[0],
                    });
                }
                let t_end = *t.last().expect("times validated non-empty");
                validate_coverage(&self.covar, self.t0, t_end)?;
                t
            }
            None => &self.times,
        };

        self.simulate(&params, times, rng)
    }

    /// The Gillespie direct-method loop.
    fn simulate(
        &self,
        params: &Params,
        times: &[f64],
        rng: &mut impl Rng,
    ) -> Result<Trajectory, SimError> {
        let mut state = initialize(params, self.template.process())?;
        let mut t = self.t0;
        let mut n_events: u64 = 0;
        let mut records = Vec::with_capacity(times.len());
        let show_r = self.template.process() == ProcessModel::Sir;

        debug!(
            t0 = self.t0,
            n_samples = times.len(),
            s = state.s,
            i = state.i,
            r = state.r,
            n = state.n,
            "starting simulation"
        );

        let mut next_sample = 0;
        while next_sample < times.len() {
            let covariates = self.covar.interpolate(t);
            let rate_vec = rates(&self.template, &state, params, &covariates);

            let mut total = 0.0;
            for (event, &rate) in self.template.events().iter().zip(rate_vec.iter()) {
                if rate.is_nan() || rate < 0.0 {
                    return Err(SimError::InvalidRate {
                        event: event.kind,
                        time: t,
                        rate,
                    });
                }
                total += rate;
            }

            // No event can ever fire again: the state is frozen, so every
            // remaining sample observes it as-is.
            if total <= 0.0 {
                trace!(t, "total rate zero, freezing state");
                for &sample_t in &times[next_sample..] {
                    records.push(sample_record(sample_t, &state, params.rho, show_r, rng));
                    state.cases = 0;
                }
                break;
            }

            // Exponential waiting time; 1 - u keeps the draw in (0, 1].
            let u: f64 = rng.random();
            let dt = -(1.0 - u).ln() / total;

            // Sample-first tie-break: an event landing exactly on a sample
            // time is applied after the sample is observed.
            if t + dt >= times[next_sample] {
                let sample_t = times[next_sample];
                records.push(sample_record(sample_t, &state, params.rho, show_r, rng));
                state.cases = 0;
                // Advance the clock to the sample time (exact for the
                // memoryless waiting time) so covariates are interpolated
                // there on the next iteration; the pending event is
                // redrawn, never applied early.
                t = sample_t;
                next_sample += 1;
                continue;
            }

            t += dt;

            // Cumulative-sum event selection against total * u2.
            let target = total * rng.random::<f64>();
            let mut cumulative = 0.0;
            let mut chosen = self.template.events().len() - 1;
            for (k, &rate) in rate_vec.iter().enumerate() {
                cumulative += rate;
                if cumulative >= target {
                    chosen = k;
                    break;
                }
            }
            let event = &self.template.events()[chosen];
            state.apply(&event.delta, event.kind, t)?;

            n_events += 1;
            if let Some(max) = self.max_events
                && n_events > max
            {
                return Err(SimError::EventBudgetExceeded { max_events: max });
            }
        }

        debug!(n_events, n_samples = records.len(), "simulation complete");
        Ok(Trajectory::new(records))
    }
}

/// Records one sample: observe the case accumulator, then report the state.
fn sample_record(
    time: f64,
    state: &crate::state::State,
    rho: f64,
    show_r: bool,
    rng: &mut impl Rng,
) -> Record {
    let report = observe(state.cases, rho, rng);
    Record {
        time,
        s: state.s,
        i: state.i,
        r: show_r.then_some(state.r),
        n: state.n,
        cases: state.cases,
        report,
    }
}

fn validate_times(times: &[f64]) -> Result<(), SimError> {
    if times.is_empty() {
        return Err(SimError::EmptyTimes);
    }
    for (i, &t) in times.iter().enumerate() {
        if !t.is_finite() || (i > 0 && times[i - 1] >= t) {
            return Err(SimError::InvalidTimes { index: i });
        }
    }
    Ok(())
}

fn validate_coverage(covar: &CovariateTable, t0: f64, t_end: f64) -> Result<(), SimError> {
    if covar.start() > t0 || covar.end() < t_end {
        return Err(SimError::CovariateCoverage {
            t0,
            t_end,
            table_start: covar.start(),
            table_end: covar.end(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sirgen_covar::Covariates;

    fn flat_covar() -> CovariateTable {
        CovariateTable::flat(0.0, 1e6, Covariates::ZERO).unwrap()
    }

    fn config() -> SimConfig {
        SimConfig {
            process: ProcessModel::Sis,
            transmission: Transmission::DensityDependent,
            params: Params::default(),
            t0: 0.0,
            times: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            covar: flat_covar(),
            max_events: None,
        }
    }

    #[test]
    fn construction_validates_times() {
        let mut cfg = config();
        cfg.times = vec![];
        assert!(matches!(Simulator::new(cfg), Err(SimError::EmptyTimes)));

        let mut cfg = config();
        cfg.times = vec![0.0, 2.0, 1.0];
        assert!(matches!(
            Simulator::new(cfg),
            Err(SimError::InvalidTimes { index: 2 })
        ));

        let mut cfg = config();
        cfg.t0 = 0.5;
        assert!(matches!(
            Simulator::new(cfg),
            Err(SimError::StartAfterFirstSample { .. })
        ));
    }

    #[test]
    fn construction_validates_coverage() {
        let mut cfg = config();
        cfg.covar = CovariateTable::flat(0.0, 3.0, Covariates::ZERO).unwrap();
        assert!(matches!(
            Simulator::new(cfg),
            Err(SimError::CovariateCoverage { .. })
        ));

        let mut cfg = config();
        cfg.covar = CovariateTable::flat(1.0, 10.0, Covariates::ZERO).unwrap();
        cfg.t0 = 0.0;
        assert!(matches!(
            Simulator::new(cfg),
            Err(SimError::CovariateCoverage { .. })
        ));
    }

    #[test]
    fn frozen_state_when_all_rates_zero() {
        let mut cfg = config();
        cfg.params = Params {
            gamma: 0.0,
            mu: 0.0,
            d: 0.0,
            eta: 0.0,
            beta_par: 0.0,
            p: 0.0,
            ..Params::default()
        };
        let sim = Simulator::new(cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let traj = sim.run(&mut rng).unwrap();
        assert_eq!(traj.len(), 6);
        for rec in &traj {
            assert_eq!(rec.s, 100_000);
            assert_eq!(rec.i, 0);
            assert_eq!(rec.n, 100_000);
            assert_eq!(rec.cases, 0);
            assert_eq!(rec.report, 0);
            assert_eq!(rec.r, None); // SIS omits R
        }
    }

    #[test]
    fn deterministic_with_seed() {
        let sim = Simulator::new(config()).unwrap();
        let t1 = sim.run(&mut StdRng::seed_from_u64(42)).unwrap();
        let t2 = sim.run(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn different_seeds_differ() {
        // Demographic turnover makes identical trajectories implausible.
        let sim = Simulator::new(config()).unwrap();
        let t1 = sim.run(&mut StdRng::seed_from_u64(1)).unwrap();
        let t2 = sim.run(&mut StdRng::seed_from_u64(9999)).unwrap();
        assert_ne!(t1, t2);
    }

    #[test]
    fn negative_rate_aborts_run() {
        let mut cfg = config();
        cfg.params = Params {
            gamma: -5.0,
            i_0: 1.0,
            ..Params::default()
        };
        let sim = Simulator::new(cfg).unwrap();
        let result = sim.run(&mut StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(SimError::InvalidRate {
                event: crate::template::EventKind::Recovery,
                ..
            })
        ));
    }

    #[test]
    fn event_budget_exceeded() {
        let mut cfg = config();
        cfg.max_events = Some(10);
        let sim = Simulator::new(cfg).unwrap();
        // Demographic events alone (~1400/year) blow a budget of 10.
        let result = sim.run(&mut StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(SimError::EventBudgetExceeded { max_events: 10 })
        ));
    }

    #[test]
    fn overrides_do_not_mutate_defaults() {
        let sim = Simulator::new(config()).unwrap();
        let default_params = *sim.params();
        let default_times = sim.times().to_vec();

        let overrides = RunOverrides {
            params: Some(Params {
                rho: 0.5,
                ..Params::default()
            }),
            times: Some(vec![1.0, 2.0]),
        };
        let traj = sim
            .run_with(&overrides, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(traj.len(), 2);
        assert_eq!(sim.params(), &default_params);
        assert_eq!(sim.times(), default_times.as_slice());
    }

    #[test]
    fn override_params_are_validated() {
        let sim = Simulator::new(config()).unwrap();
        let overrides = RunOverrides {
            params: Some(Params {
                rho: 2.0,
                ..Params::default()
            }),
            times: None,
        };
        assert!(matches!(
            sim.run_with(&overrides, &mut StdRng::seed_from_u64(3)),
            Err(SimError::InvalidReportingRate { .. })
        ));
    }

    #[test]
    fn override_times_are_validated() {
        let sim = Simulator::new(config()).unwrap();
        let overrides = RunOverrides {
            params: None,
            times: Some(vec![5.0, 4.0]),
        };
        assert!(matches!(
            sim.run_with(&overrides, &mut StdRng::seed_from_u64(3)),
            Err(SimError::InvalidTimes { index: 1 })
        ));

        // Times beyond covariate coverage are rejected per run, too.
        let overrides = RunOverrides {
            params: None,
            times: Some(vec![1.0, 2e6]),
        };
        assert!(matches!(
            sim.run_with(&overrides, &mut StdRng::seed_from_u64(3)),
            Err(SimError::CovariateCoverage { .. })
        ));
    }

    #[test]
    fn sir_records_carry_r() {
        let mut cfg = config();
        cfg.process = ProcessModel::Sir;
        let sim = Simulator::new(cfg).unwrap();
        let traj = sim.run(&mut StdRng::seed_from_u64(11)).unwrap();
        assert!(traj.iter().all(|rec| rec.r.is_some()));
    }

    #[test]
    fn one_record_per_sample_time() {
        let sim = Simulator::new(config()).unwrap();
        let traj = sim.run(&mut StdRng::seed_from_u64(13)).unwrap();
        let times: Vec<f64> = traj.iter().map(|rec| rec.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
