//! Exact stochastic simulation of SIR/SIS epidemic models.
//!
//! This crate implements Gillespie's direct method for compartmental
//! epidemic models with time-varying rate parameters driven by external
//! covariates, plus a binomial observation model layered on top.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  template     │────▶│  rates         │────▶│    engine        │
//!  │  (registry)   │     │  (propensity)  │     │  (direct method) │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//!          ▲                     ▲                      │
//!     init (t0 state)      covariates (interp)     observe (reports)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use sirgen_covar::{CovariateTable, Covariates};
//! use sirgen_sim::{Params, ProcessModel, SimConfig, Simulator, Transmission};
//!
//! let sim = Simulator::new(SimConfig {
//!     process: ProcessModel::Sis,
//!     transmission: Transmission::DensityDependent,
//!     params: Params::default(),
//!     t0: 0.0,
//!     times: vec![1.0, 2.0, 3.0],
//!     covar: CovariateTable::flat(0.0, 10.0, Covariates::ZERO).unwrap(),
//!     max_events: None,
//! })
//! .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let trajectory = sim.run(&mut rng).unwrap();
//! assert_eq!(trajectory.len(), 3);
//! ```

pub mod engine;
pub mod error;
pub mod init;
pub mod observe;
pub mod params;
pub mod rates;
pub mod state;
pub mod template;
pub mod trajectory;

pub use engine::{RunOverrides, SimConfig, Simulator};
pub use error::SimError;
pub use init::initialize;
pub use observe::observe;
pub use params::Params;
pub use rates::rates;
pub use state::{State, StateDelta};
pub use template::{Event, EventKind, ModelTemplate, N_EVENTS, ProcessModel, Transmission};
pub use trajectory::{Record, Trajectory};
