//! Time-stamped covariate tables for time-varying epidemic rates.
//!
//! A [`CovariateTable`] holds an ordered sequence of `(time, offsets)` rows.
//! Each row carries one additive offset per time-varying rate parameter;
//! the simulation engine adds the interpolated offset to the corresponding
//! base parameter before evaluating event rates.
//!
//! # Quick start
//!
//! ```rust
//! use sirgen_covar::{Covariates, CovariateTable};
//!
//! // A flat (constant-zero) table spanning the whole simulation horizon.
//! let table = CovariateTable::flat(0.0, 1e6, Covariates::ZERO).unwrap();
//! let c = table.interpolate(42.0);
//! assert_eq!(c.beta_par_t, 0.0);
//! ```

pub mod error;
pub mod table;

pub use error::CovarError;
pub use table::{CovariateTable, Covariates};
