//! Error types for the sirgen-sim crate.

use crate::template::EventKind;
use sirgen_covar::CovarError;

/// Error type for all fallible operations in the sirgen-sim crate.
///
/// Variants fall into three groups: validation errors raised when a
/// simulator or parameter set is constructed, model errors raised while a
/// run is in progress (the partial trajectory is discarded), and the
/// event-budget error raised when the optional runaway guard trips.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimError {
    /// Returned when the reporting probability is outside `[0, 1]`.
    #[error("reporting probability rho must be in [0, 1], got {value}")]
    InvalidReportingRate {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a parameter that must be non-negative is negative.
    #[error("parameter {name} must be non-negative, got {value}")]
    NegativeParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a parameter is NaN or infinite.
    #[error("parameter {name} must be finite, got {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Returned when every initial-condition fraction is zero.
    #[error("initial fractions sum to zero: at least one of S_0, I_0, R_0 must be positive")]
    ZeroInitialFractions,

    /// Returned when no sample times are supplied.
    #[error("no sample times supplied")]
    EmptyTimes,

    /// Returned when sample times are not strictly increasing or not finite.
    #[error("sample times invalid at index {index}: times must be finite and strictly increasing")]
    InvalidTimes {
        /// Index of the offending sample time.
        index: usize,
    },

    /// Returned when the start time lies after the first sample time.
    #[error("start time t0 = {t0} must be <= first sample time {first}")]
    StartAfterFirstSample {
        /// Simulation start time.
        t0: f64,
        /// First requested sample time.
        first: f64,
    },

    /// Returned when the covariate table does not span the simulation horizon.
    #[error(
        "covariate table [{table_start}, {table_end}] does not cover horizon [{t0}, {t_end}]"
    )]
    CovariateCoverage {
        /// Simulation start time.
        t0: f64,
        /// Last requested sample time.
        t_end: f64,
        /// First covariate time stamp.
        table_start: f64,
        /// Last covariate time stamp.
        table_end: f64,
    },

    /// Returned when a computed event rate is negative or NaN.
    ///
    /// This is a model/configuration defect (e.g. a covariate drives an
    /// effective rate parameter negative); the run aborts and the partial
    /// trajectory is discarded.
    #[error("invalid rate for {event:?} at t = {time}: {rate}")]
    InvalidRate {
        /// Event whose rate was invalid.
        event: EventKind,
        /// Simulation time at which the rate was evaluated.
        time: f64,
        /// The offending rate value.
        rate: f64,
    },

    /// Returned when applying an event delta would drive a compartment
    /// below zero. Rates are designed to vanish on empty compartments, so
    /// this indicates a template defect rather than bad user input.
    #[error("event {event:?} at t = {time} would drive a compartment below zero")]
    CompartmentUnderflow {
        /// Event whose delta underflowed.
        event: EventKind,
        /// Simulation time of the event.
        time: f64,
    },

    /// Returned when the optional event-count safeguard is exceeded.
    #[error("event budget exceeded: more than {max_events} events in one run")]
    EventBudgetExceeded {
        /// The configured budget.
        max_events: u64,
    },

    /// A covariate table error.
    #[error(transparent)]
    Covar(#[from] CovarError),
}
