//! Error types for the sirgen-covar crate.

/// Error type for all fallible operations in the sirgen-covar crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CovarError {
    /// Returned when a table is constructed with no rows.
    #[error("covariate table is empty")]
    EmptyTable,

    /// Returned when times and rows differ in length.
    #[error("length mismatch: {times_len} times but {rows_len} rows")]
    LengthMismatch {
        /// Number of time stamps.
        times_len: usize,
        /// Number of covariate rows.
        rows_len: usize,
    },

    /// Returned when times are not strictly increasing.
    #[error("times not strictly increasing at index {index}: {prev} >= {next}")]
    NonMonotonicTime {
        /// Index of the offending time stamp.
        index: usize,
        /// Time at `index - 1`.
        prev: f64,
        /// Time at `index`.
        next: f64,
    },

    /// Returned when a time stamp or covariate value is NaN or infinite.
    #[error("non-finite value in covariate table at row {index}")]
    NonFiniteValue {
        /// Index of the offending row.
        index: usize,
    },

    /// Returned when a flat table is requested over an empty or inverted range.
    #[error("invalid flat table range: start {start} must be < end {end}")]
    InvalidRange {
        /// Requested range start.
        start: f64,
        /// Requested range end.
        end: f64,
    },
}
