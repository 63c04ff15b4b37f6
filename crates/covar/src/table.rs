//! Covariate rows and the interpolating table.

use crate::error::CovarError;

/// One additive offset per time-varying rate parameter.
///
/// Offsets are added to the corresponding base parameter (e.g. the
/// effective transmission rate is `beta_par + beta_par_t`) before rates
/// are evaluated. All-zero covariates leave the base parameters unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Covariates {
    /// Offset on the recovery rate `gamma`.
    pub gamma_t: f64,
    /// Offset on the birth rate `mu`.
    pub mu_t: f64,
    /// Offset on the death rate `d`.
    pub d_t: f64,
    /// Offset on the excess infectious mortality `eta`.
    pub eta_t: f64,
    /// Offset on the transmission rate `beta_par`.
    pub beta_par_t: f64,
    /// Offset on the vaccination rate `p`.
    pub p_t: f64,
}

impl Covariates {
    /// All offsets zero; base parameters apply unmodified.
    pub const ZERO: Self = Self {
        gamma_t: 0.0,
        mu_t: 0.0,
        d_t: 0.0,
        eta_t: 0.0,
        beta_par_t: 0.0,
        p_t: 0.0,
    };

    /// Returns true if every offset is finite.
    pub fn is_finite(&self) -> bool {
        self.gamma_t.is_finite()
            && self.mu_t.is_finite()
            && self.d_t.is_finite()
            && self.eta_t.is_finite()
            && self.beta_par_t.is_finite()
            && self.p_t.is_finite()
    }

    /// Linear interpolation between two rows with weight `w` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, w: f64) -> Self {
        let f = |x: f64, y: f64| x + (y - x) * w;
        Self {
            gamma_t: f(a.gamma_t, b.gamma_t),
            mu_t: f(a.mu_t, b.mu_t),
            d_t: f(a.d_t, b.d_t),
            eta_t: f(a.eta_t, b.eta_t),
            beta_par_t: f(a.beta_par_t, b.beta_par_t),
            p_t: f(a.p_t, b.p_t),
        }
    }
}

/// An ordered table of time-stamped covariate rows.
///
/// Times are strictly increasing and span the simulation horizon. Lookup is
/// by binary search, so a query costs `O(log n)`; repeated queries at the
/// same time are bit-reproducible.
///
/// # Out-of-range queries
///
/// Queries below the first time stamp return the first row unchanged, and
/// queries above the last time stamp return the last row unchanged (clamp
/// policy). The simulation engine validates at construction that its
/// horizon is covered, so clamping only matters for callers probing the
/// table directly.
#[derive(Debug, Clone)]
pub struct CovariateTable {
    times: Vec<f64>,
    rows: Vec<Covariates>,
}

impl CovariateTable {
    /// Constructs a table from parallel time and row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`CovarError`] if the table is empty, the vectors differ in
    /// length, any value is non-finite, or times are not strictly
    /// increasing.
    pub fn new(times: Vec<f64>, rows: Vec<Covariates>) -> Result<Self, CovarError> {
        if times.is_empty() {
            return Err(CovarError::EmptyTable);
        }
        if times.len() != rows.len() {
            return Err(CovarError::LengthMismatch {
                times_len: times.len(),
                rows_len: rows.len(),
            });
        }
        for (i, (&t, row)) in times.iter().zip(rows.iter()).enumerate() {
            if !t.is_finite() || !row.is_finite() {
                return Err(CovarError::NonFiniteValue { index: i });
            }
            if i > 0 && times[i - 1] >= t {
                return Err(CovarError::NonMonotonicTime {
                    index: i,
                    prev: times[i - 1],
                    next: t,
                });
            }
        }
        Ok(Self { times, rows })
    }

    /// Constructs a constant two-row table spanning `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`CovarError::InvalidRange`] if `start >= end`, or a
    /// constructor error if `row` contains non-finite values.
    pub fn flat(start: f64, end: f64, row: Covariates) -> Result<Self, CovarError> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(CovarError::InvalidRange { start, end });
        }
        Self::new(vec![start, end], vec![row, row])
    }

    /// Interpolates covariate offsets at time `t`.
    ///
    /// Linear interpolation between the bracketing rows; clamped to the
    /// boundary row outside the table's time range.
    pub fn interpolate(&self, t: f64) -> Covariates {
        // Index of the first row with time > t.
        let idx = self.times.partition_point(|&x| x <= t);
        if idx == 0 {
            return self.rows[0];
        }
        if idx == self.times.len() {
            return self.rows[idx - 1];
        }
        let (t0, t1) = (self.times[idx - 1], self.times[idx]);
        let w = (t - t0) / (t1 - t0);
        Covariates::lerp(&self.rows[idx - 1], &self.rows[idx], w)
    }

    /// First time stamp in the table.
    pub fn start(&self) -> f64 {
        self.times[0]
    }

    /// Last time stamp in the table.
    pub fn end(&self) -> f64 {
        *self.times.last().expect("table is non-empty by construction")
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: empty tables are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(beta: f64) -> Covariates {
        Covariates {
            beta_par_t: beta,
            ..Covariates::ZERO
        }
    }

    #[test]
    fn empty_table_rejected() {
        let result = CovariateTable::new(vec![], vec![]);
        assert!(matches!(result, Err(CovarError::EmptyTable)));
    }

    #[test]
    fn length_mismatch_rejected() {
        let result = CovariateTable::new(vec![0.0, 1.0], vec![row(0.0)]);
        assert!(matches!(
            result,
            Err(CovarError::LengthMismatch {
                times_len: 2,
                rows_len: 1
            })
        ));
    }

    #[test]
    fn non_monotonic_rejected() {
        let result =
            CovariateTable::new(vec![0.0, 2.0, 2.0], vec![row(0.0), row(1.0), row(2.0)]);
        assert!(matches!(
            result,
            Err(CovarError::NonMonotonicTime { index: 2, .. })
        ));
    }

    #[test]
    fn non_finite_rejected() {
        let result = CovariateTable::new(vec![0.0, f64::NAN], vec![row(0.0), row(1.0)]);
        assert!(matches!(result, Err(CovarError::NonFiniteValue { index: 1 })));

        let result = CovariateTable::new(vec![0.0, 1.0], vec![row(0.0), row(f64::INFINITY)]);
        assert!(matches!(result, Err(CovarError::NonFiniteValue { index: 1 })));
    }

    #[test]
    fn exact_row_hit() {
        let table =
            CovariateTable::new(vec![0.0, 1.0, 2.0], vec![row(0.0), row(10.0), row(20.0)])
                .unwrap();
        assert_eq!(table.interpolate(1.0).beta_par_t, 10.0);
        assert_eq!(table.interpolate(0.0).beta_par_t, 0.0);
        assert_eq!(table.interpolate(2.0).beta_par_t, 20.0);
    }

    #[test]
    fn midpoint_interpolation() {
        let table = CovariateTable::new(vec![0.0, 2.0], vec![row(0.0), row(10.0)]).unwrap();
        let c = table.interpolate(1.0);
        assert!((c.beta_par_t - 5.0).abs() < 1e-12);
    }

    #[test]
    fn all_fields_interpolated() {
        let a = Covariates {
            gamma_t: 0.0,
            mu_t: 2.0,
            d_t: 4.0,
            eta_t: 6.0,
            beta_par_t: 8.0,
            p_t: 10.0,
        };
        let b = Covariates {
            gamma_t: 1.0,
            mu_t: 3.0,
            d_t: 5.0,
            eta_t: 7.0,
            beta_par_t: 9.0,
            p_t: 11.0,
        };
        let table = CovariateTable::new(vec![0.0, 1.0], vec![a, b]).unwrap();
        let c = table.interpolate(0.5);
        assert!((c.gamma_t - 0.5).abs() < 1e-12);
        assert!((c.mu_t - 2.5).abs() < 1e-12);
        assert!((c.d_t - 4.5).abs() < 1e-12);
        assert!((c.eta_t - 6.5).abs() < 1e-12);
        assert!((c.beta_par_t - 8.5).abs() < 1e-12);
        assert!((c.p_t - 10.5).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_range() {
        let table = CovariateTable::new(vec![1.0, 2.0], vec![row(5.0), row(7.0)]).unwrap();
        assert_eq!(table.interpolate(0.0).beta_par_t, 5.0);
        assert_eq!(table.interpolate(100.0).beta_par_t, 7.0);
    }

    #[test]
    fn repeated_queries_bit_identical() {
        let table = CovariateTable::new(vec![0.0, 3.0], vec![row(1.0), row(2.0)]).unwrap();
        let a = table.interpolate(1.234_567);
        let b = table.interpolate(1.234_567);
        assert_eq!(a.beta_par_t.to_bits(), b.beta_par_t.to_bits());
    }

    #[test]
    fn flat_table() {
        let table = CovariateTable::flat(0.0, 1e6, row(3.0)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.start(), 0.0);
        assert_eq!(table.end(), 1e6);
        assert_eq!(table.interpolate(12_345.0).beta_par_t, 3.0);
    }

    #[test]
    fn flat_table_bad_range() {
        assert!(matches!(
            CovariateTable::flat(1.0, 1.0, Covariates::ZERO),
            Err(CovarError::InvalidRange { .. })
        ));
        assert!(matches!(
            CovariateTable::flat(2.0, 1.0, Covariates::ZERO),
            Err(CovarError::InvalidRange { .. })
        ));
    }

    #[test]
    fn single_row_table_clamps_everywhere() {
        let table = CovariateTable::new(vec![5.0], vec![row(9.0)]).unwrap();
        assert_eq!(table.interpolate(0.0).beta_par_t, 9.0);
        assert_eq!(table.interpolate(5.0).beta_par_t, 9.0);
        assert_eq!(table.interpolate(10.0).beta_par_t, 9.0);
    }
}
