//! Binomial observation model mapping latent cases to reported counts.

use rand::Rng;
use rand_distr::{Binomial, Distribution};

/// Draws a simulated case report from `Binomial(cases, rho)`.
///
/// `rho` must lie in `[0, 1]`; the simulator validates it at construction,
/// so this function does not re-check per call. Deterministic given a
/// seeded random source. The boundary values short-circuit without
/// consuming randomness differently: zero cases or `rho = 0` always report
/// zero, and `rho = 1` reports every case.
pub fn observe(cases: u64, rho: f64, rng: &mut impl Rng) -> u64 {
    if cases == 0 || rho <= 0.0 {
        return 0;
    }
    if rho >= 1.0 {
        return cases;
    }
    // rho is strictly inside (0, 1) here, so construction cannot fail.
    let binomial = Binomial::new(cases, rho).expect("rho validated in (0, 1)");
    binomial.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_cases_reports_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(observe(0, 0.5, &mut rng), 0);
        }
    }

    #[test]
    fn rho_zero_reports_zero() {
        let mut rng = StdRng::seed_from_u64(2);
        for cases in [1, 10, 1000] {
            assert_eq!(observe(cases, 0.0, &mut rng), 0);
        }
    }

    #[test]
    fn rho_one_reports_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        for cases in [1, 10, 1000] {
            assert_eq!(observe(cases, 1.0, &mut rng), cases);
        }
    }

    #[test]
    fn report_never_exceeds_cases() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let report = observe(50, 0.3, &mut rng);
            assert!(report <= 50);
        }
    }

    #[test]
    fn deterministic_with_seed() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let a: Vec<u64> = (0..50).map(|_| observe(100, 0.4, &mut rng1)).collect();
        let b: Vec<u64> = (0..50).map(|_| observe(100, 0.4, &mut rng2)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn mean_is_plausible() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 10_000;
        let total: u64 = (0..n).map(|_| observe(100, 0.3, &mut rng)).sum();
        let mean = total as f64 / n as f64;
        // Binomial(100, 0.3) has mean 30, sd ~4.6; the ensemble mean should
        // be well within one sd.
        assert!((mean - 30.0).abs() < 1.0, "ensemble mean {mean}, expected ~30");
    }
}
