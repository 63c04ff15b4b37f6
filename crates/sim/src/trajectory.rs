//! Sampled trajectory records produced by a simulation run.

/// State observed at one requested sample time.
///
/// `cases` is the number of recoveries accumulated since the previous
/// sample (since `t0` for the first sample); `report` is the binomial
/// thinning of `cases` with probability `rho`. `r` is `None` under SIS,
/// where the recovered compartment does not exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Sample time.
    pub time: f64,
    /// Susceptible count.
    pub s: u64,
    /// Infectious count.
    pub i: u64,
    /// Recovered count (SIR only).
    pub r: Option<u64>,
    /// Total living population.
    pub n: u64,
    /// Cases accumulated since the previous sample.
    pub cases: u64,
    /// Simulated case report.
    pub report: u64,
}

/// The ordered sequence of samples from one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    records: Vec<Record>,
}

impl Trajectory {
    pub(crate) fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The sampled records, in time order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no samples were requested.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the sampled records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64) -> Record {
        Record {
            time,
            s: 10,
            i: 1,
            r: None,
            n: 11,
            cases: 0,
            report: 0,
        }
    }

    #[test]
    fn accessors() {
        let t = Trajectory::new(vec![record(0.0), record(1.0)]);
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
        assert_eq!(t.records()[1].time, 1.0);
        assert_eq!(t.iter().count(), 2);
        assert_eq!((&t).into_iter().count(), 2);
    }
}
