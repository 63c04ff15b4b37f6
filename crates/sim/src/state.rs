//! Integer-valued epidemic state and event deltas.

use crate::error::SimError;
use crate::template::EventKind;

/// The latent epidemic state.
///
/// All compartments are non-negative integers. `n` is the total living
/// population; `r` is carried for both process models but only meaningful
/// under SIR. `cases` is a zeroed accumulator: it counts recoveries since
/// the previous sample and is reset to zero immediately after each sample
/// is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Susceptible individuals.
    pub s: u64,
    /// Infectious individuals.
    pub i: u64,
    /// Recovered/immune individuals (SIR only).
    pub r: u64,
    /// Total living population.
    pub n: u64,
    /// Recoveries accumulated since the last sample.
    pub cases: u64,
}

impl State {
    /// Applies an event delta with checked arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CompartmentUnderflow`] if the delta would drive
    /// any compartment below zero. Rates vanish on empty compartments, so
    /// this only fires on a defective template.
    pub(crate) fn apply(
        &mut self,
        delta: &StateDelta,
        event: EventKind,
        time: f64,
    ) -> Result<(), SimError> {
        let underflow = || SimError::CompartmentUnderflow { event, time };
        self.s = self.s.checked_add_signed(delta.s).ok_or_else(underflow)?;
        self.i = self.i.checked_add_signed(delta.i).ok_or_else(underflow)?;
        self.r = self.r.checked_add_signed(delta.r).ok_or_else(underflow)?;
        self.n = self.n.checked_add_signed(delta.n).ok_or_else(underflow)?;
        self.cases = self
            .cases
            .checked_add_signed(delta.cases)
            .ok_or_else(underflow)?;
        Ok(())
    }
}

/// Signed state change applied when an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDelta {
    /// Change in susceptibles.
    pub s: i64,
    /// Change in infectious.
    pub i: i64,
    /// Change in recovered.
    pub r: i64,
    /// Change in total population.
    pub n: i64,
    /// Change in the case accumulator.
    pub cases: i64,
}

impl StateDelta {
    /// The no-op delta.
    pub const ZERO: Self = Self {
        s: 0,
        i: 0,
        r: 0,
        n: 0,
        cases: 0,
    };
}
