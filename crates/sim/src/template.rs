//! Model template registry: the four SIR/SIS x density/frequency variants.
//!
//! A template is pure configuration data: a fixed, ordered list of seven
//! event definitions, resolved once at simulator construction and shared
//! read-only across runs. No dynamic dispatch happens in the simulation
//! loop.

use crate::state::StateDelta;

/// Compartmental process model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessModel {
    /// Susceptible-Infectious-Recovered: recovery grants lasting immunity.
    Sir,
    /// Susceptible-Infectious-Susceptible: recovery returns to S.
    Sis,
}

/// Functional form of the infection rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
    /// Infection rate proportional to `S * I`.
    DensityDependent,
    /// Infection rate proportional to `S * I / N`.
    FrequencyDependent,
}

/// The seven event types of every template, in firing-rate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Birth of a susceptible.
    Birth,
    /// Transmission from an infectious to a susceptible individual.
    Infection,
    /// Recovery of an infectious individual; increments the case counter.
    Recovery,
    /// Death of a susceptible.
    DeathS,
    /// Death of an infectious individual.
    DeathI,
    /// Death of a recovered individual (rate zero under SIS).
    DeathR,
    /// Vaccination of a susceptible.
    Vaccination,
}

/// Number of event types per template.
pub const N_EVENTS: usize = 7;

/// An immutable event definition: a kind (which selects the rate
/// expression) and the state delta applied when the event fires.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// Which rate expression applies.
    pub kind: EventKind,
    /// State change applied when the event fires.
    pub delta: StateDelta,
}

/// One of the four fixed model templates.
#[derive(Debug, Clone)]
pub struct ModelTemplate {
    process: ProcessModel,
    transmission: Transmission,
    events: [Event; N_EVENTS],
}

impl ModelTemplate {
    /// Resolves the template for a process model and transmission form.
    ///
    /// Event deltas couple compartment and population changes so that
    /// `N - (S + I + R)` is invariant over every event: births and deaths
    /// adjust `N` together with a compartment, transfers leave `N` alone.
    /// Under SIS the recovery delta returns the individual to `S`, the
    /// death-from-R event is inert (there is no R compartment), and
    /// vaccination removes the individual from the modelled population
    /// entirely (there is no immune compartment to hold it).
    pub fn new(process: ProcessModel, transmission: Transmission) -> Self {
        let birth = Event {
            kind: EventKind::Birth,
            delta: StateDelta {
                s: 1,
                n: 1,
                ..StateDelta::ZERO
            },
        };
        let infection = Event {
            kind: EventKind::Infection,
            delta: StateDelta {
                s: -1,
                i: 1,
                ..StateDelta::ZERO
            },
        };
        let recovery = Event {
            kind: EventKind::Recovery,
            delta: match process {
                ProcessModel::Sir => StateDelta {
                    i: -1,
                    r: 1,
                    cases: 1,
                    ..StateDelta::ZERO
                },
                ProcessModel::Sis => StateDelta {
                    i: -1,
                    s: 1,
                    cases: 1,
                    ..StateDelta::ZERO
                },
            },
        };
        let death_s = Event {
            kind: EventKind::DeathS,
            delta: StateDelta {
                s: -1,
                n: -1,
                ..StateDelta::ZERO
            },
        };
        let death_i = Event {
            kind: EventKind::DeathI,
            delta: StateDelta {
                i: -1,
                n: -1,
                ..StateDelta::ZERO
            },
        };
        let death_r = Event {
            kind: EventKind::DeathR,
            delta: match process {
                ProcessModel::Sir => StateDelta {
                    r: -1,
                    n: -1,
                    ..StateDelta::ZERO
                },
                ProcessModel::Sis => StateDelta::ZERO,
            },
        };
        let vaccination = Event {
            kind: EventKind::Vaccination,
            delta: match process {
                ProcessModel::Sir => StateDelta {
                    s: -1,
                    r: 1,
                    ..StateDelta::ZERO
                },
                ProcessModel::Sis => StateDelta {
                    s: -1,
                    n: -1,
                    ..StateDelta::ZERO
                },
            },
        };
        Self {
            process,
            transmission,
            events: [
                birth,
                infection,
                recovery,
                death_s,
                death_i,
                death_r,
                vaccination,
            ],
        }
    }

    /// The process model this template was resolved for.
    pub fn process(&self) -> ProcessModel {
        self.process
    }

    /// The transmission form this template was resolved for.
    pub fn transmission(&self) -> Transmission {
        self.transmission
    }

    /// The ordered event definitions.
    pub fn events(&self) -> &[Event; N_EVENTS] {
        &self.events
    }
}
