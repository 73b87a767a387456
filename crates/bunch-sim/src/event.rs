//! Events: the only thing that crosses time in the simulation.

use std::cmp::Ordering;

use bunch_core::{BusId, Seconds, SignalId, StopId};

/// What kind of event fired, and at which stop or signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    ArriveStop(StopId),
    DepartStop(StopId),
    ArriveSignal(SignalId),
    DepartSignal(SignalId),
}

impl EventKind {
    /// Stable numbering used only to break firing-time ties deterministically.
    fn type_code(self) -> u8 {
        match self {
            EventKind::ArriveStop(_) => 1,
            EventKind::DepartStop(_) => 2,
            EventKind::ArriveSignal(_) => 3,
            EventKind::DepartSignal(_) => 4,
        }
    }
}

/// A single scheduled occurrence. Immutable once created.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub time: Seconds,
    pub bus: BusId,
    pub kind: EventKind,
    /// Carried through unchanged; no handler branches on it.
    pub direction: bool,
}

impl Event {
    pub fn new(time: Seconds, bus: BusId, kind: EventKind, direction: bool) -> Self {
        Event { time, bus, kind, direction }
    }
}

/// Orders by firing time, then by event-type code, then by bus id — a
/// stable, deterministic tie-break for events sharing a timestamp.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.kind.type_code().cmp(&other.kind.type_code()))
            .then_with(|| self.bus.cmp(&other.bus))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
