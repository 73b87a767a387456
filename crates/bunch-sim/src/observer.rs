//! Observer hooks for reporting and tracing, decoupled from the handlers.

use bunch_core::{BusId, StopId};

use crate::event::Event;

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] as the
/// dispatch loop processes events.
///
/// All methods have default no-op implementations, so an implementor only
/// overrides what it cares about.
pub trait SimObserver {
    /// Called immediately after a handler finishes processing `event`.
    fn on_event(&mut self, _event: &Event) {}

    /// Called whenever a headway-deviation sample is recorded at a stop
    /// arrival (i.e. whenever a preceding bus exists in the fleet).
    fn on_headway_sample(&mut self, _stop: StopId, _bus: BusId, _relative_deviation_sq: f64) {}

    /// Called whenever the departure handler's bunching flag transitions
    /// (set, or cleared/recovered). Not called when the flag is unchanged.
    fn on_bunching_change(&mut self, _bus: BusId, _stop: StopId, _bunching: bool) {}

    /// Called once the event queue has drained.
    fn on_run_end(&mut self, _events_processed: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
