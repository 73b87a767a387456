//! `ReportObserver<W>` — bridges `bunch_sim::SimObserver` to a `ReportWriter`
//! and tallies bunching episodes along the way.

use bunch_core::{BusId, StopId};
use bunch_sim::SimObserver;

use crate::row::HeadwaySampleRow;
use crate::writer::ReportWriter;
use crate::ReportError;

/// A [`SimObserver`] that writes every headway-deviation sample to a
/// [`ReportWriter`] backend and counts bunching episodes as they complete.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value. After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer: W,
    bunching_sets: u64,
    bunching_clears: u64,
    last_error: Option<ReportError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        ReportObserver { writer, bunching_sets: 0, bunching_clears: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<ReportError> {
        self.last_error.take()
    }

    /// Number of times the bunching flag was set, across all buses.
    pub fn bunching_episodes_started(&self) -> u64 {
        self.bunching_sets
    }

    /// Number of times the bunching flag cleared (recovered) after having
    /// been set — a completed set-then-clear cycle.
    pub fn bunching_episodes_recovered(&self) -> u64 {
        self.bunching_clears
    }

    /// Unwrap the inner writer (e.g. to inspect the file after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::ReportResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> SimObserver for ReportObserver<W> {
    fn on_headway_sample(&mut self, stop: StopId, bus: BusId, relative_deviation_sq: f64) {
        let row = HeadwaySampleRow { stop_id: stop, bus_id: bus, relative_deviation_sq };
        let result = self.writer.write_sample(&row);
        self.store_err(result);
    }

    fn on_bunching_change(&mut self, _bus: BusId, _stop: StopId, bunching: bool) {
        if bunching {
            self.bunching_sets += 1;
        } else {
            self.bunching_clears += 1;
        }
    }

    fn on_run_end(&mut self, events_processed: u64) {
        log::info!(
            "run complete: {events_processed} events, {} bunching episodes recovered",
            self.bunching_clears
        );
        let result = self.writer.finish();
        self.store_err(result);
    }
}
