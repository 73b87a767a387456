//! Fluent builder for constructing a [`Simulator`].

use bunch_core::{BusId, PeakSchedule, PeakWindow, Seconds, SimRng};
use bunch_route::{Fleet, Route, RouteElement};

use crate::event::{Event, EventKind};
use crate::queue::EventQueue;
use crate::sim::{SchemeParams, Simulator};
use crate::{SimError, SimResult};

/// Fluent builder for [`Simulator`].
///
/// # Required inputs (constructor arguments)
///
/// - [`Route`] — stops and signals, already mileage-ordered
/// - [`Fleet`] — the buses
/// - The `(departure time, bus)` pairs produced by
///   `bunch_schedule::seed_fleet`, one per bus — each becomes that bus's
///   first `ArriveStop` event at the route's first stop
/// - [`SchemeParams`] — the bunching-control velocity and threshold bounds
/// - `seed` — the run's deterministic RNG seed
///
/// # Optional inputs (have defaults)
///
/// | Method     | Default                                    |
/// |------------|---------------------------------------------|
/// | `.peaks()` | a schedule whose peak windows never match   |
pub struct SimBuilder {
    route: Route,
    fleet: Fleet,
    initial_arrivals: Vec<(Seconds, BusId)>,
    scheme: SchemeParams,
    seed: u64,
    peaks: Option<PeakSchedule>,
}

impl SimBuilder {
    pub fn new(
        route: Route,
        fleet: Fleet,
        initial_arrivals: Vec<(Seconds, BusId)>,
        scheme: SchemeParams,
        seed: u64,
    ) -> Self {
        SimBuilder { route, fleet, initial_arrivals, scheme, seed, peaks: None }
    }

    /// Supply the morning/evening peak windows used to pick rate buckets.
    ///
    /// If not called, every moment is treated as off-peak.
    pub fn peaks(mut self, peaks: PeakSchedule) -> Self {
        self.peaks = Some(peaks);
        self
    }

    /// Validate inputs and build a ready-to-run [`Simulator`], seeded with
    /// the first `ArriveStop` event for every bus.
    pub fn build(self) -> SimResult<Simulator> {
        if self.initial_arrivals.len() != self.fleet.len() {
            return Err(SimError::Config(format!(
                "expected {} initial arrivals, got {}",
                self.fleet.len(),
                self.initial_arrivals.len()
            )));
        }

        let first_stop = self
            .route
            .elements()
            .iter()
            .find_map(|e| match e {
                RouteElement::Stop(s) => Some(s.id),
                RouteElement::Signal(_) => None,
            })
            .ok_or_else(|| SimError::Config("route has no stops".into()))?;

        let mut queue = EventQueue::new();
        for (time, bus) in self.initial_arrivals {
            queue.push(Event::new(time, bus, EventKind::ArriveStop(first_stop), true));
        }

        let never = PeakWindow { start: Seconds::ZERO, end: Seconds::ZERO };
        let peaks = self.peaks.unwrap_or(PeakSchedule { morning: never, evening: never });

        Ok(Simulator::new(self.route, self.fleet, queue, SimRng::new(self.seed), peaks, self.scheme))
    }
}
