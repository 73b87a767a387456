//! The `Simulator` struct and its four event handlers.

use bunch_core::{BusId, PeakSchedule, Seconds, SignalId, SimRng, StopId};
use bunch_route::{Bus, ElementRef, Fleet, Route, RouteElement};

use crate::event::{Event, EventKind};
use crate::observer::SimObserver;
use crate::queue::EventQueue;
use crate::{SimError, SimResult};

/// Tunable parameters the bunching-control scheme needs at every departure.
/// Everything here comes straight out of configuration (`bunch-config`);
/// the simulator itself has no opinion on their values.
#[derive(Copy, Clone, Debug)]
pub struct SchemeParams {
    pub velocity_avg: f64,
    pub velocity_sd: f64,
    pub velocity_limit: f64,
    pub velocity_low: f64,
    pub dwell_cap: f64,
    pub scheme_threshold: f64,
}

/// Owns every entity and drives the event loop. Construct via
/// [`crate::SimBuilder`].
pub struct Simulator {
    pub(crate) route: Route,
    pub(crate) fleet: Fleet,
    pub(crate) queue: EventQueue,
    pub(crate) rng: SimRng,
    pub(crate) peaks: PeakSchedule,
    pub(crate) scheme: SchemeParams,

    pub(crate) headway_dev_sum: f64,
    pub(crate) headway_dev_count: u64,
    events_processed: u64,
}

impl Simulator {
    pub(crate) fn new(
        route: Route,
        fleet: Fleet,
        queue: EventQueue,
        rng: SimRng,
        peaks: PeakSchedule,
        scheme: SchemeParams,
    ) -> Self {
        Simulator {
            route,
            fleet,
            queue,
            rng,
            peaks,
            scheme,
            headway_dev_sum: 0.0,
            headway_dev_count: 0,
            events_processed: 0,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Sum and count of the squared relative headway-deviation samples
    /// recorded so far. `bunch-report` divides these by `fleet.len() - 1`
    /// to produce the run's headway-deviation figure.
    pub fn headway_deviation(&self) -> (f64, u64) {
        (self.headway_dev_sum, self.headway_dev_count)
    }

    /// Run until the event queue drains.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::info!("starting run: {} buses, {} route elements", self.fleet.len(), self.route.len());
        while self.step(observer)? {}
        log::info!("run complete: {} events processed", self.events_processed);
        observer.on_run_end(self.events_processed);
        Ok(())
    }

    /// Process a single event, if any remain. Returns `false` once the
    /// queue is empty. Exposed alongside [`Simulator::run`] so callers
    /// (and tests) can inspect state between events.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        match self.queue.pop() {
            Some(event) => {
                log::trace!("{} bus {} {:?}", event.time, event.bus, event.kind);
                self.dispatch(event, observer)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn dispatch<O: SimObserver>(&mut self, event: Event, observer: &mut O) -> SimResult<()> {
        match event.kind {
            EventKind::ArriveStop(stop_id) => self.handle_arrive_stop(event, stop_id, observer)?,
            EventKind::DepartStop(stop_id) => self.handle_depart_stop(event, stop_id, observer)?,
            EventKind::ArriveSignal(signal_id) => {
                self.handle_arrive_signal(event, signal_id, observer)?
            }
            EventKind::DepartSignal(signal_id) => {
                self.handle_depart_signal(event, signal_id, observer)?
            }
        }
        self.events_processed += 1;
        observer.on_event(&event);
        Ok(())
    }

    /// Push a successor event, asserting the one global timing invariant:
    /// a handler may never schedule something in its own past.
    fn schedule(&mut self, current_time: Seconds, event: Event) -> SimResult<()> {
        if event.time < current_time {
            return Err(SimError::InvariantViolation(format!(
                "successor event at {} precedes firing event at {current_time}",
                event.time
            )));
        }
        self.queue.push(event);
        Ok(())
    }

    // ── §4.4 Stop-Arrival Handler ───────────────────────────────────────

    fn handle_arrive_stop<O: SimObserver>(
        &mut self,
        event: Event,
        stop_id: StopId,
        observer: &mut O,
    ) -> SimResult<()> {
        let t = event.time;
        let bus_id = event.bus;

        // Step 2: select this arrival's board/alight rates. The origin
        // terminal has nothing cached from a preceding departure, so it
        // draws straight from the stop's own time-of-day table.
        let (board_rate, alight_rate) = if stop_id == StopId(0) {
            let bucket = self.peaks.bucket_at(t);
            let stop = self.route.find_stop(stop_id)?;
            let board = stop.board_rate.for_bucket(bucket);
            let alight = stop.alight_rate.for_bucket(bucket);
            (
                self.rng.normal_nonneg(board.mean, board.stddev),
                self.rng.normal_nonneg(alight.mean, alight.stddev),
            )
        } else {
            let bus = self.fleet.get(bus_id)?;
            (bus.next_board_rate, bus.next_alight_rate)
        };

        // Step 3: stop the bus here and re-sort the fleet by mileage.
        let stop_mileage = self.route.find_stop(stop_id)?.mileage;
        {
            let bus = self.fleet.get_mut(bus_id)?;
            bus.speed = 0.0;
            bus.mileage = stop_mileage;
        }
        self.fleet.resort();

        // Step 4: time-passage accounting for waiting passengers.
        let headway = self.fleet.get(bus_id)?.headway;
        let last_arrive = self.route.find_stop(stop_id)?.last_arrive;
        {
            let added = match last_arrive {
                Some(last) => ((t - last) as f64 * board_rate).round(),
                None => headway * board_rate,
            };
            let stop = self.route.find_stop_mut(stop_id)?;
            stop.pax = (stop.pax as f64 + added).max(0.0) as u32;
        }

        // Step 5: passenger exchange.
        let dwell_this_stop = self.exchange_passengers(bus_id, stop_id, t, alight_rate, last_arrive, headway)?;

        // Step 6: headway-deviation sample, then advance lastArrive.
        let has_leader = self.fleet.leading(bus_id)?.is_some();
        if has_leader {
            if let Some(last) = last_arrive {
                let delta = (t - last) as f64 - headway;
                let relative = delta / headway;
                let sq = relative * relative;
                self.headway_dev_sum += sq;
                self.headway_dev_count += 1;
                observer.on_headway_sample(stop_id, bus_id, sq);
            }
        }
        self.route.find_stop_mut(stop_id)?.last_arrive = Some(t);

        // Step 7/8: schedule the departure (unless terminal) and pay down dwell debt.
        let is_last = self.route.is_last_element(ElementRef::Stop(stop_id))?;
        if !is_last {
            let bus_dwell = self.fleet.get(bus_id)?.dwell;
            let dwell = self.scheme.dwell_cap.min(bus_dwell.max(dwell_this_stop));
            self.schedule(
                t,
                Event::new(t.offset(dwell.round() as i64), bus_id, EventKind::DepartStop(stop_id), event.direction),
            )?;
        }
        let bus = self.fleet.get_mut(bus_id)?;
        let payoff = self.scheme.dwell_cap.min(bus.dwell);
        bus.dwell -= payoff;
        bus.last_stop = Some(stop_id);

        Ok(())
    }

    /// §4.4.1 Passenger exchange.
    fn exchange_passengers(
        &mut self,
        bus_id: BusId,
        stop_id: StopId,
        now: Seconds,
        alight_rate: f64,
        last_arrive: Option<Seconds>,
        headway: f64,
    ) -> SimResult<f64> {
        let time_passed = match last_arrive {
            Some(last) => (now - last) as f64,
            None => headway,
        };

        let bus = self.fleet.get(bus_id)?;
        let drop_pax_raw = (time_passed * alight_rate).floor().max(0.0) as u32;
        let drop_pax = drop_pax_raw.min(bus.pax);
        let pax_remain = bus.pax - drop_pax;
        let available = bus.capacity.saturating_sub(pax_remain);

        let stop = self.route.find_stop(stop_id)?;
        let board = stop.pax.min(available);
        let crowding_factor = if (pax_remain as f64) < 0.65 * bus.capacity as f64 { 2.0 } else { 2.7 };
        let dwell_this_stop = (board as f64 * crowding_factor).floor();

        self.fleet.get_mut(bus_id)?.pax = pax_remain + board;
        self.route.find_stop_mut(stop_id)?.pax -= board;

        Ok(dwell_this_stop)
    }

    // ── §4.5 Stop-Departure Handler (bunching control) ───────────────────

    fn handle_depart_stop<O: SimObserver>(
        &mut self,
        event: Event,
        stop_id: StopId,
        observer: &mut O,
    ) -> SimResult<()> {
        let t = event.time;
        let bus_id = event.bus;

        let stop_mileage = self.route.find_stop(stop_id)?.mileage;
        let next_stop = self.route.next_stop(stop_id)?.cloned();

        // Step 1: cache next stop's (sampled) rates for the arrival handler.
        if let Some(next) = &next_stop {
            let bucket = self.peaks.bucket_at(t);
            let board = next.board_rate.for_bucket(bucket);
            let alight = next.alight_rate.for_bucket(bucket);
            let bus = self.fleet.get_mut(bus_id)?;
            bus.next_board_rate = self.rng.normal_nonneg(board.mean, board.stddev);
            bus.next_alight_rate = self.rng.normal_nonneg(alight.mean, alight.stddev);
        }

        // Step 2: per-trip cruise speed sample.
        let vavg_sample = self.rng.normal_nonneg(self.scheme.velocity_avg, self.scheme.velocity_sd) / 3.6;

        // Step 3.
        self.fleet.get_mut(bus_id)?.last_go = t;

        // Step 4: terminal check.
        let Some(next_stop) = next_stop else {
            return Ok(());
        };

        // Step 5: estimate dwell needed at the next stop.
        let headway = self.fleet.get(bus_id)?.headway;
        let bus_pax = self.fleet.get(bus_id)?.pax;
        let bus_capacity = self.fleet.get(bus_id)?.capacity;
        let next_board_rate = self.fleet.get(bus_id)?.next_board_rate;
        let next_alight_rate = self.fleet.get(bus_id)?.next_alight_rate;

        let next_board = (next_stop.pax as f64 + (headway * next_board_rate).ceil())
            .min(bus_capacity as f64 - bus_pax as f64 * next_alight_rate)
            .max(0.0);
        let crowding_factor = if (bus_pax as f64) < 0.65 * bus_capacity as f64 { 2.0 } else { 2.7 };
        let pax_time = (next_board * crowding_factor).floor();
        let mut total_dwell = pax_time + self.fleet.get(bus_id)?.dwell;

        // Step 6/7: leader-relative speed and bunching detection.
        let leader = self.fleet.leading(bus_id)?.cloned();
        let new_speed = match leader {
            None => {
                self.fleet.get_mut(bus_id)?.speed = vavg_sample;
                self.fleet.get_mut(bus_id)?.dwell = total_dwell;
                vavg_sample
            }
            Some(leader) => {
                let distance = if leader.speed > 0.0 {
                    leader.mileage + leader.speed * (t - leader.last_go) as f64 - stop_mileage
                } else {
                    leader.mileage - stop_mileage
                };

                let mut speed = distance / (headway + total_dwell);
                let was_bunching = self.fleet.get(bus_id)?.bunching;
                let too_close = distance / vavg_sample < headway * self.scheme.scheme_threshold;

                if too_close {
                    speed = vavg_sample;
                    self.fleet.get_mut(bus_id)?.bunching = false;
                    if was_bunching {
                        observer.on_bunching_change(bus_id, stop_id, false);
                    }
                } else {
                    self.fleet.get_mut(bus_id)?.bunching = true;
                    if !was_bunching {
                        observer.on_bunching_change(bus_id, stop_id, true);
                    }
                }

                if speed < self.scheme.velocity_low {
                    total_dwell += (distance / speed) - (distance / vavg_sample);
                    speed = vavg_sample;
                } else if speed > self.scheme.velocity_limit {
                    let hold = (distance / self.scheme.velocity_limit) - (distance / speed);
                    self.fleet.get_mut(leader.id)?.dwell += hold;
                    speed = self.scheme.velocity_limit;
                }

                let bus = self.fleet.get_mut(bus_id)?;
                bus.speed = speed;
                bus.dwell = total_dwell;
                speed
            }
        };

        // Step 8: emit the arrival event for the next route element.
        self.emit_next_arrival(t, bus_id, ElementRef::Stop(stop_id), stop_mileage, new_speed, event.direction)
    }

    // ── §4.6 Signal-Arrival Handler ───────────────────────────────────────

    fn handle_arrive_signal<O: SimObserver>(
        &mut self,
        event: Event,
        signal_id: SignalId,
        _observer: &mut O,
    ) -> SimResult<()> {
        let t = event.time;
        let bus_id = event.bus;
        let signal_mileage = self.route.find_signal(signal_id)?.mileage;

        let bus = self.fleet.get_mut(bus_id)?;
        bus.next_speed = bus.speed;
        bus.speed = 0.0;
        bus.mileage = signal_mileage;

        let wait = self.route.find_signal(signal_id)?.plan.signal_status(t)?;
        if wait == 0 {
            let speed = {
                let bus = self.fleet.get_mut(bus_id)?;
                bus.speed = bus.next_speed;
                bus.speed
            };
            self.emit_next_arrival(t, bus_id, ElementRef::Signal(signal_id), signal_mileage, speed, event.direction)
        } else {
            self.schedule(
                t,
                Event::new(t.offset(wait), bus_id, EventKind::DepartSignal(signal_id), event.direction),
            )
        }
    }

    // ── §4.7 Signal-Departure Handler ─────────────────────────────────────

    fn handle_depart_signal<O: SimObserver>(
        &mut self,
        event: Event,
        signal_id: SignalId,
        _observer: &mut O,
    ) -> SimResult<()> {
        let t = event.time;
        let bus_id = event.bus;
        let signal_mileage = self.route.find_signal(signal_id)?.mileage;

        let speed = {
            let bus = self.fleet.get_mut(bus_id)?;
            bus.speed = bus.next_speed;
            bus.last_go = t;
            bus.speed
        };

        match self.route.next_element(ElementRef::Signal(signal_id))? {
            None => Ok(()),
            Some(_) => self.emit_next_arrival(t, bus_id, ElementRef::Signal(signal_id), signal_mileage, speed, event.direction),
        }
    }

    /// Shared tail of the departure handlers: look up the next route
    /// element and emit the matching arrival event at the speed just
    /// assigned to the bus.
    fn emit_next_arrival(
        &mut self,
        t: Seconds,
        bus_id: BusId,
        from: ElementRef,
        from_mileage: f64,
        speed: f64,
        direction: bool,
    ) -> SimResult<()> {
        let next = self.route.next_element(from)?.ok_or(SimError::NextElementMissing)?;
        let (next_mileage, kind) = match next {
            RouteElement::Stop(s) => (s.mileage, EventKind::ArriveStop(s.id)),
            RouteElement::Signal(s) => (s.mileage, EventKind::ArriveSignal(s.id)),
        };
        let travel = (next_mileage - from_mileage) / speed;
        self.schedule(t, Event::new(t.offset(travel.round() as i64), bus_id, kind, direction))
    }
}
