use bunch_core::{BusId, PeakSchedule, PeakWindow, Seconds, SignalId, StopId};
use bunch_route::{Bus, Fleet, RatePair, RateTable, Route, Stop};
use bunch_signal::Plan;

use crate::event::{Event, EventKind};
use crate::{NoopObserver, SchemeParams, SimBuilder, SimObserver, Simulator};

fn zero_rates() -> RateTable {
    let z = RatePair { mean: 0.0, stddev: 0.0 };
    RateTable { morning_peak: z, evening_peak: z, off_peak: z }
}

fn flat_rate(per_second: f64) -> RateTable {
    let r = RatePair { mean: per_second, stddev: 0.0 };
    RateTable { morning_peak: r, evening_peak: r, off_peak: r }
}

/// Two-stop route: origin at 0m, a second stop 1000m out.
fn two_stop_route(board: RateTable, alight: RateTable) -> Route {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "origin".into(), 0.0, board, alight), 0.0, || 0.0)
        .unwrap();
    route
        .insert_stop(Stop::new(StopId(1), "far".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 1000.0)
        .unwrap();
    route
}

fn never_peaks() -> PeakSchedule {
    let never = PeakWindow { start: Seconds::ZERO, end: Seconds::ZERO };
    PeakSchedule { morning: never, evening: never }
}

fn loose_scheme() -> SchemeParams {
    SchemeParams {
        velocity_avg: 90.0, // 25 m/s
        velocity_sd: 0.0,
        velocity_limit: 100.0,
        velocity_low: 0.0,
        dwell_cap: 120.0,
        scheme_threshold: 0.75,
    }
}

// ── Scenario: single bus, no signals, two stops ──────────────────────────────

#[test]
fn single_bus_completes_a_two_stop_route_with_zero_dwell() {
    let route = two_stop_route(zero_rates(), zero_rates());
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0)]);
    let mut sim = SimBuilder::new(route, fleet, vec![(Seconds(25_200), BusId(0))], loose_scheme(), 1)
        .peaks(never_peaks())
        .build()
        .unwrap();

    sim.run(&mut NoopObserver).unwrap();

    assert_eq!(sim.events_processed(), 3);
    assert_eq!(sim.fleet().get(BusId(0)).unwrap().mileage, 1000.0);
    assert_eq!(sim.route().find_stop(StopId(1)).unwrap().last_arrive, Some(Seconds(25_240)));
    assert_eq!(sim.headway_deviation(), (0.0, 0));
}

// ── Scenario: two buses sharing the first stop's waiting pool ───────────────

#[test]
fn two_buses_share_boarding_at_the_first_stop() {
    let route = two_stop_route(flat_rate(1.0 / 60.0), zero_rates());
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0), Bus::new(BusId(1), 300.0)]);
    let mut sim = SimBuilder::new(
        route,
        fleet,
        vec![(Seconds(25_200), BusId(0)), (Seconds(25_500), BusId(1))],
        loose_scheme(),
        1,
    )
    .peaks(never_peaks())
    .build()
    .unwrap();

    // Bus 0's arrival: warm-started waiting pool of 5 boards entirely onto it.
    assert!(sim.step(&mut NoopObserver).unwrap());
    assert_eq!(sim.fleet().get(BusId(0)).unwrap().pax, 5);
    assert_eq!(sim.route().find_stop(StopId(0)).unwrap().pax, 0);

    // Bus 0 departs, then arrives and terminates at the far stop.
    assert!(sim.step(&mut NoopObserver).unwrap());
    assert!(sim.step(&mut NoopObserver).unwrap());

    // Bus 1's arrival: a fresh pool of 5 accumulates and boards onto it, and
    // its headway relative to bus 0 is exactly on schedule.
    assert!(sim.step(&mut NoopObserver).unwrap());
    assert_eq!(sim.fleet().get(BusId(1)).unwrap().pax, 5);
    assert_eq!(sim.route().find_stop(StopId(0)).unwrap().pax, 0);
    assert_eq!(sim.headway_deviation(), (0.0, 1));
}

// ── Scenario: signal passthrough and waiting ────────────────────────────────

fn route_with_signal(green_end: i64) -> Route {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "origin".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 0.0)
        .unwrap();
    let plan = Plan::parse(&format!("/0000/60/0/0,{green_end}/")).unwrap();
    route
        .insert_signal(bunch_route::Signal::new(SignalId(0), "light".into(), 0.0, plan), 0.0, || 500.0)
        .unwrap();
    route
        .insert_stop(Stop::new(StopId(1), "far".into(), 0.0, zero_rates(), zero_rates()), 500.0, || 500.0)
        .unwrap();
    route
}

// Signal sits at 500m, the second stop at 1000m — the resolve_mileage
// closures above add to a running `previous_mileage`, so the values given
// are increments, not absolute mileages.

fn signal_scheme() -> SchemeParams {
    SchemeParams {
        velocity_avg: 90.0, // 25 m/s
        velocity_sd: 0.0,
        velocity_limit: 100.0,
        velocity_low: 0.0,
        dwell_cap: 120.0,
        scheme_threshold: 0.75,
    }
}

#[test]
fn green_light_allows_immediate_passthrough() {
    // Travel time to the signal is 500/25 = 20s; arriving at 20s mod 60 = 20,
    // inside the configured green window [0, 30).
    let route = route_with_signal(30);
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0)]);
    let mut sim = SimBuilder::new(route, fleet, vec![(Seconds(0), BusId(0))], signal_scheme(), 1)
        .peaks(never_peaks())
        .build()
        .unwrap();

    sim.run(&mut NoopObserver).unwrap();

    // ArriveStop(0), DepartStop(0), ArriveSignal, ArriveStop(1) — no DepartSignal.
    assert_eq!(sim.events_processed(), 4);
    assert_eq!(sim.fleet().get(BusId(0)).unwrap().mileage, 1000.0);
}

#[test]
fn red_light_schedules_a_wait_before_departing() {
    // Same geometry, but departing late enough that the signal is red on
    // arrival: (20 + 20) mod 60 = 40, outside [0, 30), waiting 20s for green.
    let route = route_with_signal(30);
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0)]);
    let mut sim = SimBuilder::new(route, fleet, vec![(Seconds(20), BusId(0))], signal_scheme(), 1)
        .peaks(never_peaks())
        .build()
        .unwrap();

    sim.run(&mut NoopObserver).unwrap();

    // ArriveStop(0), DepartStop(0), ArriveSignal, DepartSignal, ArriveStop(1).
    assert_eq!(sim.events_processed(), 5);
    assert_eq!(sim.fleet().get(BusId(0)).unwrap().mileage, 1000.0);
}

// ── Scenario: terminal stop ──────────────────────────────────────────────────

#[test]
fn terminal_stop_emits_no_successor_event() {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "only".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 0.0)
        .unwrap();
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0)]);
    let mut sim = SimBuilder::new(route, fleet, vec![(Seconds(500), BusId(0))], loose_scheme(), 1)
        .peaks(never_peaks())
        .build()
        .unwrap();

    sim.run(&mut NoopObserver).unwrap();

    assert_eq!(sim.events_processed(), 1);
    assert_eq!(sim.route().find_stop(StopId(0)).unwrap().last_arrive, Some(Seconds(500)));
}

// ── Builder validation ───────────────────────────────────────────────────────

#[test]
fn builder_rejects_mismatched_arrival_count() {
    let route = two_stop_route(zero_rates(), zero_rates());
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0), Bus::new(BusId(1), 300.0)]);
    let result = SimBuilder::new(route, fleet, vec![(Seconds(0), BusId(0))], loose_scheme(), 1).build();
    assert!(result.is_err());
}

// ── Bunching control: bounds enforcement and flag transitions ───────────────

/// Builds a two-bus simulator whose initial arrivals never fire (scheduled
/// far in the future), so a test can hand-place a leader bus and inject a
/// single departure event to exercise the control arithmetic directly.
fn rigged_sim() -> Simulator {
    let route = two_stop_route(zero_rates(), zero_rates());
    let fleet = Fleet::new(vec![Bus::new(BusId(0), 300.0), Bus::new(BusId(1), 300.0)]);
    let scheme = SchemeParams {
        velocity_avg: 36.0, // 10 m/s
        velocity_sd: 0.0,
        velocity_limit: 30.0,
        velocity_low: 5.0,
        dwell_cap: 120.0,
        scheme_threshold: 0.75,
    };
    SimBuilder::new(
        route,
        fleet,
        vec![(Seconds(1_000_000), BusId(0)), (Seconds(1_000_000), BusId(1))],
        scheme,
        1,
    )
    .peaks(never_peaks())
    .build()
    .unwrap()
}

#[test]
fn departure_handler_clamps_speed_to_the_upper_limit() {
    let mut sim = rigged_sim();
    {
        let leader = sim.fleet.get_mut(BusId(0)).unwrap();
        leader.mileage = 100_000.0;
        leader.speed = 1.0;
        leader.last_go = Seconds(1000);
        leader.last_stop = Some(StopId(0));
        leader.dwell = 0.0;
    }
    sim.fleet.resort();
    sim.queue.push(Event::new(Seconds(1000), BusId(1), EventKind::DepartStop(StopId(0)), true));

    sim.step(&mut NoopObserver).unwrap();

    let follower = sim.fleet().get(BusId(1)).unwrap();
    assert_eq!(follower.speed, 30.0);
    assert!(follower.bunching);
    let leader = sim.fleet().get(BusId(0)).unwrap();
    assert!((leader.dwell - 3033.333333).abs() < 0.01);
}

#[test]
fn departure_handler_clamps_speed_to_the_lower_limit() {
    let mut sim = rigged_sim();
    {
        let leader = sim.fleet.get_mut(BusId(0)).unwrap();
        leader.mileage = 2400.0;
        leader.speed = 0.0;
        leader.last_go = Seconds(1000);
        leader.last_stop = Some(StopId(0));
    }
    {
        let follower = sim.fleet.get_mut(BusId(1)).unwrap();
        follower.dwell = 200.0;
    }
    sim.fleet.resort();
    sim.queue.push(Event::new(Seconds(1000), BusId(1), EventKind::DepartStop(StopId(0)), true));

    sim.step(&mut NoopObserver).unwrap();

    let follower = sim.fleet().get(BusId(1)).unwrap();
    assert_eq!(follower.speed, 10.0); // falls back to Vavg_sample, not Vlow itself
    assert!((follower.dwell - 460.0).abs() < 0.01);
    assert!(follower.bunching);
}

#[test]
fn bunching_flag_clears_when_leader_is_within_threshold() {
    #[derive(Default)]
    struct Spy {
        changes: Vec<(BusId, StopId, bool)>,
    }
    impl SimObserver for Spy {
        fn on_bunching_change(&mut self, bus: BusId, stop: StopId, bunching: bool) {
            self.changes.push((bus, stop, bunching));
        }
    }

    let mut sim = rigged_sim();
    {
        let leader = sim.fleet.get_mut(BusId(0)).unwrap();
        leader.mileage = 50.0;
        leader.speed = 0.0;
        leader.last_go = Seconds(1000);
        leader.last_stop = Some(StopId(0));
    }
    {
        let follower = sim.fleet.get_mut(BusId(1)).unwrap();
        follower.bunching = true;
    }
    sim.fleet.resort();
    sim.queue.push(Event::new(Seconds(1000), BusId(1), EventKind::DepartStop(StopId(0)), true));

    let mut spy = Spy::default();
    sim.step(&mut spy).unwrap();

    let follower = sim.fleet().get(BusId(1)).unwrap();
    assert_eq!(follower.speed, 10.0);
    assert!(!follower.bunching);
    assert_eq!(spy.changes, vec![(BusId(1), StopId(0), false)]);
}
