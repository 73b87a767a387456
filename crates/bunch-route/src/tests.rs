use crate::entities::{Bus, RatePair, RateTable, Signal, Stop};
use crate::fleet::Fleet;
use crate::route::{ElementRef, Route};
use bunch_core::{BusId, SignalId, StopId};
use bunch_signal::Plan;

fn zero_rates() -> RateTable {
    let z = RatePair { mean: 0.0, stddev: 0.0 };
    RateTable { morning_peak: z, evening_peak: z, off_peak: z }
}

fn flat_plan() -> Plan {
    Plan::parse("/0000/60/0/0,30/").unwrap()
}

#[test]
fn route_insertion_keeps_strictly_increasing_mileage() {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "origin".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 0.0)
        .unwrap();
    route
        .insert_signal(Signal::new(SignalId(0), "light".into(), 0.0, flat_plan()), 0.0, || 500.0)
        .unwrap();
    route
        .insert_stop(Stop::new(StopId(1), "far".into(), 0.0, zero_rates(), zero_rates()), 500.0, || 500.0)
        .unwrap();

    let mileages: Vec<f64> = route.elements().iter().map(|e| e.mileage()).collect();
    let mut sorted = mileages.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(mileages, sorted);
    assert_eq!(mileages, vec![0.0, 500.0, 1000.0]);
}

#[test]
fn mileage_collision_resamples_the_increment() {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "a".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 100.0)
        .unwrap();

    let mut attempt = 0;
    let mileage = route
        .insert_stop(
            Stop::new(StopId(1), "b".into(), 0.0, zero_rates(), zero_rates()),
            0.0,
            || {
                attempt += 1;
                if attempt == 1 {
                    100.0 // collides with the stop already at mileage 100
                } else {
                    150.0
                }
            },
        )
        .unwrap();
    assert_eq!(mileage, 150.0);
}

#[test]
fn next_stop_skips_intervening_signals() {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "a".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 0.0)
        .unwrap();
    route
        .insert_signal(Signal::new(SignalId(0), "light".into(), 0.0, flat_plan()), 0.0, || 100.0)
        .unwrap();
    route
        .insert_stop(Stop::new(StopId(1), "b".into(), 0.0, zero_rates(), zero_rates()), 100.0, || 200.0)
        .unwrap();

    let next = route.next_stop(StopId(0)).unwrap().unwrap();
    assert_eq!(next.id, StopId(1));
}

#[test]
fn next_stop_is_none_at_the_last_stop() {
    let mut route = Route::new();
    route
        .insert_stop(Stop::new(StopId(0), "a".into(), 0.0, zero_rates(), zero_rates()), 0.0, || 0.0)
        .unwrap();
    assert!(route.next_stop(StopId(0)).unwrap().is_none());
    assert!(route.is_last_element(ElementRef::Stop(StopId(0))).unwrap());
}

#[test]
fn find_stop_fails_distinctly_when_absent() {
    let route = Route::new();
    let err = route.find_stop(StopId(9)).unwrap_err();
    assert!(matches!(err, crate::RouteError::StopNotFound(_)));
}

#[test]
fn fleet_leading_bus_is_the_one_with_greater_mileage() {
    let mut b0 = Bus::new(BusId(0), 300.0);
    b0.mileage = 100.0;
    b0.last_stop = Some(StopId(0));
    let mut b1 = Bus::new(BusId(1), 300.0);
    b1.mileage = 400.0;
    b1.last_stop = Some(StopId(0));
    let fleet = Fleet::new(vec![b0, b1]);

    let leader = fleet.leading(BusId(0)).unwrap().unwrap();
    assert_eq!(leader.id, BusId(1));
    assert!(fleet.leading(BusId(1)).unwrap().is_none());
}

#[test]
fn fleet_resort_reflects_mileage_updates() {
    let mut b0 = Bus::new(BusId(0), 300.0);
    b0.mileage = 500.0;
    b0.last_stop = Some(StopId(0));
    let mut b1 = Bus::new(BusId(1), 300.0);
    b1.mileage = 100.0;
    b1.last_stop = Some(StopId(0));
    let mut fleet = Fleet::new(vec![b0, b1]);
    // Initially bus 1 leads (smaller id comes first when mileage ties are
    // absent — here mileage alone already orders them).
    assert_eq!(fleet.leading(BusId(1)).unwrap().unwrap().id, BusId(0));

    fleet.get_mut(BusId(1)).unwrap().mileage = 900.0;
    fleet.resort();
    assert!(fleet.leading(BusId(1)).unwrap().is_none());
    assert_eq!(fleet.leading(BusId(0)).unwrap().unwrap().id, BusId(1));
}

#[test]
fn fleet_leading_skips_a_bus_not_yet_dispatched() {
    // A bus still waiting at mileage 0.0 (last_stop == None) must never be
    // returned as another bus's leader, even if it sorts ahead by mileage.
    let mut b0 = Bus::new(BusId(0), 300.0);
    b0.mileage = 100.0;
    b0.last_stop = Some(StopId(0));
    let undispatched = Bus::new(BusId(1), 300.0); // mileage 0.0, last_stop None
    let mut b2 = Bus::new(BusId(2), 300.0);
    b2.mileage = 400.0;
    b2.last_stop = Some(StopId(0));
    let fleet = Fleet::new(vec![b0, undispatched, b2]);

    let leader = fleet.leading(BusId(0)).unwrap().unwrap();
    assert_eq!(leader.id, BusId(2));
}
