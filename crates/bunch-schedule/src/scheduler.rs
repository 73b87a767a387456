//! Route construction from loaded CSV records, and fleet/departure seeding.

use bunch_config::RunConfig;
use bunch_core::{BusId, SimRng, Seconds};
use bunch_route::{Bus, Fleet, Route};

use crate::error::ScheduleResult;
use crate::loader::{self, SignalRecord, StopRecord};

/// Build the route from loaded stop/signal records.
///
/// Stops and signals are each placed along an independent cumulative-
/// distance chain — stop *i*'s mileage is `stop(i-1).mileage +
/// Normal(stop.distAvg, stop.distSd)` (the first stop sits exactly at
/// mileage zero, the route origin), and likewise for signals using
/// `signal.distAvg`/`distSd`. The two chains are then merged into one
/// mileage-ordered route by [`Route::insert_stop`]/[`Route::insert_signal`],
/// which resolve any mileage collision between a stop and a signal by
/// resampling.
pub fn build_route(
    mut stops: Vec<StopRecord>,
    mut signals: Vec<SignalRecord>,
    config: &RunConfig,
    rng: &mut SimRng,
) -> ScheduleResult<Route> {
    stops.sort_by_key(|s| s.id.0);
    signals.sort_by_key(|s| s.id.0);

    let mut route = Route::new();

    let mut prev_stop_mileage = 0.0_f64;
    for (i, record) in stops.into_iter().enumerate() {
        let stop = loader::stop_from_record(record);
        let mileage = if i == 0 {
            route.insert_stop(stop, 0.0, || 0.0)?
        } else {
            route.insert_stop(stop, prev_stop_mileage, || {
                rng.normal_nonneg(config.stop_dist_avg, config.stop_dist_sd)
            })?
        };
        prev_stop_mileage = mileage;
    }

    let mut prev_signal_mileage = 0.0_f64;
    for record in signals {
        let signal = loader::signal_from_record(record);
        let mileage = route.insert_signal(signal, prev_signal_mileage, || {
            rng.normal_nonneg(config.signal_dist_avg, config.signal_dist_sd)
        })?;
        prev_signal_mileage = mileage;
    }

    Ok(route)
}

/// Seed the fleet and their initial departure times from the origin stop.
///
/// Bus `i`'s own scheduled headway `h_i = |Normal(avg, sd)|` doubles as the
/// gap added to the previous bus's departure time to produce bus `i`'s
/// departure time; bus 0 always departs exactly at `schedule.startTime`.
/// Returns the fleet (sorted, all at mileage zero) and the
/// `(departure_time, bus_id)` pairs the caller should seed the event queue
/// with as `ArriveStop` events at the origin stop.
pub fn seed_fleet(config: &RunConfig, rng: &mut SimRng) -> (Fleet, Vec<(Seconds, BusId)>) {
    let shift = config.schedule_shift;
    let mut buses = Vec::with_capacity(shift as usize);
    let mut arrivals = Vec::with_capacity(shift as usize);
    let mut t = config.schedule_start;

    for i in 0..shift {
        let headway = rng.normal(config.schedule_avg, config.schedule_sd).abs();
        if i > 0 {
            t = t.offset(headway.round() as i64);
        }
        let id = BusId(i);
        buses.push(Bus::new(id, headway));
        arrivals.push((t, id));
    }

    (Fleet::new(buses), arrivals)
}
