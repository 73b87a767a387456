//! Passive data: buses, stops, and signals.

use bunch_core::{BusId, Seconds, SignalId, StopId, TimeBucket};
use bunch_signal::Plan;

/// Fixed seating-plus-standing capacity shared by every bus in the fleet.
pub const CAPACITY: u32 = 60;

/// A (mean, stddev) pair for a per-time-of-day passenger rate, in
/// passengers per second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RatePair {
    pub mean: f64,
    pub stddev: f64,
}

/// The three time-of-day rate pairs a stop carries for one direction of
/// passenger flow (boarding or alighting).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RateTable {
    pub morning_peak: RatePair,
    pub evening_peak: RatePair,
    pub off_peak: RatePair,
}

impl RateTable {
    pub fn for_bucket(&self, bucket: TimeBucket) -> RatePair {
        match bucket {
            TimeBucket::MorningPeak => self.morning_peak,
            TimeBucket::EveningPeak => self.evening_peak,
            TimeBucket::OffPeak => self.off_peak,
        }
    }
}

/// A single bus in the fleet.
#[derive(Clone, Debug)]
pub struct Bus {
    pub id: BusId,
    /// Scheduled headway, seconds, constant for the life of the bus.
    pub headway: f64,
    pub capacity: u32,
    /// Meters/second; zero while stopped.
    pub speed: f64,
    pub pax: u32,
    /// Cumulative distance from the route origin, meters.
    pub mileage: f64,
    /// Residual holding time owed at future stops, seconds.
    pub dwell: f64,
    /// Timestamp of the last departure from a stop or signal.
    pub last_go: Seconds,
    /// Speed held across a signal stop, restored on departure.
    pub next_speed: f64,
    /// Boarding rate sampled at the last departure, cached for the
    /// following stop's arrival handler.
    pub next_board_rate: f64,
    /// Alighting rate sampled at the last departure, cached the same way.
    pub next_alight_rate: f64,
    pub last_stop: Option<StopId>,
    pub bunching: bool,
}

impl Bus {
    pub fn new(id: BusId, headway: f64) -> Self {
        Bus {
            id,
            headway,
            capacity: CAPACITY,
            speed: 0.0,
            pax: 0,
            mileage: 0.0,
            dwell: 0.0,
            last_go: Seconds::ZERO,
            next_speed: 0.0,
            next_board_rate: 0.0,
            next_alight_rate: 0.0,
            last_stop: None,
            bunching: false,
        }
    }
}

/// A stop along the route.
#[derive(Clone, Debug)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub mileage: f64,
    pub pax: u32,
    /// `None` until the first bus arrives.
    pub last_arrive: Option<Seconds>,
    /// Rate of passengers accumulating at the stop to board a bus.
    pub board_rate: RateTable,
    /// Rate at which onboard passengers alight here.
    pub alight_rate: RateTable,
}

impl Stop {
    pub fn new(id: StopId, name: String, mileage: f64, board_rate: RateTable, alight_rate: RateTable) -> Self {
        Stop {
            id,
            name,
            mileage,
            pax: 0,
            last_arrive: None,
            board_rate,
            alight_rate,
        }
    }
}

/// A signalized intersection along the route.
#[derive(Clone, Debug)]
pub struct Signal {
    pub id: SignalId,
    pub name: String,
    pub mileage: f64,
    pub plan: Plan,
}

impl Signal {
    pub fn new(id: SignalId, name: String, mileage: f64, plan: Plan) -> Self {
        Signal { id, name, mileage, plan }
    }
}
