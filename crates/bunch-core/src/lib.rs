//! `bunch-core` — foundational types for the bus-bunching simulator.
//!
//! This crate is a dependency of every other crate in the workspace.  It
//! intentionally has no sibling dependencies and a minimal external ones
//! (`rand`, `rand_distr`, `thiserror`, plus optional `serde`).
//!
//! | Module   | Contents                                          |
//! |----------|----------------------------------------------------|
//! | [`ids`]  | `BusId`, `StopId`, `SignalId`                      |
//! | [`time`] | `Seconds`, `TimeBucket`, `PeakSchedule`            |
//! | [`rng`]  | `SimRng` — the one seeded generator for a whole run |
//! | [`error`]| `CoreError`, `CoreResult`                           |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

pub use error::{CoreError, CoreResult};
pub use ids::{BusId, SignalId, StopId};
pub use rng::SimRng;
pub use time::{parse_hhmm, PeakSchedule, PeakWindow, Seconds, TimeBucket};
