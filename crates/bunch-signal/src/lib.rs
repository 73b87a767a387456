//! `bunch-signal` — traffic-signal phase plans.
//!
//! A [`Plan`] answers one question for a given point in simulated time: is
//! the light green, and if not, how many seconds until it turns green.

pub mod error;
pub mod plan;

#[cfg(test)]
mod tests;

pub use error::{SignalError, SignalResult};
pub use plan::{Plan, Segment};
