//! `bunch-sim` — the discrete-event simulation loop.
//!
//! A single-threaded min-heap of [`event::Event`]s drives four handlers
//! (stop arrival, stop departure, signal arrival, signal departure). The
//! stop-departure handler is where the bunching-control scheme lives: it
//! compares a bus against the one ahead of it and adjusts cruise speed and
//! holding time to keep headways even.
//!
//! Construct a [`Simulator`] with [`SimBuilder`], then call
//! [`Simulator::run`] with a [`SimObserver`] to collect results.

mod builder;
mod event;
mod observer;
mod queue;
mod sim;

pub mod error;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{SchemeParams, Simulator};

#[cfg(test)]
mod tests;
