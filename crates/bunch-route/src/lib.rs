//! `bunch-route` — route and fleet entities.
//!
//! The route is a mileage-ordered sequence of [`entities::Stop`]s and
//! [`entities::Signal`]s; the fleet is a mileage-ordered sequence of
//! [`entities::Bus`]es. Neither type knows about events or scheduling —
//! that lives in `bunch-sim`.

pub mod entities;
pub mod error;
pub mod fleet;
pub mod route;

#[cfg(test)]
mod tests;

pub use entities::{Bus, RatePair, RateTable, Signal, Stop, CAPACITY};
pub use error::{RouteError, RouteResult};
pub use fleet::Fleet;
pub use route::{ElementRef, Route, RouteElement};
