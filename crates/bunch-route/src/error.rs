//! Errors raised by route and fleet lookups.

use bunch_core::{BusId, SignalId, StopId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("bus {0} not found in fleet")]
    BusNotFound(BusId),

    #[error("stop {0} not found on route")]
    StopNotFound(StopId),

    #[error("signal {0} not found on route")]
    SignalNotFound(SignalId),

    #[error("could not resolve a unique mileage after repeated resampling")]
    MileageCollision,
}

pub type RouteResult<T> = Result<T, RouteError>;
