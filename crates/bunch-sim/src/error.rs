//! Simulation-level errors: invalid configuration, dispatch failures, and
//! the invariant violations that indicate a corrupt route or a programming
//! error in a handler.

use bunch_route::RouteError;
use bunch_signal::SignalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("no route element follows the current one; the route is corrupt")]
    NextElementMissing,

    #[error("unknown event type")]
    UnknownEventType,

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type SimResult<T> = Result<T, SimError>;
