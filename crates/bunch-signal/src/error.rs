//! Errors produced while parsing or evaluating a signal plan.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("malformed signal plan string: {0}")]
    BadFormat(String),

    #[error("no plan segment covers the requested time of day")]
    NoMatchingSegment,
}

pub type SignalResult<T> = Result<T, SignalError>;
