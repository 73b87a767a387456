//! Errors from CSV ingestion and scheduler seeding.

use bunch_route::RouteError;
use bunch_signal::SignalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("row {row}: {source}")]
    Csv { row: usize, source: csv::Error },

    #[error("row {row}: {message}")]
    BadRow { row: usize, message: String },

    #[error("route error while placing loaded entities: {0}")]
    Route(#[from] RouteError),

    #[error("signal plan error: {0}")]
    Signal(#[from] SignalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
