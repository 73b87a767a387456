//! Configuration-loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration key {0:?}")]
    MissingKey(String),

    #[error("configuration key {key:?} has a non-numeric value {value:?}")]
    BadNumber { key: String, value: String },

    #[error("configuration key {key:?} has a malformed time value {value:?}")]
    BadTime { key: String, value: String },

    #[error("malformed configuration line {line_no}: {line:?}")]
    BadLine { line_no: usize, line: String },

    #[error("configuration key {key:?} has an out-of-range value {value}")]
    OutOfRange { key: String, value: f64 },

    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
