//! Shared error base.
//!
//! Sub-crates define their own error enums for domain-specific failures and
//! convert into or wrap `CoreError` as needed; both patterns are used across
//! this workspace.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
