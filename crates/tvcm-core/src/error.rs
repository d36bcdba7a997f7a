//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The error type for `tvcm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Shorthand for building a [`CoreError::Config`] from anything printable.
    pub fn config(msg: impl Into<String>) -> Self {
        CoreError::Config(msg.into())
    }
}

/// Shorthand result type for `tvcm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
