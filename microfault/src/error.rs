//! Status values returned by registry operations.
//!
//! `Ok` is `Result::Ok`; the two failure kinds are [`FaultError`] variants.
//! Errors are returned synchronously and never logged by the registry
//! itself. Every failing operation leaves the table unchanged.

use thiserror::Error;

/// Registry operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FaultError {
    /// Bad call-site argument (empty or oversized table, oversized count).
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The fault code is not present in the active part of the table.
    #[error("fault code {code:#x} not found")]
    NotFound {
        /// Requested code, widened to `u32`.
        code: u32,
    },
}

/// Result alias for registry operations.
pub type FaultResult<T> = Result<T, FaultError>;
