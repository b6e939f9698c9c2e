//! Error types for vyuha-map.

use std::collections::TryReserveError;
use thiserror::Error;

/// Navigation error type.
///
/// Logic errors indicate a defect in a caller (every mover must check
/// the knowledge store before acting); they are reported and never
/// retried. Allocation failures surface as checked errors instead of
/// aborting. Route search running out of options is *not* an error;
/// see [`crate::search::SearchOutcome`].
#[derive(Error, Debug)]
pub enum NavError {
    #[error("logic error: {0}")]
    Logic(String),

    #[error("allocation failed while building a route: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NavError>;
