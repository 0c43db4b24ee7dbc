//! Errors surfaced by structural tree mutation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by structural tree mutation.
///
/// Event dispatch, layout and clip bookkeeping are infallible: degenerate
/// geometry clamps and defensive conditions are logged no-ops. Only
/// operations that would corrupt the tree surface an error.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The target id is unknown or stale.
    #[error("no such view")]
    NoSuchView,
    /// The target section id is unknown.
    #[error("no such section")]
    NoSuchSection,
    /// The mutation would link a node to itself or to its own descendant.
    #[error("cycle: {0}")]
    Cycle(String),
    /// The view is not a descendant of the section it was used with.
    #[error("focus: {0}")]
    Focus(String),
    /// Internal invariant violation.
    #[error("internal: {0}")]
    Internal(String),
}
