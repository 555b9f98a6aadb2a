//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid plot input.
/// These are independent of rendering and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("no arbor results present, nothing to plot")]
    EmptySeries,

    #[error("non-finite value for {arbor}")]
    NonFiniteValue { arbor: String },

    #[error("min/avg/max results disagree for {arbor}: {reason}")]
    MismatchedSeries { arbor: String, reason: String },

    #[error("distribution is empty: {0}")]
    EmptyDistribution(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}
