use thiserror::Error;

/// Errors surfaced by neighborhood construction and labeling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed neighborhood kernel: even or zero dimension, or ragged rows.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The neighborhood has no active cells, so nothing can be connected.
    #[error("Neighborhood defines no neighbors")]
    EmptyNeighborhood,
}

pub type Result<T> = std::result::Result<T, Error>;
