//! Error types for connection enumeration.

use glam::IVec2;
use thiserror::Error;

/// Result type alias for enumeration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an enumeration pass.
///
/// None of these are retryable: the pipeline is purely computational, so an
/// error always means the input (or a collaborator) broke its contract.
#[derive(Debug, Error)]
pub enum Error {
    /// The shape has no cells, duplicate cells, negative coordinates, or does
    /// not match the pose assignment handed to it.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A symmetry label contained a character outside `-|%@`.
    #[error("Unrecognized symmetry label {label:?}: unexpected character {ch:?}")]
    UnrecognizedSymmetryLabel { label: String, ch: char },

    /// Two cells were paired whose offset is not an orthogonal unit vector.
    #[error("Adjacency invariant violated between cells {current} and {neighbor}")]
    AdjacencyInvariant { current: IVec2, neighbor: IVec2 },

    /// A connection label string could not be parsed.
    #[error("Invalid connection label: {0}")]
    InvalidLabel(String),

    /// The enumeration was cancelled through its [`CancelFlag`](crate::CancelFlag).
    #[error("Enumeration cancelled")]
    Cancelled,
}
