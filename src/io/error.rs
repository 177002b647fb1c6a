//! Error types for dungeon generation and export

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::cell::Classification;
use crate::graph::position::Position;

/// Main error type for all generation and export operations
///
/// Every generation failure is terminal for the attempt that raised it;
/// callers may start over with a different seed.
#[derive(Debug, Error)]
pub enum DungeonError {
    /// Cycle entrance placement needs an entrance cell
    #[error("There is no entrance in the graph")]
    MissingEntrance,

    /// Cycle carving needs a cycle entrance cell
    #[error("There is no cycle entrance in the graph")]
    MissingCycleEntrance,

    /// Random walk reached a cell with no empty open neighbor
    #[error("Random walk stuck at {position} on step {step}")]
    GenerationStuck {
        /// Cell the walker could not leave
        position: Position,
        /// Zero-based walk step that failed
        step: usize,
    },

    /// Cycle closure search exhausted its frontier
    #[error("No path from {from} back to {to}")]
    NoPath {
        /// Final cell of the random walk
        from: Position,
        /// Cycle entrance the path had to reach
        to: Position,
    },

    /// Goal placement ran out of candidate cycle cells
    #[error("No cycle cell can host the goal")]
    NoValidCycleCell,

    /// Operation called in a state that would break a graph invariant
    #[error("Invalid state: {reason}")]
    InvalidState {
        /// Which invariant the call would violate
        reason: &'static str,
    },

    /// Classification is not in the set callers may place directly
    #[error("{classification:?} is not recognized as a placeable room type")]
    NotPlaceable {
        /// The rejected classification
        classification: Classification,
    },

    /// Position lies outside the grid
    #[error("Position {position} is out of bounds")]
    OutOfBounds {
        /// The offending position
        position: Position,
    },

    /// Parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        #[source]
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Labeled graph could not be encoded or decoded
    #[error("Serialization error: {source}")]
    Serialization {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, DungeonError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DungeonError {
    DungeonError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation that produced it
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> DungeonError {
    DungeonError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
