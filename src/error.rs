//! Error types for the overlay engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors the overlay engine can surface.
///
/// Absent viewport bounds and unexpected geometry types are policies
/// (empty result, skipped hexagon), not error variants.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Reading the dataset document from disk failed
    #[error("failed to read hexagon dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset document is not a valid hexagon feature collection
    #[error("failed to parse hexagon dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),

    /// A representative point could not be handed to the grid index
    #[error("invalid geographic coordinate: {0}")]
    InvalidCoordinate(#[from] h3o::error::InvalidLatLng),
}
