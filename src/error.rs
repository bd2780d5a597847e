use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Errors raised by the geometric kernel.
///
/// Every variant is raised at construction (or decode) time. An object that
/// fails construction is never partially built.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Malformed shape: wrong vertex count, mismatched tag length,
    /// out-of-range enum value, non-finite coordinate, inverted box.
    #[error("Invalid geometry: {0}")]
    Validation(String),

    /// Run lengths do not cover the declared raster.
    #[error("RLE covers {actual} pixel(s) but the raster has {expected}")]
    ShapeMismatch { expected: u64, actual: u64 },

    /// Degenerate quaternion or rotation matrix.
    #[error("Invalid rotation: {0}")]
    InvalidRotation(String),
}

impl GeometryError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// The main error type for annokit operations.
#[derive(Debug, Error)]
pub enum AnnokitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },
}
