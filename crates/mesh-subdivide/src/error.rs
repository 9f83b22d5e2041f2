//! Error types for mesh subdivision.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for subdivision operations.
pub type SubdivideResult<T> = Result<T, SubdivideError>;

/// Errors that can occur while loading, validating, or subdividing a mesh.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// Error reading from a file.
    #[error("failed to read mesh from {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to a file.
    #[error("failed to write mesh to {path}: {source}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing mesh file format.
    #[error("failed to parse mesh from {path}: {details}")]
    ParseError { path: PathBuf, details: String },

    /// Unsupported file format.
    #[error("unsupported mesh format: {extension:?}")]
    UnsupportedFormat { extension: Option<String> },

    /// Mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("mesh has no faces")]
    NoFaces,

    /// The mesh is not a closed, manifold, purely triangular mesh.
    #[error("invalid mesh topology: {details}")]
    InvalidTopology { details: String },

    /// Weld tolerance must be finite and positive.
    #[error("invalid weld tolerance: {0} (must be finite and > 0)")]
    InvalidTolerance(f64),

    /// Invalid iteration count.
    #[error("invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// Mesh would exceed maximum size.
    #[error("subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },

    /// Scheme selector that has no stencil behind it.
    #[error("unknown subdivision scheme: {0:?}")]
    UnknownScheme(String),

    /// Configuration file could not be parsed or serialized.
    #[error("invalid subdivision config: {details}")]
    ConfigParse { details: String },
}

impl SubdivideError {
    /// Shorthand for an [`SubdivideError::InvalidTopology`] error.
    pub(crate) fn topology(details: impl Into<String>) -> Self {
        Self::InvalidTopology {
            details: details.into(),
        }
    }
}
