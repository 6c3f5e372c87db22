//! Error types for tube extrusion.

use thiserror::Error;

/// Result type for tube extrusion.
pub type TubeResult<T> = Result<T, TubeError>;

/// Configuration problems that stop a tube from being built.
///
/// Short or degenerate polylines are not errors; they simply produce no
/// geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TubeError {
    /// Diameter is zero, negative or not finite.
    #[error("invalid diameter: {0} (must be positive and finite)")]
    InvalidDiameter(f64),

    /// Too few vertices around the ring.
    #[error("radial segments must be at least {min}, got {actual}")]
    TooFewSegments {
        /// Minimum allowed.
        min: usize,
        /// Requested count.
        actual: usize,
    },

    /// Vertex indices would overflow `u32`.
    #[error("mesh would need {count} vertices, more than u32 indices can address")]
    TooManyVertices {
        /// Vertex count that would have been reached, saturated at
        /// `usize::MAX`.
        count: usize,
    },
}
