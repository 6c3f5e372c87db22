//! Error types for cable path editing.

use thiserror::Error;

use crate::AnchorId;

/// Result type for cable path operations.
pub type CableResult<T> = Result<T, CableError>;

/// Errors raised by configuration and authoring edits.
///
/// Geometry generation itself never fails on missing data: an unset or
/// unknown target just means the strand produces nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CableError {
    /// Resolution below the two samples a segment needs.
    #[error("resolution must be at least {min}, got {actual}")]
    InvalidResolution {
        /// Minimum allowed.
        min: usize,
        /// Requested value.
        actual: usize,
    },

    /// Connection index past the end of the path.
    #[error("connection {index} out of range (path has {len})")]
    ConnectionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of connections.
        len: usize,
    },

    /// Strand (offset pair) index past the end of an offset sequence.
    #[error("strand {index} out of range on connection {connection} (has {len})")]
    StrandOutOfRange {
        /// Connection index.
        connection: usize,
        /// Requested strand index.
        index: usize,
        /// Length of the offset sequence that was indexed.
        len: usize,
    },

    /// Anchor id not present in the scene.
    #[error("unknown anchor {0}")]
    UnknownAnchor(AnchorId),
}

impl CableError {
    /// Check if this is a configuration error (as opposed to a bad edit).
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidResolution { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CableError::InvalidResolution { min: 2, actual: 1 };
        assert!(err.to_string().contains("at least 2"));
        assert!(err.is_configuration());

        let err = CableError::ConnectionOutOfRange { index: 4, len: 2 };
        assert!(err.to_string().contains("connection 4"));
        assert!(!err.is_configuration());

        let err = CableError::UnknownAnchor(AnchorId::from_raw(7));
        assert!(err.to_string().contains("anchor#7"));
    }
}
