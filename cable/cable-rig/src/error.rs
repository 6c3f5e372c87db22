//! Error types for the rebuild pipeline.

use cable_path::CableError;
use cable_tube::TubeError;
use thiserror::Error;

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;

/// Anything that can stop a rig from being configured or rebuilt.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    /// Invalid tube settings or an oversized mesh.
    #[error(transparent)]
    Tube(#[from] TubeError),

    /// Invalid path configuration or a bad authoring edit.
    #[error(transparent)]
    Cable(#[from] CableError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cable_path::AnchorId;

    #[test]
    fn wraps_both_layers() {
        let err: RigError = TubeError::InvalidDiameter(-1.0).into();
        assert!(matches!(err, RigError::Tube(_)));
        assert!(err.to_string().contains("diameter"));

        let err: RigError = CableError::UnknownAnchor(AnchorId::from_raw(3)).into();
        assert!(matches!(err, RigError::Cable(_)));
        assert!(err.to_string().contains("anchor#3"));
    }
}
