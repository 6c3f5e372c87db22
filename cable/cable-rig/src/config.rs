//! Rig configuration.

use cable_tube::{FrameMode, TubeSettings, UvMode};

use crate::{MaterialHandle, RigResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything about a cable's look that is not part of its path.
///
/// Resolution lives on the [`cable_path::CablePath`] because it shapes the
/// sampled curve; cross-section and material live here.
///
/// # Example
///
/// ```
/// use cable_rig::{CableRigConfig, MaterialHandle};
///
/// let mut config = CableRigConfig::default()
///     .with_diameter(0.2)
///     .with_material(MaterialHandle::from_raw(4));
///
/// assert!(config.set_radial_segments(2).is_err());
/// assert_eq!(config.tube.radial_segments, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CableRigConfig {
    /// Cross-section and shading settings.
    pub tube: TubeSettings,
    /// Material passed through to the mesh sink.
    pub material: Option<MaterialHandle>,
}

impl CableRigConfig {
    /// Replace the tube settings.
    #[must_use]
    pub fn with_tube(mut self, tube: TubeSettings) -> Self {
        self.tube = tube;
        self
    }

    /// Set the cross-section diameter.
    #[must_use]
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.tube.diameter = diameter;
        self
    }

    /// Set the vertices per ring.
    #[must_use]
    pub fn with_radial_segments(mut self, radial_segments: usize) -> Self {
        self.tube.radial_segments = radial_segments;
        self
    }

    /// Set the ring orientation strategy.
    #[must_use]
    pub fn with_frame_mode(mut self, frame_mode: FrameMode) -> Self {
        self.tube.frame_mode = frame_mode;
        self
    }

    /// Set the texture coordinate layout.
    #[must_use]
    pub fn with_uv_mode(mut self, uv_mode: UvMode) -> Self {
        self.tube.uv_mode = uv_mode;
        self
    }

    /// Enable or disable end caps.
    #[must_use]
    pub fn with_caps(mut self, capped: bool) -> Self {
        self.tube.capped = capped;
        self
    }

    /// Set the material handle.
    #[must_use]
    pub fn with_material(mut self, material: MaterialHandle) -> Self {
        self.material = Some(material);
        self
    }

    /// Check the tube settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for an invalid diameter or too few
    /// radial segments.
    pub fn validate(&self) -> RigResult<()> {
        self.tube.validate()?;
        Ok(())
    }

    /// Set the diameter, keeping the old value if the new one is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for a zero, negative or non-finite
    /// diameter.
    pub fn set_diameter(&mut self, diameter: f64) -> RigResult<()> {
        let tube = self.tube.with_diameter(diameter);
        tube.validate()?;
        self.tube = tube;
        Ok(())
    }

    /// Set the vertices per ring, keeping the old value if the new one is
    /// invalid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for fewer than three segments.
    pub fn set_radial_segments(&mut self, radial_segments: usize) -> RigResult<()> {
        let tube = self.tube.with_radial_segments(radial_segments);
        tube.validate()?;
        self.tube = tube;
        Ok(())
    }

    /// Set or clear the material handle.
    pub fn set_material(&mut self, material: Option<MaterialHandle>) {
        self.material = material;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RigError;
    use cable_tube::TubeError;

    #[test]
    fn defaults() {
        let config = CableRigConfig::default();
        assert_eq!(config.tube.diameter, 0.1);
        assert_eq!(config.tube.radial_segments, 8);
        assert_eq!(config.tube.frame_mode, FrameMode::TangentFollowing);
        assert!(!config.tube.capped);
        assert!(config.material.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn setters_reject_and_keep() {
        let mut config = CableRigConfig::default();
        assert_eq!(
            config.set_diameter(-0.5),
            Err(RigError::Tube(TubeError::InvalidDiameter(-0.5)))
        );
        assert!(config.set_diameter(f64::NAN).is_err());
        assert_eq!(config.tube.diameter, 0.1);

        assert!(config.set_diameter(0.3).is_ok());
        assert_eq!(config.tube.diameter, 0.3);

        assert!(config.set_radial_segments(2).is_err());
        assert!(config.set_radial_segments(3).is_ok());
        assert_eq!(config.tube.radial_segments, 3);
    }

    #[test]
    fn builder_chain() {
        let config = CableRigConfig::default()
            .with_radial_segments(16)
            .with_frame_mode(FrameMode::ParallelTransport)
            .with_uv_mode(UvMode::SampleIndex)
            .with_caps(true);
        assert_eq!(config.tube.radial_segments, 16);
        assert_eq!(config.tube.uv_mode, UvMode::SampleIndex);
        assert!(config.tube.capped);
        assert!(config.with_diameter(0.0).validate().is_err());
    }
}
