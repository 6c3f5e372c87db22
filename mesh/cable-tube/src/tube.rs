//! Tube extrusion along sampled strands.
//!
//! A ring of `radial_segments` vertices is placed at every sample point,
//! oriented by the frame at that point, and consecutive rings are stitched
//! into quads of two triangles each.

use std::f64::consts::{PI, TAU};

use cable_curve::cumulative_lengths;
use cable_mesh_types::{CableMesh, Vertex};
use nalgebra::{Point3, Vector2};
use tracing::{debug, warn};

use crate::error::{TubeError, TubeResult};
use crate::frame::{FrameMode, compute_frames};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest ring that still encloses area.
pub const MIN_RADIAL_SEGMENTS: usize = 3;

/// Diameter used when a non-finite or non-positive value is clamped.
const MIN_DIAMETER: f64 = 1e-6;

/// How texture coordinates run along the strand.
///
/// Around the ring `u` rises from 0 at angle 0 to 1 at angle π and falls
/// back again, so the last vertex of a ring meets the first without a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UvMode {
    /// `v` is the distance along the strand divided by the tube's
    /// circumference, so a square texture stays square.
    #[default]
    ArcLength,
    /// `v` is the sample index normalized to `[0, 1]` per strand.
    SampleIndex,
}

/// Cross-section and shading settings for tube extrusion.
///
/// # Example
///
/// ```
/// use cable_tube::{FrameMode, TubeSettings};
///
/// let settings = TubeSettings::default()
///     .with_diameter(0.2)
///     .with_radial_segments(12)
///     .with_frame_mode(FrameMode::ParallelTransport);
///
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.radius(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeSettings {
    /// Cross-section diameter.
    pub diameter: f64,
    /// Vertices per ring.
    pub radial_segments: usize,
    /// Ring orientation strategy.
    pub frame_mode: FrameMode,
    /// Texture coordinate layout.
    pub uv_mode: UvMode,
    /// Close both ends of every strand with a triangle fan.
    pub capped: bool,
}

impl Default for TubeSettings {
    fn default() -> Self {
        Self {
            diameter: 0.1,
            radial_segments: 8,
            frame_mode: FrameMode::TangentFollowing,
            uv_mode: UvMode::ArcLength,
            capped: false,
        }
    }
}

impl TubeSettings {
    /// Set the diameter.
    #[must_use]
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    /// Set the number of vertices per ring.
    #[must_use]
    pub fn with_radial_segments(mut self, radial_segments: usize) -> Self {
        self.radial_segments = radial_segments;
        self
    }

    /// Set the ring orientation strategy.
    #[must_use]
    pub fn with_frame_mode(mut self, frame_mode: FrameMode) -> Self {
        self.frame_mode = frame_mode;
        self
    }

    /// Set the texture coordinate layout.
    #[must_use]
    pub fn with_uv_mode(mut self, uv_mode: UvMode) -> Self {
        self.uv_mode = uv_mode;
        self
    }

    /// Enable or disable end caps.
    #[must_use]
    pub fn with_caps(mut self, capped: bool) -> Self {
        self.capped = capped;
        self
    }

    /// Half the diameter.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Check the settings can reach the geometry stage.
    ///
    /// # Errors
    ///
    /// - [`TubeError::InvalidDiameter`] for a zero, negative or non-finite
    ///   diameter
    /// - [`TubeError::TooFewSegments`] for fewer than three radial segments
    pub fn validate(&self) -> TubeResult<()> {
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(TubeError::InvalidDiameter(self.diameter));
        }
        if self.radial_segments < MIN_RADIAL_SEGMENTS {
            return Err(TubeError::TooFewSegments {
                min: MIN_RADIAL_SEGMENTS,
                actual: self.radial_segments,
            });
        }
        Ok(())
    }

    /// Copy of the settings with invalid values pulled to the nearest
    /// valid one.
    #[must_use]
    pub fn clamped(self) -> Self {
        let mut out = self;
        if out.radial_segments < MIN_RADIAL_SEGMENTS {
            warn!(
                requested = out.radial_segments,
                clamped = MIN_RADIAL_SEGMENTS,
                "Radial segments below minimum, clamping"
            );
            out.radial_segments = MIN_RADIAL_SEGMENTS;
        }
        if !out.diameter.is_finite() || out.diameter <= 0.0 {
            let clamped = if out.diameter.is_infinite() && out.diameter > 0.0 {
                f64::MAX
            } else {
                MIN_DIAMETER
            };
            warn!(requested = out.diameter, clamped, "Invalid diameter, clamping");
            out.diameter = clamped;
        }
        out
    }
}

/// Accumulates independent tubes, one per strand, into a single mesh.
///
/// Strands never share vertices, even where they start at the same
/// anchor.
///
/// # Example
///
/// ```
/// use cable_tube::{TubeMeshBuilder, TubeSettings};
/// use nalgebra::Point3;
///
/// let settings = TubeSettings::default().with_diameter(0.2).with_radial_segments(8);
/// let mut builder = TubeMeshBuilder::new(settings).unwrap();
///
/// let strand: Vec<_> = (0..20)
///     .map(|i| Point3::new(0.0, 0.0, f64::from(i) * 10.0 / 19.0))
///     .collect();
/// builder.add_strand(&strand).unwrap();
///
/// let mesh = builder.finish();
/// assert_eq!(mesh.vertex_count(), 160);
/// assert_eq!(mesh.face_count(), 304);
/// ```
#[derive(Debug, Clone)]
pub struct TubeMeshBuilder {
    settings: TubeSettings,
    mesh: CableMesh,
    strands: usize,
}

impl TubeMeshBuilder {
    /// Start an empty mesh.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`TubeSettings::validate`].
    pub fn new(settings: TubeSettings) -> TubeResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            mesh: CableMesh::new(),
            strands: 0,
        })
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &TubeSettings {
        &self.settings
    }

    /// Number of strands that produced geometry so far.
    #[must_use]
    pub fn strand_count(&self) -> usize {
        self.strands
    }

    /// Extrude one strand and append it.
    ///
    /// Returns the number of rings added: zero for fewer than two points,
    /// otherwise one per point.
    ///
    /// # Errors
    ///
    /// [`TubeError::TooManyVertices`] if the mesh would outgrow `u32`
    /// indices, or the vertex or face count overflows `usize`. Nothing is
    /// appended in that case.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_strand(&mut self, points: &[Point3<f64>]) -> TubeResult<usize> {
        if points.len() < 2 {
            debug!(points = points.len(), "Strand too short for a tube, skipping");
            return Ok(0);
        }

        let segs = self.settings.radial_segments;
        let caps = if self.settings.capped { 2 } else { 0 };
        let added = points
            .len()
            .checked_mul(segs)
            .and_then(|n| n.checked_add(caps));
        let total = added.and_then(|n| n.checked_add(self.mesh.vertices.len()));
        let faces = (points.len() - 1)
            .checked_mul(segs)
            .and_then(|n| n.checked_mul(2))
            .and_then(|n| caps.checked_mul(segs).and_then(|c| n.checked_add(c)));
        let (Some(added), Some(total), Some(faces)) = (added, total, faces) else {
            return Err(TubeError::TooManyVertices { count: usize::MAX });
        };
        if u32::try_from(total).is_err() {
            return Err(TubeError::TooManyVertices { count: total });
        }

        let frames = compute_frames(points, self.settings.frame_mode);
        let v_coords = self.v_coords(points);
        let base = self.mesh.vertices.len();
        let radius = self.settings.radius();

        self.mesh.vertices.reserve(added);
        self.mesh.faces.reserve(faces);

        for ((point, frame), &v) in points.iter().zip(&frames).zip(&v_coords) {
            for j in 0..segs {
                let angle = TAU * j as f64 / segs as f64;
                let position = point + frame.radial(angle) * radius;
                self.mesh
                    .vertices
                    .push(Vertex::with_uv(position, Vector2::new(ring_u(j, segs), v)));
            }
        }

        for ring in 0..points.len() - 1 {
            let ring_start = base + ring * segs;
            for j in 0..segs {
                let curr = (ring_start + j) as u32;
                let next_seg = (ring_start + (j + 1) % segs) as u32;
                let next_ring = curr + segs as u32;
                let next_both = next_seg + segs as u32;

                self.mesh.faces.push([curr, next_seg, next_ring]);
                self.mesh.faces.push([next_seg, next_both, next_ring]);
            }
        }

        if self.settings.capped {
            let last = points.len() - 1;
            self.add_cap(points[0], v_coords[0], base, true);
            self.add_cap(points[last], v_coords[last], base + last * segs, false);
        }

        self.strands += 1;
        Ok(points.len())
    }

    /// Recompute normals and hand back the mesh.
    #[must_use]
    pub fn finish(mut self) -> CableMesh {
        self.mesh.recompute_normals();
        self.mesh
    }

    fn v_coords(&self, points: &[Point3<f64>]) -> Vec<f64> {
        match self.settings.uv_mode {
            UvMode::ArcLength => {
                let circumference = PI * self.settings.diameter;
                cumulative_lengths(points)
                    .into_iter()
                    .map(|len| len / circumference)
                    .collect()
            }
            UvMode::SampleIndex => {
                let last = (points.len() - 1) as f64;
                (0..points.len()).map(|i| i as f64 / last).collect()
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_cap(&mut self, center: Point3<f64>, v: f64, ring_start: usize, is_start: bool) {
        let segs = self.settings.radial_segments;
        let center_idx = self.mesh.vertices.len() as u32;
        self.mesh
            .vertices
            .push(Vertex::with_uv(center, Vector2::new(0.5, v)));

        for j in 0..segs {
            let curr = (ring_start + j) as u32;
            let next = (ring_start + (j + 1) % segs) as u32;
            // Start cap faces backwards along the strand, end cap forwards.
            if is_start {
                self.mesh.faces.push([center_idx, next, curr]);
            } else {
                self.mesh.faces.push([center_idx, curr, next]);
            }
        }
    }
}

/// `u` for ring vertex `j`, mirrored so it is continuous across the seam.
fn ring_u(j: usize, segs: usize) -> f64 {
    let s = 2.0 * j as f64 / segs as f64;
    1.0 - (1.0 - s).abs()
}

/// Extrude a single polyline into a tube.
///
/// Fewer than two points give an empty mesh.
///
/// # Errors
///
/// Returns an error for invalid settings or an index overflow.
///
/// # Example
///
/// ```
/// use cable_tube::{TubeSettings, tube_from_polyline};
/// use nalgebra::Point3;
///
/// let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0)];
/// let mesh = tube_from_polyline(&points, &TubeSettings::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 2 * 8);
/// assert_eq!(mesh.face_count(), 8 * 2);
/// ```
pub fn tube_from_polyline(points: &[Point3<f64>], settings: &TubeSettings) -> TubeResult<CableMesh> {
    let mut builder = TubeMeshBuilder::new(*settings)?;
    builder.add_strand(points)?;
    Ok(builder.finish())
}
