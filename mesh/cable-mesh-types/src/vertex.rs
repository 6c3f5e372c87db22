//! Mesh vertices.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tube vertex: position, shading normal and texture coordinate.
///
/// Normals start out zeroed and are filled in by
/// [`CableMesh::recompute_normals`](crate::CableMesh::recompute_normals)
/// once the triangles exist.
///
/// # Example
///
/// ```
/// use cable_mesh_types::{Vertex, Point3, Vector2};
///
/// let v = Vertex::with_uv(Point3::new(1.0, 0.0, 0.0), Vector2::new(0.25, 2.0));
/// assert_eq!(v.uv.x, 0.25);
/// assert!(!v.has_normal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in the owning anchor's local space.
    pub position: Point3<f64>,
    /// Unit normal, or zero when not yet computed.
    pub normal: Vector3<f64>,
    /// Texture coordinate (u around the ring, v along the strand).
    pub uv: Vector2<f64>,
}

impl Vertex {
    /// Vertex with position only.
    #[inline]
    #[must_use]
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            uv: Vector2::zeros(),
        }
    }

    /// Vertex from raw coordinates.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Vertex with position and texture coordinate.
    #[inline]
    #[must_use]
    pub fn with_uv(position: Point3<f64>, uv: Vector2<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            uv,
        }
    }

    /// Whether a non-zero normal has been assigned.
    #[inline]
    #[must_use]
    pub fn has_normal(&self) -> bool {
        self.normal.norm_squared() > 0.0
    }
}
