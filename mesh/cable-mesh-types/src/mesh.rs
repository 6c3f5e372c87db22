//! Indexed triangle mesh for generated cables.

use nalgebra::Vector3;

use crate::{Aabb, MeshBuffers, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh in the owning anchor's local space.
///
/// Faces use counter-clockwise winding when viewed from outside, so the
/// right-hand-rule face normal points away from the tube axis.
///
/// # Example
///
/// ```
/// use cable_mesh_types::{CableMesh, Vertex};
///
/// let mut mesh = CableMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
/// mesh.recompute_normals();
///
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.vertices[0].normal.z, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CableMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl CableMesh {
    /// An empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// An empty mesh with room for the given counts.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when there is nothing to render.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Remove all geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }

    /// Append another mesh, offsetting its indices.
    ///
    /// Vertices are never welded: coincident anchor points on different
    /// strands stay separate vertices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn append(&mut self, other: &Self) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Unnormalized face normal (twice the triangle area in magnitude).
    ///
    /// Returns `None` for an out-of-range face index.
    #[must_use]
    pub fn face_normal(&self, face_index: usize) -> Option<Vector3<f64>> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        let v0 = self.vertices.get(i0 as usize)?.position;
        let v1 = self.vertices.get(i1 as usize)?.position;
        let v2 = self.vertices.get(i2 as usize)?.position;
        Some((v1 - v0).cross(&(v2 - v0)))
    }

    /// Recompute per-vertex normals from the triangles.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh
    /// more. Vertices touched only by degenerate faces keep a zero normal.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];

        for face_index in 0..self.faces.len() {
            if let Some(face_normal) = self.face_normal(face_index) {
                for &idx in &self.faces[face_index] {
                    normals[idx as usize] += face_normal;
                }
            }
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal
                .try_normalize(1e-12)
                .unwrap_or_else(Vector3::zeros);
        }
    }

    /// Bounding box of all vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Flatten into renderer-facing buffers.
    #[must_use]
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers::from_mesh(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn quad() -> CableMesh {
        let mut mesh = CableMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 2, 3]);
        mesh
    }

    #[test]
    fn empty_mesh() {
        let mesh = CableMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_empty());
        assert!(mesh.face_normal(0).is_none());
    }

    #[test]
    fn append_offsets_indices() {
        let mut a = quad();
        let b = quad();
        a.append(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.face_count(), 4);
        assert_eq!(a.faces[2], [4, 5, 6]);
        assert_eq!(a.faces[3], [4, 6, 7]);
    }

    #[test]
    fn normals_follow_winding() {
        let mut mesh = quad();
        mesh.recompute_normals();
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal, Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_faces_leave_zero_normal() {
        let mut mesh = CableMesh::new();
        for _ in 0..3 {
            mesh.vertices.push(Vertex::new(Point3::origin()));
        }
        mesh.faces.push([0, 1, 2]);
        mesh.recompute_normals();
        assert!(mesh.vertices.iter().all(|v| !v.has_normal()));
    }

    #[test]
    fn bounds_cover_vertices() {
        let aabb = quad().bounds();
        assert_eq!(aabb.min, Point3::origin());
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut mesh = quad();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }
}
