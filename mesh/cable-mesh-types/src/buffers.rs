//! Flat vertex buffers for handing a mesh to a renderer.

use crate::{Aabb, CableMesh};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Renderer-facing mesh data: parallel attribute arrays plus a flat
/// triangle index list (three indices per triangle).
///
/// Positions and normals are narrowed to `f32`, which is what GPU vertex
/// formats expect. The bounding box stays in `f64` and is computed from
/// the unnarrowed positions.
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
///
/// let buffers = mesh.to_buffers();
/// assert_eq!(buffers.positions.len(), 3);
/// assert_eq!(buffers.indices, vec![0, 1, 2]);
/// assert_eq!(buffers.triangle_count(), 1);
/// assert_eq!(buffers.bounds.max.x, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Texture coordinates, one per vertex.
    pub uvs: Vec<[f32; 2]>,
    /// Unit normals, one per vertex.
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
    /// Bounds of every position. Empty when there are no vertices.
    pub bounds: Aabb,
}

impl MeshBuffers {
    /// Flatten a mesh.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_mesh(mesh: &CableMesh) -> Self {
        let n = mesh.vertices.len();
        let mut positions = Vec::with_capacity(n);
        let mut uvs = Vec::with_capacity(n);
        let mut normals = Vec::with_capacity(n);

        for v in &mesh.vertices {
            positions.push([
                v.position.x as f32,
                v.position.y as f32,
                v.position.z as f32,
            ]);
            uvs.push([v.uv.x as f32, v.uv.y as f32]);
            normals.push([v.normal.x as f32, v.normal.y as f32, v.normal.z as f32]);
        }

        let indices = mesh.faces.iter().flatten().copied().collect();

        Self {
            positions,
            uvs,
            normals,
            indices,
            bounds: mesh.bounds(),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}
