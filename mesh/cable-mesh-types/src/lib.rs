//! Mesh types for generated cable geometry.
//!
//! - [`Vertex`] - Position, normal and texture coordinate
//! - [`CableMesh`] - Indexed triangle mesh with normal recomputation
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`MeshBuffers`] - Flat `f32` attribute arrays for a renderer
//!
//! # Coordinate System
//!
//! Right-handed. Face winding is **counter-clockwise when viewed from
//! outside**, so normals point outward by the right-hand rule.
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for all types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod buffers;
mod mesh;
mod vertex;

pub use bounds::Aabb;
pub use buffers::MeshBuffers;
pub use mesh::CableMesh;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};
