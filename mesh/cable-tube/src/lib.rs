//! Tube meshes around sampled cable strands.
//!
//! Each strand is a polyline in the owning anchor's local space. The
//! builder places a ring of vertices at every sample, orients it with a
//! per-point [`Frame`], stitches consecutive rings into quads and finally
//! recomputes smooth normals from the triangles.
//!
//! # Features
//!
//! - **Independent strands**: [`TubeMeshBuilder`] appends one tube per
//!   strand into a shared mesh without welding vertices
//! - **Frame modes**: tangent-following look rotation or parallel transport
//! - **Seamless UVs**: `u` mirrored around the ring, `v` by arc length or
//!   sample index
//! - **End caps**: optional triangle fans at both ends
//!
//! # Quick Start
//!
//! ```
//! use cable_tube::{TubeSettings, tube_from_polyline};
//! use nalgebra::Point3;
//!
//! let points: Vec<_> = (0..20)
//!     .map(|i| Point3::new(0.0, 0.0, f64::from(i) * 10.0 / 19.0))
//!     .collect();
//!
//! let settings = TubeSettings::default()
//!     .with_diameter(0.2)
//!     .with_radial_segments(8);
//!
//! let mesh = tube_from_polyline(&points, &settings).unwrap();
//! assert_eq!(mesh.vertex_count(), 20 * 8);
//! assert_eq!(mesh.face_count(), 19 * 8 * 2);
//! ```
//!
//! # Known limitation
//!
//! [`FrameMode::TangentFollowing`] keeps world `+Y` as up, so rings can
//! twist where a strand passes close to vertical. Use
//! [`FrameMode::ParallelTransport`] when that matters; vertex and face
//! counts are identical in both modes.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

mod error;
mod frame;
mod tube;

pub use error::{TubeError, TubeResult};
pub use frame::{
    Frame, FrameMode, compute_frames, parallel_transport_frames, sample_tangents,
    tangent_following_frames,
};
pub use tube::{MIN_RADIAL_SEGMENTS, TubeMeshBuilder, TubeSettings, UvMode, tube_from_polyline};
