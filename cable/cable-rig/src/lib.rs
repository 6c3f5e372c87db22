//! Cable rebuild pipeline.
//!
//! Ties the pieces together for one owning anchor:
//!
//! 1. [`cable_path::PathSampler`] samples every strand of the owner's path
//!    and maps the points into the owner's local space
//! 2. [`cable_tube::TubeMeshBuilder`] extrudes each strand into its own tube
//! 3. The finished [`CableMesh`] is flattened into [`MeshBuffers`] and
//!    handed to a [`MeshSink`] together with an optional [`MaterialHandle`]
//!
//! [`CableRig`] rebuilds from scratch on every call. [`CachedCableRig`]
//! skips rebuilds whose inputs hash the same as last time.
//! [`draw_gizmos`] renders the same samples as debug lines.
//!
//! # Example
//!
//! ```
//! use cable_path::{CableScene, Transform};
//! use cable_rig::{CableRig, CableRigConfig, CapturedMesh};
//!
//! let mut scene = CableScene::new();
//! let a = scene.add_anchor(Transform::identity());
//! let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
//! scene.connect(a, b).unwrap();
//!
//! let config = CableRigConfig::default().with_diameter(0.2);
//! let rig = CableRig::new(&scene, a, config).unwrap();
//!
//! let mut sink = CapturedMesh::default();
//! rig.publish(&mut sink).unwrap();
//! assert_eq!(sink.buffers.vertex_count(), 160);
//! assert_eq!(sink.buffers.triangle_count(), 304);
//! ```
//!
//! # Failure model
//!
//! Invalid configuration is rejected when it is set. Missing targets and
//! empty offset lists only remove the affected strands; an empty mesh is a
//! valid result.
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for [`CableRigConfig`], [`MaterialHandle`] and
//!   the re-exported data model

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod cache;
mod config;
mod error;
mod gizmo;
mod sink;

pub use builder::{CableRig, build_cable_mesh, extrude_sampled};
pub use cache::{CachedCableRig, content_key};
pub use config::CableRigConfig;
pub use error::{RigError, RigResult};
pub use gizmo::{
    ANCHOR_GIZMO_RADIUS, DebugDrawSink, DebugPrimitive, GIZMO_GREEN, GizmoStyle, draw_all_gizmos,
    draw_gizmos,
};
pub use sink::{CapturedMesh, MaterialHandle, MeshSink};

pub use cable_mesh_types::{Aabb, CableMesh, MeshBuffers, Vertex};
pub use cable_path::{
    AnchorGraph, AnchorId, CablePath, CableScene, Connection, Resolution, SampledPath, Strand,
    Transform, TransformProvider,
};
pub use cable_tube::{FrameMode, TubeSettings, UvMode};
