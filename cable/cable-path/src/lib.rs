//! Cable data model and path sampling.
//!
//! An [`Anchor`] owns a [`CablePath`]: its outgoing [`Connection`]s plus a
//! sampling [`Resolution`]. Each connection targets another anchor by
//! [`AnchorId`] and carries one or more [`Strand`]s, each a pair of tangent
//! offsets that shape a cubic Bézier between the two anchors.
//!
//! [`PathSampler`] resolves targets through an [`AnchorGraph`] and turns a
//! path into a [`SampledPath`]: every strand's points concatenated, with a
//! [`StrandSpan`] recording where each strand lives.
//!
//! # Missing references
//!
//! A connection with no target, a target the graph cannot resolve, or an
//! empty offset sequence produces no points. This is never an error; the
//! remaining connections still sample normally.
//!
//! # Example
//!
//! ```
//! use cable_path::{CableScene, PathSampler, Strand, Transform};
//! use nalgebra::Vector3;
//!
//! let mut scene = CableScene::new();
//! let plug = scene.add_anchor(Transform::identity());
//! let socket = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
//!
//! let conn = scene.connect(plug, socket).unwrap();
//! scene
//!     .path_mut(plug)
//!     .unwrap()
//!     .add_strand(conn, Strand {
//!         start_offset: Vector3::new(0.5, -2.0, 0.0),
//!         end_offset: Vector3::new(0.5, -2.0, 0.0),
//!     })
//!     .unwrap();
//!
//! let sampled = PathSampler::new(&scene).sample_anchor(plug).unwrap();
//! assert_eq!(sampled.strand_count(), 2);
//! assert_eq!(sampled.points.len(), 40);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for the data model and [`CableScene`]

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod anchor;
mod connection;
mod error;
mod graph;
mod path;
mod sampler;
mod transform;

pub use anchor::{Anchor, AnchorId};
pub use connection::{Connection, Strand};
pub use error::{CableError, CableResult};
pub use graph::{AnchorGraph, CableScene};
pub use path::{CablePath, DEFAULT_RESOLUTION, MIN_RESOLUTION, Resolution};
pub use sampler::{PathSampler, SampledPath, StrandSpan, sample_strand, strand_curve};
pub use transform::{Transform, TransformProvider};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
