//! Curve math for cable paths.
//!
//! Every cable strand is a single cubic Bézier segment between two anchors.
//! This crate holds the pure evaluation side of that:
//!
//! - [`cubic_bezier_point`] - The Bernstein-form evaluator
//! - [`CubicBezier`] - A segment with an inclusive sampling helper
//! - [`cumulative_lengths`] - Arc length over samples
//!
//! # Example
//!
//! ```
//! use cable_curve::{CubicBezier, cumulative_lengths};
//! use nalgebra::Point3;
//!
//! let strand = CubicBezier::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, -1.0, 2.0),
//!     Point3::new(0.0, -1.0, 8.0),
//!     Point3::new(0.0, 0.0, 10.0),
//! );
//!
//! let samples = strand.sample_inclusive(20);
//! let lengths = cumulative_lengths(&samples);
//! assert!(lengths[19] > 10.0);
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, unit-agnostic, `f64` throughout.
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for [`CubicBezier`]

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::cast_precision_loss, clippy::many_single_char_names)]

mod bezier;
mod polyline;

pub use bezier::{CubicBezier, cubic_bezier_point};
pub use polyline::cumulative_lengths;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
