//! Anchor transforms.
//!
//! The sampler only needs three queries from a transform, captured by
//! [`TransformProvider`]. [`Transform`] is the built-in implementation
//! (translation, rotation and non-uniform scale); hosts with their own scene
//! graph can implement the trait on their node type instead.

use nalgebra::{Isometry3, Point3, Unit, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale components closer to zero than this collapse the axis.
const MIN_SCALE: f64 = 1e-12;

/// World-space queries the cable pipeline makes against an anchor.
///
/// Implementations must be affine: `local_to_world` is a linear map followed
/// by a translation, and `world_to_local` inverts it where it can. Memoized
/// rebuilds identify the mapping by where it sends the origin and the three
/// unit axes, which is only enough for an affine map.
pub trait TransformProvider {
    /// Anchor origin in world space.
    fn world_position(&self) -> Point3<f64>;

    /// Map a point in the anchor's local space to world space.
    fn local_to_world(&self, local: &Vector3<f64>) -> Point3<f64>;

    /// Map a world-space point into the anchor's local space.
    fn world_to_local(&self, world: &Point3<f64>) -> Point3<f64>;
}

/// Translation, rotation and per-axis scale.
///
/// Local points are scaled, then rotated, then translated.
///
/// # Example
///
/// ```
/// use cable_path::{Transform, TransformProvider};
/// use nalgebra::{Point3, Vector3};
///
/// let t = Transform::from_translation(Vector3::new(0.0, 0.0, 10.0))
///     .with_scale(Vector3::new(2.0, 2.0, 2.0));
///
/// let world = t.local_to_world(&Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(world, Point3::new(2.0, 0.0, 10.0));
/// assert_eq!(t.world_to_local(&world), Point3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// World position of the local origin.
    pub translation: Vector3<f64>,
    /// Orientation.
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale, applied before rotation.
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Translation to `(x, y, z)`.
    #[must_use]
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::from_translation(Vector3::new(x, y, z))
    }

    /// Set the rotation (builder pattern).
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the rotation from axis-angle (builder pattern).
    ///
    /// A zero axis leaves the rotation unchanged.
    #[must_use]
    pub fn with_axis_angle(mut self, axis: Vector3<f64>, angle: f64) -> Self {
        if let Some(axis) = Unit::try_new(axis, 1e-10) {
            self.rotation = UnitQuaternion::from_axis_angle(&axis, angle);
        }
        self
    }

    /// Set the per-axis scale (builder pattern).
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Rigid part of the transform, ignoring scale.
    #[must_use]
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.translation.into(), self.rotation)
    }
}

impl TransformProvider for Transform {
    fn world_position(&self) -> Point3<f64> {
        Point3::from(self.translation)
    }

    fn local_to_world(&self, local: &Vector3<f64>) -> Point3<f64> {
        Point3::from(self.translation + self.rotation * local.component_mul(&self.scale))
    }

    fn world_to_local(&self, world: &Point3<f64>) -> Point3<f64> {
        let unrotated = self.rotation.inverse() * (world.coords - self.translation);
        Point3::from(unrotated.zip_map(&self.scale, |v, s| {
            if s.abs() < MIN_SCALE { 0.0 } else { v / s }
        }))
    }
}

impl TransformProvider for Isometry3<f64> {
    fn world_position(&self) -> Point3<f64> {
        Point3::from(self.translation.vector)
    }

    fn local_to_world(&self, local: &Vector3<f64>) -> Point3<f64> {
        self * Point3::from(*local)
    }

    fn world_to_local(&self, world: &Point3<f64>) -> Point3<f64> {
        self.inverse_transform_point(world)
    }
}

impl<T: TransformProvider + ?Sized> TransformProvider for &T {
    fn world_position(&self) -> Point3<f64> {
        (**self).world_position()
    }

    fn local_to_world(&self, local: &Vector3<f64>) -> Point3<f64> {
        (**self).local_to_world(local)
    }

    fn world_to_local(&self, world: &Point3<f64>) -> Point3<f64> {
        (**self).world_to_local(world)
    }
}
