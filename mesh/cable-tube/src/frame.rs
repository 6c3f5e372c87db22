//! Ring orientation along a sampled strand.
//!
//! Two strategies are available:
//!
//! - [`FrameMode::TangentFollowing`] orients each ring independently so its
//!   forward axis follows the local tangent, keeping world `+Y` as "up".
//!   Cheap and predictable, but rings can twist where the strand runs
//!   close to vertical.
//! - [`FrameMode::ParallelTransport`] carries the first ring's orientation
//!   along the strand with the minimal rotation at each step, which removes
//!   that twist.
//!
//! Both produce one frame per sample point.

use nalgebra::{Point3, Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How ring orientations are chosen along a strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameMode {
    /// Per-point look rotation towards the next sample, world `+Y` up.
    #[default]
    TangentFollowing,
    /// Rotation-minimizing frames propagated from the first point.
    ParallelTransport,
}

/// An orthonormal frame at a sample point.
///
/// `binormal = tangent × normal`. The ring at this point spans the
/// normal/binormal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Forward direction along the strand.
    pub tangent: Vector3<f64>,
    /// First ring axis (angle 0).
    pub normal: Vector3<f64>,
    /// Second ring axis (angle π/2).
    pub binormal: Vector3<f64>,
}

impl Frame {
    /// Look rotation: canonical `+Z` mapped onto `tangent`, with `up`
    /// kept as close to the ring's second axis as possible.
    ///
    /// When `tangent` is parallel to `up` the look rotation is singular.
    /// The previous frame's normal (projected onto the ring plane) is used
    /// instead, and failing that an arbitrary perpendicular.
    #[must_use]
    pub fn look_along(tangent: Vector3<f64>, up: Vector3<f64>, previous: Option<&Self>) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(Vector3::z());

        let normal = up
            .cross(&tangent)
            .try_normalize(1e-9)
            .or_else(|| {
                previous.and_then(|prev| {
                    (prev.normal - tangent * tangent.dot(&prev.normal)).try_normalize(1e-9)
                })
            })
            .unwrap_or_else(|| find_perpendicular(tangent));

        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Unit offset from the ring centre at `angle` radians.
    #[inline]
    #[must_use]
    pub fn radial(&self, angle: f64) -> Vector3<f64> {
        self.normal * angle.cos() + self.binormal * angle.sin()
    }
}

/// Pick a unit vector perpendicular to `v`.
fn find_perpendicular(v: Vector3<f64>) -> Vector3<f64> {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());

    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or(Vector3::y())
}

/// Forward direction at every sample.
///
/// Sample `i` looks towards sample `i + 1`; the last sample reuses the
/// direction of the final segment. Zero-length segments borrow the
/// previous valid direction (or the next one, at the start of the
/// strand). A strand with no valid direction at all points along `+Z`.
#[must_use]
pub fn sample_tangents(points: &[Point3<f64>]) -> Vec<Vector3<f64>> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let raw: Vec<Option<Vector3<f64>>> = (0..n)
        .map(|i| {
            let (a, b) = if i + 1 < n { (i, i + 1) } else { (i - 1, i) };
            (points[b] - points[a]).try_normalize(f64::EPSILON)
        })
        .collect();

    let first_valid = raw.iter().flatten().next().copied().unwrap_or(Vector3::z());

    let mut tangents = Vec::with_capacity(n);
    let mut last = first_valid;
    for dir in raw {
        if let Some(dir) = dir {
            last = dir;
        }
        tangents.push(last);
    }
    tangents
}

/// Tangent-following frames with world `+Y` as up.
#[must_use]
pub fn tangent_following_frames(points: &[Point3<f64>]) -> Vec<Frame> {
    let tangents = sample_tangents(points);
    let mut frames: Vec<Frame> = Vec::with_capacity(tangents.len());

    for tangent in tangents {
        let frame = Frame::look_along(tangent, Vector3::y(), frames.last());
        frames.push(frame);
    }

    frames
}

/// Rotation-minimizing frames.
///
/// The first frame is the look rotation of the first tangent, so a
/// straight strand gets the same rings in both modes. Interior tangents
/// average the incoming and outgoing directions.
#[must_use]
pub fn parallel_transport_frames(points: &[Point3<f64>]) -> Vec<Frame> {
    let tangents = sample_tangents(points);
    let Some(&first) = tangents.first() else {
        return Vec::new();
    };

    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame::look_along(first, Vector3::y(), None));

    let last = tangents.len() - 1;
    for i in 1..tangents.len() {
        let prev = frames[i - 1];
        let tangent = if i < last {
            (tangents[i - 1] + tangents[i])
                .try_normalize(f64::EPSILON)
                .unwrap_or(tangents[i])
        } else {
            tangents[i]
        };
        frames.push(transport(&prev, tangent));
    }

    frames
}

/// Frames for `points` using the chosen strategy.
#[must_use]
pub fn compute_frames(points: &[Point3<f64>], mode: FrameMode) -> Vec<Frame> {
    match mode {
        FrameMode::TangentFollowing => tangent_following_frames(points),
        FrameMode::ParallelTransport => parallel_transport_frames(points),
    }
}

/// Carry `prev` onto `new_tangent` with the smallest rotation.
fn transport(prev: &Frame, new_tangent: Vector3<f64>) -> Frame {
    let new_tangent = new_tangent
        .try_normalize(f64::EPSILON)
        .unwrap_or(prev.tangent);

    let axis = prev.tangent.cross(&new_tangent);
    if axis.norm() < f64::EPSILON {
        // Parallel. A full reversal has no unique minimal rotation; keep
        // the normal and flip the binormal so the frame stays right-handed.
        let normal = prev.normal;
        return Frame {
            tangent: new_tangent,
            normal,
            binormal: new_tangent.cross(&normal),
        };
    }

    let angle = prev.tangent.dot(&new_tangent).clamp(-1.0, 1.0).acos();
    let rotation = Rotation3::new(axis.normalize() * angle);
    let normal = rotation * prev.normal;

    Frame {
        tangent: new_tangent,
        normal,
        binormal: new_tangent.cross(&normal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, UnitQuaternion};

    fn assert_orthonormal(frame: &Frame) {
        assert_relative_eq!(frame.tangent.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.normal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.binormal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.normal), 0.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.binormal), 0.0, epsilon = 1e-10);
        assert_relative_eq!(
            frame.tangent.cross(&frame.normal),
            frame.binormal,
            epsilon = 1e-10
        );
    }

    fn line_z(n: usize) -> Vec<Point3<f64>> {
        (0..n).map(|i| Point3::new(0.0, 0.0, i as f64)).collect()
    }

    #[test]
    fn look_along_z_matches_axes() {
        let frame = Frame::look_along(Vector3::z(), Vector3::y(), None);
        assert_relative_eq!(frame.normal, Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frame.binormal, Vector3::y(), epsilon = 1e-12);
        assert_orthonormal(&frame);
    }

    #[test]
    fn look_along_vertical_uses_previous() {
        let prev = Frame::look_along(Vector3::new(1.0, 0.1, 0.0), Vector3::y(), None);
        let frame = Frame::look_along(Vector3::y(), Vector3::y(), Some(&prev));
        assert_orthonormal(&frame);
        assert!(frame.normal.dot(&prev.normal) > 0.9);
    }

    #[test]
    fn look_along_vertical_without_previous() {
        let frame = Frame::look_along(-Vector3::y(), Vector3::y(), None);
        assert_orthonormal(&frame);
    }

    #[test]
    fn radial_matches_ring_rotation() {
        let frame = Frame::look_along(Vector3::new(1.0, 2.0, 3.0), Vector3::y(), None);
        let m = Matrix3::from_columns(&[frame.normal, frame.binormal, frame.tangent]);
        let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m));
        assert_relative_eq!(q * Vector3::z(), frame.tangent, epsilon = 1e-10);
        let angle = 1.1_f64;
        let ring = q * Vector3::new(angle.cos(), angle.sin(), 0.0);
        assert_relative_eq!(ring, frame.radial(angle), epsilon = 1e-10);
    }

    #[test]
    fn degenerate_tangent_still_orthonormal() {
        for t in [Vector3::zeros(), Vector3::y(), -Vector3::y()] {
            assert_orthonormal(&Frame::look_along(t, Vector3::y(), None));
        }
    }

    #[test]
    fn tangents_last_point_reuses_previous_direction() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let tangents = sample_tangents(&points);
        assert_eq!(tangents.len(), 3);
        assert_relative_eq!(tangents[0], Vector3::x());
        assert_relative_eq!(tangents[1], Vector3::y());
        assert_relative_eq!(tangents[2], Vector3::y());
    }

    #[test]
    fn tangents_skip_coincident_points() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let points = [p, p, Point3::new(0.0, 0.0, 2.0), Point3::new(0.0, 0.0, 2.0)];
        let tangents = sample_tangents(&points);
        for t in tangents {
            assert_relative_eq!(t, Vector3::z());
        }
    }

    #[test]
    fn tangents_of_collapsed_strand_default_to_z() {
        let p = Point3::new(3.0, 3.0, 3.0);
        let tangents = sample_tangents(&[p, p, p]);
        assert_eq!(tangents, vec![Vector3::z(); 3]);
    }

    #[test]
    fn too_short_gives_no_frames() {
        assert!(tangent_following_frames(&[]).is_empty());
        assert!(parallel_transport_frames(&[Point3::origin()]).is_empty());
    }

    #[test]
    fn modes_agree_on_straight_line() {
        let points = line_z(6);
        let a = tangent_following_frames(&points);
        let b = parallel_transport_frames(&points);
        assert_eq!(a.len(), 6);
        for (fa, fb) in a.iter().zip(&b) {
            assert_relative_eq!(fa.normal, fb.normal, epsilon = 1e-10);
            assert_relative_eq!(fa.tangent, fb.tangent, epsilon = 1e-10);
        }
    }

    #[test]
    fn parallel_transport_quarter_turn() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let frames = parallel_transport_frames(&points);
        assert_eq!(frames.len(), 3);
        assert!(frames[0].tangent.x > 0.5);
        assert!(frames[2].tangent.y > 0.5);
        for f in &frames {
            assert_orthonormal(f);
        }
    }

    #[test]
    fn parallel_transport_survives_reversal() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        for f in parallel_transport_frames(&points) {
            assert_orthonormal(&f);
        }
    }

    #[test]
    fn parallel_transport_through_vertical_does_not_flip() {
        // Up, over, and down again: the look rotation is singular on the
        // vertical stretches, transport is not.
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let frames = parallel_transport_frames(&points);
        for pair in frames.windows(2) {
            assert_orthonormal(&pair[1]);
            assert!(pair[0].normal.dot(&pair[1].normal) > -1e-9);
        }
    }
}
