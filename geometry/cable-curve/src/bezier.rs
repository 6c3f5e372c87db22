//! Cubic Bézier evaluation.
//!
//! A cable strand is a single cubic segment running from one anchor to
//! another. The two inner control points come from the tangent offsets
//! stored on the connection.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evaluate a cubic Bézier curve at parameter `t`.
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
///
/// `t` is clamped to `[0, 1]`. The boundaries return `p0` and `p3`
/// exactly rather than going through the weighted sum.
///
/// # Example
///
/// ```
/// use cable_curve::cubic_bezier_point;
/// use nalgebra::Point3;
///
/// let p0 = Point3::new(0.0, 0.0, 0.0);
/// let p1 = Point3::new(0.0, 1.0, 0.0);
/// let p2 = Point3::new(1.0, 1.0, 0.0);
/// let p3 = Point3::new(1.0, 0.0, 0.0);
///
/// assert_eq!(cubic_bezier_point(0.0, p0, p1, p2, p3), p0);
/// assert_eq!(cubic_bezier_point(1.0, p0, p1, p2, p3), p3);
/// ```
#[must_use]
pub fn cubic_bezier_point(
    t: f64,
    p0: Point3<f64>,
    p1: Point3<f64>,
    p2: Point3<f64>,
    p3: Point3<f64>,
) -> Point3<f64> {
    if t <= 0.0 || t.is_nan() {
        return p0;
    }
    if t >= 1.0 {
        return p3;
    }

    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;

    Point3::from(
        p0.coords * (uu * u)
            + p1.coords * (3.0 * uu * t)
            + p2.coords * (3.0 * u * tt)
            + p3.coords * (tt * t),
    )
}

/// A cubic Bézier segment between two cable anchors.
///
/// `p0`/`p3` are the anchor positions, `p1`/`p2` the tangent handles.
///
/// # Example
///
/// ```
/// use cable_curve::CubicBezier;
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 10.0),
///     Point3::new(0.0, 0.0, 10.0),
/// );
///
/// let samples = curve.sample_inclusive(20);
/// assert_eq!(samples.len(), 20);
/// assert_eq!(samples[0], curve.p0);
/// assert_eq!(samples[19], curve.p3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// Start handle.
    pub p1: Point3<f64>,
    /// End handle.
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a curve from its four control points.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Position at parameter `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        cubic_bezier_point(t, self.p0, self.p1, self.p2, self.p3)
    }

    /// Sample `count` points with both endpoints included.
    ///
    /// Point `i` is evaluated at `t = i / (count - 1)`. A `count` below 2
    /// yields just the start point (or nothing for 0); callers validate the
    /// resolution before getting here.
    #[must_use]
    pub fn sample_inclusive(&self, count: usize) -> Vec<Point3<f64>> {
        match count {
            0 => Vec::new(),
            1 => vec![self.p0],
            _ => {
                let last = (count - 1) as f64;
                (0..count).map(|i| self.point_at(i as f64 / last)).collect()
            }
        }
    }
}
