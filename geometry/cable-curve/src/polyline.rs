//! Helpers over sampled polylines.

use nalgebra::Point3;

/// Cumulative arc length at each point of a polyline.
///
/// The first entry is always `0.0` and the last is the total length.
/// Returns an empty vector for an empty polyline.
///
/// # Example
///
/// ```
/// use cable_curve::cumulative_lengths;
/// use nalgebra::Point3;
///
/// let lengths = cumulative_lengths(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(3.0, 4.0, 0.0),
/// ]);
/// assert_eq!(lengths, vec![0.0, 3.0, 7.0]);
/// ```
#[must_use]
pub fn cumulative_lengths(points: &[Point3<f64>]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;

    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            total += (point - points[i - 1]).norm();
        }
        lengths.push(total);
    }

    lengths
}
