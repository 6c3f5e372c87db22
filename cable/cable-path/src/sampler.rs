//! Turning connections into sampled point sequences.
//!
//! Each strand becomes a cubic Bezier from the source anchor to the target
//! anchor, with inner control points at the strand's tangent offsets:
//!
//! ```text
//! p0 = source origin          p1 = source.local_to_world(start_offset)
//! p3 = target origin          p2 = target.local_to_world(end_offset)
//! ```
//!
//! The curve is sampled at `t = i / (resolution - 1)`, so both anchor
//! positions are always included exactly.

use std::ops::Range;

use cable_curve::CubicBezier;
use nalgebra::Point3;
use tracing::debug;

use crate::{AnchorGraph, AnchorId, CablePath, Resolution, Strand, TransformProvider};

/// The Bezier curve for one strand between two anchors.
#[must_use]
pub fn strand_curve<S, T>(source: &S, target: &T, strand: &Strand) -> CubicBezier
where
    S: TransformProvider + ?Sized,
    T: TransformProvider + ?Sized,
{
    CubicBezier::new(
        source.world_position(),
        source.local_to_world(&strand.start_offset),
        target.local_to_world(&strand.end_offset),
        target.world_position(),
    )
}

/// Sample one strand in world space.
///
/// Returns exactly `resolution` points, or none when `target` is `None`.
///
/// # Example
///
/// ```
/// use cable_path::{Resolution, Strand, Transform, sample_strand};
/// use nalgebra::Point3;
///
/// let a = Transform::identity();
/// let b = Transform::from_xyz(0.0, 0.0, 10.0);
/// let points = sample_strand(&a, Some(&b), &Strand::straight(), Resolution::default());
///
/// assert_eq!(points.len(), 20);
/// assert_eq!(points[0], Point3::origin());
/// assert_eq!(points[19], Point3::new(0.0, 0.0, 10.0));
/// ```
#[must_use]
pub fn sample_strand<S, T>(
    source: &S,
    target: Option<&T>,
    strand: &Strand,
    resolution: Resolution,
) -> Vec<Point3<f64>>
where
    S: TransformProvider + ?Sized,
    T: TransformProvider + ?Sized,
{
    match target {
        Some(target) => strand_curve(source, target, strand).sample_inclusive(resolution.get()),
        None => Vec::new(),
    }
}

/// Where one strand's points live inside a [`SampledPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandSpan {
    /// Index of the connection in the owner's path.
    pub connection: usize,
    /// Strand index within the connection.
    pub strand: usize,
    /// Target anchor the strand ends at.
    pub target: AnchorId,
    /// Range into [`SampledPath::points`].
    pub range: Range<usize>,
}

/// All sampled points of a path, concatenated in connection, then strand,
/// then sample order, with a span per strand.
///
/// Strands never share points; consumers extrude each span on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledPath {
    /// Concatenated points.
    pub points: Vec<Point3<f64>>,
    /// One entry per generated strand.
    pub spans: Vec<StrandSpan>,
}

impl SampledPath {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no strand produced points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of strands.
    #[must_use]
    pub fn strand_count(&self) -> usize {
        self.spans.len()
    }

    /// Append one strand's points.
    pub fn push_strand(
        &mut self,
        connection: usize,
        strand: usize,
        target: AnchorId,
        points: &[Point3<f64>],
    ) {
        let start = self.points.len();
        self.points.extend_from_slice(points);
        self.spans.push(StrandSpan {
            connection,
            strand,
            target,
            range: start..self.points.len(),
        });
    }

    /// Points of one span. Empty if the span does not belong to this buffer.
    #[must_use]
    pub fn strand_points(&self, span: &StrandSpan) -> &[Point3<f64>] {
        self.points.get(span.range.clone()).unwrap_or(&[])
    }

    /// Iterate over `(span, points)` pairs.
    pub fn strands(&self) -> impl Iterator<Item = (&StrandSpan, &[Point3<f64>])> + '_ {
        self.spans.iter().map(|s| (s, self.strand_points(s)))
    }

    /// The same buffer mapped into `owner`'s local space.
    #[must_use]
    pub fn to_local<O>(&self, owner: &O) -> Self
    where
        O: TransformProvider + ?Sized,
    {
        Self {
            points: self.points.iter().map(|p| owner.world_to_local(p)).collect(),
            spans: self.spans.clone(),
        }
    }
}

/// Samples anchor paths, resolving targets through an [`AnchorGraph`].
///
/// # Example
///
/// ```
/// use cable_path::{CableScene, PathSampler, Transform};
///
/// let mut scene = CableScene::new();
/// let a = scene.add_anchor(Transform::identity());
/// let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
/// scene.connect(a, b).unwrap();
///
/// let sampled = PathSampler::new(&scene).sample_anchor(a).unwrap();
/// assert_eq!(sampled.points.len(), 20);
/// assert_eq!(sampled.strand_count(), 1);
/// ```
#[derive(Debug)]
pub struct PathSampler<'g, G: ?Sized> {
    graph: &'g G,
}

impl<'g, G: AnchorGraph + ?Sized> PathSampler<'g, G> {
    /// A sampler over `graph`.
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// The graph targets are resolved against.
    #[must_use]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Sample every strand of `path` in world space, with `source` as the
    /// owning anchor.
    ///
    /// Connections without a target, with a target the graph does not
    /// know, or with an empty offset sequence are skipped.
    #[must_use]
    pub fn sample_path<S>(&self, source: &S, path: &CablePath) -> SampledPath
    where
        S: TransformProvider + ?Sized,
    {
        let resolution = path.resolution;
        let mut sampled = SampledPath::new();

        for (index, connection) in path.connections.iter().enumerate() {
            let Some(target_id) = connection.target.filter(|_| connection.is_renderable()) else {
                debug!(
                    connection = index,
                    has_target = connection.target.is_some(),
                    start_offsets = connection.start_offsets.len(),
                    end_offsets = connection.end_offsets.len(),
                    "Connection cannot produce geometry, skipping"
                );
                continue;
            };
            let Some(target) = self.graph.transform(target_id) else {
                debug!(
                    connection = index,
                    target = %target_id,
                    "Target anchor not found, skipping"
                );
                continue;
            };

            for (strand_index, strand) in connection.strands().enumerate() {
                let points = sample_strand(source, Some(&target), &strand, resolution);
                sampled.push_strand(index, strand_index, target_id, &points);
            }
        }

        sampled
    }

    /// Sample anchor `owner`'s path in world space.
    ///
    /// Returns `None` if the graph does not know `owner`.
    #[must_use]
    pub fn sample_anchor(&self, owner: AnchorId) -> Option<SampledPath> {
        let path = self.graph.path(owner)?;
        let transform = self.graph.transform(owner)?;
        Some(self.sample_path(&transform, path))
    }

    /// Sample anchor `owner`'s path in its own local space, ready for
    /// extrusion.
    #[must_use]
    pub fn sample_anchor_local(&self, owner: AnchorId) -> Option<SampledPath> {
        let path = self.graph.path(owner)?;
        let transform = self.graph.transform(owner)?;
        Some(self.sample_path(&transform, path).to_local(&transform))
    }
}
