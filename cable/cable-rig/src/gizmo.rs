//! Authoring feedback: anchor markers and strand polylines.
//!
//! Gizmos are drawn from the same world-space samples the mesh is built
//! from, so what the editor shows is exactly what gets extruded.

use cable_path::{AnchorGraph, AnchorId, PathSampler, TransformProvider};
use nalgebra::Point3;
use tracing::debug;

/// Radius of the sphere drawn at an anchor.
pub const ANCHOR_GIZMO_RADIUS: f64 = 0.06;

/// Default gizmo color (opaque green).
pub const GIZMO_GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Appearance of debug gizmos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoStyle {
    /// RGBA color for spheres and lines.
    pub color: [f32; 4],
    /// Radius of anchor spheres.
    pub anchor_radius: f64,
}

impl Default for GizmoStyle {
    fn default() -> Self {
        Self {
            color: GIZMO_GREEN,
            anchor_radius: ANCHOR_GIZMO_RADIUS,
        }
    }
}

/// Receives debug primitives in world space.
pub trait DebugDrawSink {
    /// Draw a solid sphere.
    fn sphere(&mut self, center: Point3<f64>, radius: f64, color: [f32; 4]);

    /// Draw a line segment.
    fn line(&mut self, from: Point3<f64>, to: Point3<f64>, color: [f32; 4]);
}

/// A recorded debug primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugPrimitive {
    /// From [`DebugDrawSink::sphere`].
    Sphere {
        /// Center.
        center: Point3<f64>,
        /// Radius.
        radius: f64,
        /// RGBA color.
        color: [f32; 4],
    },
    /// From [`DebugDrawSink::line`].
    Line {
        /// Start point.
        from: Point3<f64>,
        /// End point.
        to: Point3<f64>,
        /// RGBA color.
        color: [f32; 4],
    },
}

impl DebugDrawSink for Vec<DebugPrimitive> {
    fn sphere(&mut self, center: Point3<f64>, radius: f64, color: [f32; 4]) {
        self.push(DebugPrimitive::Sphere {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Point3<f64>, to: Point3<f64>, color: [f32; 4]) {
        self.push(DebugPrimitive::Line { from, to, color });
    }
}

/// Draw the gizmos for anchor `owner`: a sphere at its position and every
/// strand as a polyline through its samples.
///
/// Returns the number of line segments drawn. An unknown owner draws
/// nothing.
///
/// # Example
///
/// ```
/// use cable_path::{CableScene, Transform};
/// use cable_rig::{DebugPrimitive, GizmoStyle, draw_gizmos};
///
/// let mut scene = CableScene::new();
/// let a = scene.add_anchor(Transform::identity());
/// let b = scene.add_anchor(Transform::from_xyz(1.0, 0.0, 0.0));
/// scene.connect(a, b).unwrap();
///
/// let mut prims: Vec<DebugPrimitive> = Vec::new();
/// let lines = draw_gizmos(&scene, a, &GizmoStyle::default(), &mut prims);
///
/// assert_eq!(lines, 19);
/// assert_eq!(prims.len(), 20);
/// ```
pub fn draw_gizmos<G, D>(graph: &G, owner: AnchorId, style: &GizmoStyle, sink: &mut D) -> usize
where
    G: AnchorGraph + ?Sized,
    D: DebugDrawSink + ?Sized,
{
    let Some(transform) = graph.transform(owner) else {
        debug!(owner = %owner, "Gizmo owner not found, skipping");
        return 0;
    };

    sink.sphere(transform.world_position(), style.anchor_radius, style.color);

    let Some(sampled) = PathSampler::new(graph).sample_anchor(owner) else {
        return 0;
    };

    let mut lines = 0;
    for (_, points) in sampled.strands() {
        for pair in points.windows(2) {
            sink.line(pair[0], pair[1], style.color);
            lines += 1;
        }
    }
    lines
}

/// Draw gizmos for every anchor in `owners`.
///
/// Returns the total number of line segments drawn.
pub fn draw_all_gizmos<G, D>(
    graph: &G,
    owners: impl IntoIterator<Item = AnchorId>,
    style: &GizmoStyle,
    sink: &mut D,
) -> usize
where
    G: AnchorGraph + ?Sized,
    D: DebugDrawSink + ?Sized,
{
    owners
        .into_iter()
        .map(|owner| draw_gizmos(graph, owner, style, &mut *sink))
        .sum()
}
