//! The rebuild pipeline: path, then sampled points, then mesh.

use cable_mesh_types::CableMesh;
use cable_path::{AnchorGraph, AnchorId, CableError, PathSampler, SampledPath};
use cable_tube::{TubeMeshBuilder, TubeSettings};
use tracing::{debug, info};

use crate::{CableRigConfig, DebugDrawSink, GizmoStyle, MeshSink, RigResult, draw_gizmos};

/// Extrude every strand of a sampled path into one mesh.
///
/// Points must already be in the owning anchor's local space. Each span
/// becomes its own tube; spans with fewer than two points add nothing.
///
/// # Errors
///
/// Returns [`crate::RigError::Tube`] for invalid settings or if the mesh
/// would outgrow `u32` indices.
pub fn extrude_sampled(sampled: &SampledPath, settings: &TubeSettings) -> RigResult<CableMesh> {
    let mut builder = TubeMeshBuilder::new(*settings)?;
    for (_, points) in sampled.strands() {
        builder.add_strand(points)?;
    }
    Ok(builder.finish())
}

/// Rebuild the mesh for anchor `owner` from scratch.
///
/// An owner the graph does not know yields an empty mesh.
///
/// # Errors
///
/// Returns [`crate::RigError::Tube`] for invalid tube settings.
pub fn build_cable_mesh<G>(
    graph: &G,
    owner: AnchorId,
    config: &CableRigConfig,
) -> RigResult<CableMesh>
where
    G: AnchorGraph + ?Sized,
{
    config.validate()?;

    let Some(sampled) = PathSampler::new(graph).sample_anchor_local(owner) else {
        debug!(owner = %owner, "Cable owner not found, producing empty mesh");
        return Ok(CableMesh::new());
    };

    let mesh = extrude_sampled(&sampled, &config.tube)?;

    info!(
        owner = %owner,
        strands = sampled.strand_count(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Rebuilt cable mesh"
    );

    Ok(mesh)
}

/// Builds the cable mesh for one anchor.
///
/// The rig holds the graph it reads paths and transforms from, and the id
/// of the anchor whose cables it renders. Every [`build`](Self::build)
/// starts over; see [`crate::CachedCableRig`] for a memoized variant.
///
/// # Example
///
/// ```
/// use cable_path::{CableScene, Transform};
/// use cable_rig::{CableRig, CableRigConfig};
///
/// let mut scene = CableScene::new();
/// let a = scene.add_anchor(Transform::identity());
/// let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
/// scene.connect(a, b).unwrap();
///
/// let config = CableRigConfig::default().with_diameter(0.2);
/// let rig = CableRig::new(&scene, a, config).unwrap();
/// let mesh = rig.build().unwrap();
///
/// assert_eq!(mesh.vertex_count(), 160);
/// assert_eq!(mesh.face_count(), 304);
/// ```
#[derive(Debug)]
pub struct CableRig<'g, G: ?Sized> {
    graph: &'g G,
    owner: AnchorId,
    config: CableRigConfig,
}

impl<'g, G: AnchorGraph + ?Sized> CableRig<'g, G> {
    /// Create a rig for `owner`.
    ///
    /// # Errors
    ///
    /// - [`crate::RigError::Tube`] for invalid tube settings
    /// - [`crate::RigError::Cable`] if `owner` is not in `graph`
    pub fn new(graph: &'g G, owner: AnchorId, config: CableRigConfig) -> RigResult<Self> {
        config.validate()?;
        if graph.path(owner).is_none() {
            return Err(CableError::UnknownAnchor(owner).into());
        }
        Ok(Self {
            graph,
            owner,
            config,
        })
    }

    /// The anchor whose cables this rig renders.
    #[must_use]
    pub fn owner(&self) -> AnchorId {
        self.owner
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CableRigConfig {
        &self.config
    }

    /// The graph paths are read from.
    #[must_use]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Sampled points of every strand, in the owner's local space.
    #[must_use]
    pub fn sample(&self) -> SampledPath {
        PathSampler::new(self.graph)
            .sample_anchor_local(self.owner)
            .unwrap_or_default()
    }

    /// Build the mesh.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] if the mesh would outgrow `u32`
    /// indices.
    pub fn build(&self) -> RigResult<CableMesh> {
        build_cable_mesh(self.graph, self.owner, &self.config)
    }

    /// Build the mesh and hand it to `sink` with the configured material.
    ///
    /// The built mesh is returned as well.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build); the sink is not called on error.
    pub fn publish<S>(&self, sink: &mut S) -> RigResult<CableMesh>
    where
        S: MeshSink + ?Sized,
    {
        let mesh = self.build()?;
        sink.present(&mesh.to_buffers(), self.config.material);
        Ok(mesh)
    }

    /// Draw the owner's gizmos. Returns the number of line segments.
    pub fn draw_gizmos<D>(&self, style: &GizmoStyle, sink: &mut D) -> usize
    where
        D: DebugDrawSink + ?Sized,
    {
        draw_gizmos(self.graph, self.owner, style, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CapturedMesh, MaterialHandle, RigError};
    use cable_path::{CableScene, Transform};

    fn scene() -> (CableScene, AnchorId, AnchorId) {
        let mut scene = CableScene::new();
        let a = scene.add_anchor(Transform::identity());
        let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
        scene.connect(a, b).unwrap();
        (scene, a, b)
    }

    #[test]
    fn new_rejects_bad_config() {
        let (scene, a, _) = scene();
        let config = CableRigConfig::default().with_radial_segments(2);
        assert!(matches!(
            CableRig::new(&scene, a, config),
            Err(RigError::Tube(_))
        ));
    }

    #[test]
    fn new_rejects_unknown_owner() {
        let (scene, _, _) = scene();
        let ghost = AnchorId::from_raw(50);
        assert!(matches!(
            CableRig::new(&scene, ghost, CableRigConfig::default()),
            Err(RigError::Cable(CableError::UnknownAnchor(id))) if id == ghost
        ));
    }

    #[test]
    fn build_counts() {
        let (scene, a, _) = scene();
        let rig = CableRig::new(&scene, a, CableRigConfig::default()).unwrap();
        let mesh = rig.build().unwrap();
        assert_eq!(mesh.vertex_count(), 20 * 8);
        assert_eq!(mesh.face_count(), 19 * 8 * 2);
        assert_eq!(rig.sample().points.len(), 20);
    }

    #[test]
    fn target_side_has_no_mesh() {
        let (scene, _, b) = scene();
        let rig = CableRig::new(&scene, b, CableRigConfig::default()).unwrap();
        assert!(rig.build().unwrap().is_empty());
    }

    #[test]
    fn publish_passes_material() {
        let (scene, a, _) = scene();
        let config = CableRigConfig::default().with_material(MaterialHandle::from_raw(11));
        let rig = CableRig::new(&scene, a, config).unwrap();

        let mut sink = CapturedMesh::default();
        let mesh = rig.publish(&mut sink).unwrap();
        assert_eq!(sink.buffers.vertex_count(), mesh.vertex_count());
        assert_eq!(sink.buffers.triangle_count(), mesh.face_count());
        assert_eq!(sink.material, Some(MaterialHandle::from_raw(11)));
    }

    #[test]
    fn removed_owner_builds_empty() {
        let (scene, a, _) = scene();
        let mut moved = scene.clone();
        moved.remove_anchor(a);
        let mesh = build_cable_mesh(&moved, a, &CableRigConfig::default()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn extrude_skips_short_spans() {
        let mut sampled = SampledPath::new();
        let id = AnchorId::from_raw(0);
        sampled.push_strand(0, 0, id, &[nalgebra::Point3::origin()]);
        let mesh = extrude_sampled(&sampled, &TubeSettings::default()).unwrap();
        assert!(mesh.is_empty());
    }
}
