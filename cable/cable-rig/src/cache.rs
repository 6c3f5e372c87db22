//! Memoized rebuilds.
//!
//! Hosts often request a rebuild on every frame. [`CachedCableRig`] hashes
//! everything the mesh depends on and skips the rebuild when the hash is
//! unchanged.

use std::hash::{BuildHasher, Hash, Hasher};

use cable_mesh_types::CableMesh;
use cable_path::{AnchorGraph, AnchorId, TransformProvider, strand_curve};
use hashbrown::DefaultHashBuilder;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::{CableRigConfig, MeshSink, RigResult, build_cable_mesh};

fn hash_point<H: Hasher>(p: &Point3<f64>, state: &mut H) {
    for c in p.coords.iter() {
        c.to_bits().hash(state);
    }
}

fn hash_config<H: Hasher>(config: &CableRigConfig, state: &mut H) {
    let tube = &config.tube;
    tube.diameter.to_bits().hash(state);
    tube.radial_segments.hash(state);
    tube.frame_mode.hash(state);
    tube.uv_mode.hash(state);
    tube.capped.hash(state);
    config.material.hash(state);
}

/// Hash of every input the mesh for `owner` depends on.
///
/// Covers the owner's local-to-world mapping, each connection's target,
/// the Bezier control points of every strand, the resolution and the rig
/// configuration. Target transforms only matter through the control points,
/// so moving an unrelated anchor leaves the key unchanged.
///
/// The owner's mapping is captured by the images of its origin and the
/// three unit axes. That pins down an affine map completely, so the graph's
/// [`TransformProvider`] must be affine for the key to be sound. A
/// non-affine provider can change its mapping without changing the key,
/// and [`CachedCableRig`] would then keep a stale mesh.
#[must_use]
pub fn content_key<G, B>(graph: &G, owner: AnchorId, config: &CableRigConfig, hasher: &B) -> u64
where
    G: AnchorGraph + ?Sized,
    B: BuildHasher,
{
    let mut state = hasher.build_hasher();
    owner.hash(&mut state);
    hash_config(config, &mut state);

    let (Some(source), Some(path)) = (graph.transform(owner), graph.path(owner)) else {
        false.hash(&mut state);
        return state.finish();
    };
    true.hash(&mut state);

    hash_point(&source.world_position(), &mut state);
    for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
        hash_point(&source.local_to_world(&axis), &mut state);
    }

    path.resolution.hash(&mut state);
    path.connections.len().hash(&mut state);
    for connection in &path.connections {
        let target = connection
            .target
            .and_then(|id| graph.transform(id).map(|t| (id, t)));
        let Some((id, target)) = target else {
            false.hash(&mut state);
            continue;
        };
        true.hash(&mut state);
        id.hash(&mut state);
        connection.strand_count().hash(&mut state);
        for strand in connection.strands() {
            let curve = strand_curve(&source, &target, &strand);
            for p in [curve.p0, curve.p1, curve.p2, curve.p3] {
                hash_point(&p, &mut state);
            }
        }
    }

    state.finish()
}

/// A rig for one anchor that remembers its last mesh.
///
/// Unlike [`crate::CableRig`] it does not borrow the graph, so it can live
/// alongside a scene that is edited between rebuilds.
///
/// # Example
///
/// ```
/// use cable_path::{CableScene, Transform};
/// use cable_rig::{CableRigConfig, CachedCableRig};
///
/// let mut scene = CableScene::new();
/// let a = scene.add_anchor(Transform::identity());
/// let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
/// scene.connect(a, b).unwrap();
///
/// let mut rig = CachedCableRig::new(a, CableRigConfig::default()).unwrap();
/// assert!(rig.rebuild(&scene).unwrap());
/// assert!(!rig.rebuild(&scene).unwrap());
///
/// scene.set_transform(b, Transform::from_xyz(0.0, 1.0, 10.0)).unwrap();
/// assert!(rig.rebuild(&scene).unwrap());
/// assert_eq!(rig.rebuild_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CachedCableRig {
    owner: AnchorId,
    config: CableRigConfig,
    hasher: DefaultHashBuilder,
    key: Option<u64>,
    mesh: CableMesh,
    rebuilds: usize,
    hits: usize,
}

impl CachedCableRig {
    /// Create a cached rig for `owner`. Nothing is built until the first
    /// [`rebuild`](Self::rebuild).
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for invalid tube settings.
    pub fn new(owner: AnchorId, config: CableRigConfig) -> RigResult<Self> {
        config.validate()?;
        Ok(Self {
            owner,
            config,
            hasher: DefaultHashBuilder::default(),
            key: None,
            mesh: CableMesh::new(),
            rebuilds: 0,
            hits: 0,
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

    /// Replace the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for invalid tube settings; the old
    /// configuration is kept.
    pub fn set_config(&mut self, config: CableRigConfig) -> RigResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Set the diameter. See [`CableRigConfig::set_diameter`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for an invalid diameter.
    pub fn set_diameter(&mut self, diameter: f64) -> RigResult<()> {
        self.config.set_diameter(diameter)
    }

    /// Set the vertices per ring. See
    /// [`CableRigConfig::set_radial_segments`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] for fewer than three segments.
    pub fn set_radial_segments(&mut self, radial_segments: usize) -> RigResult<()> {
        self.config.set_radial_segments(radial_segments)
    }

    /// The last built mesh (empty before the first rebuild).
    #[must_use]
    pub fn mesh(&self) -> &CableMesh {
        &self.mesh
    }

    /// Number of rebuilds actually performed.
    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Number of rebuild requests answered from the cache.
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits
    }

    /// Forget the cached key so the next rebuild always runs.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Rebuild if any input changed. Returns `true` if the mesh was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::Tube`] if the mesh would outgrow `u32`
    /// indices. The previous mesh and key are kept.
    pub fn rebuild<G>(&mut self, graph: &G) -> RigResult<bool>
    where
        G: AnchorGraph + ?Sized,
    {
        let key = content_key(graph, self.owner, &self.config, &self.hasher);
        if self.key == Some(key) {
            self.hits += 1;
            debug!(owner = %self.owner, "Cable inputs unchanged, reusing mesh");
            return Ok(false);
        }

        self.mesh = build_cable_mesh(graph, self.owner, &self.config)?;
        self.key = Some(key);
        self.rebuilds += 1;
        Ok(true)
    }

    /// Rebuild if needed and present the mesh to `sink` when it changed.
    ///
    /// # Errors
    ///
    /// Same as [`rebuild`](Self::rebuild).
    pub fn publish<G, S>(&mut self, graph: &G, sink: &mut S) -> RigResult<bool>
    where
        G: AnchorGraph + ?Sized,
        S: MeshSink + ?Sized,
    {
        let rebuilt = self.rebuild(graph)?;
        if rebuilt {
            sink.present(&self.mesh.to_buffers(), self.config.material);
        }
        Ok(rebuilt)
    }
}
