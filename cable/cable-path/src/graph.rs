//! Anchor lookup.
//!
//! The sampler resolves connection targets through [`AnchorGraph`], so it
//! never needs to know how the host stores anchors. [`CableScene`] is a
//! self-contained implementation for hosts without a scene graph of their
//! own, and for tests.

use hashbrown::HashMap;

use crate::{Anchor, AnchorId, CableError, CableResult, CablePath, Transform, TransformProvider};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only view of anchors by id.
pub trait AnchorGraph {
    /// Transform type handed to the sampler. Must be affine, see
    /// [`TransformProvider`].
    type Transform: TransformProvider;

    /// Snapshot of an anchor's transform, or `None` if the id is unknown.
    fn transform(&self, id: AnchorId) -> Option<Self::Transform>;

    /// The anchor's outgoing connections, or `None` if the id is unknown.
    fn path(&self, id: AnchorId) -> Option<&CablePath>;
}

/// Anchors keyed by id.
///
/// Ids are issued in increasing order and never reused, so a connection
/// whose target was removed stays inert even after new anchors are added.
///
/// # Example
///
/// ```
/// use cable_path::{AnchorGraph, CableScene, Transform};
///
/// let mut scene = CableScene::new();
/// let a = scene.add_anchor(Transform::identity());
/// let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
/// scene.connect(a, b).unwrap();
///
/// assert_eq!(scene.path(a).map(|p| p.len()), Some(1));
/// assert!(scene.remove_anchor(b).is_some());
/// assert!(scene.transform(b).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CableScene {
    anchors: HashMap<AnchorId, Anchor>,
    next_id: u64,
}

impl CableScene {
    /// An empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// True when the scene has no anchors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// True if `id` names an anchor in this scene.
    #[must_use]
    pub fn contains(&self, id: AnchorId) -> bool {
        self.anchors.contains_key(&id)
    }

    /// Add an anchor with no connections.
    pub fn add_anchor(&mut self, transform: Transform) -> AnchorId {
        self.insert_anchor(Anchor::new(transform))
    }

    /// Add a fully built anchor.
    pub fn insert_anchor(&mut self, anchor: Anchor) -> AnchorId {
        let id = AnchorId::from_raw(self.next_id);
        self.next_id += 1;
        self.anchors.insert(id, anchor);
        id
    }

    /// Remove an anchor. Connections that target it become inert.
    pub fn remove_anchor(&mut self, id: AnchorId) -> Option<Anchor> {
        self.anchors.remove(&id)
    }

    /// Anchor `id`.
    #[must_use]
    pub fn anchor(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.get(&id)
    }

    /// Mutable anchor `id`.
    pub fn anchor_mut(&mut self, id: AnchorId) -> Option<&mut Anchor> {
        self.anchors.get_mut(&id)
    }

    /// Mutable path of anchor `id`, for authoring edits.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::UnknownAnchor`] if `id` is not in the scene.
    pub fn path_mut(&mut self, id: AnchorId) -> CableResult<&mut CablePath> {
        self.anchors
            .get_mut(&id)
            .map(|a| &mut a.path)
            .ok_or(CableError::UnknownAnchor(id))
    }

    /// Move anchor `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::UnknownAnchor`] if `id` is not in the scene.
    pub fn set_transform(&mut self, id: AnchorId, transform: Transform) -> CableResult<()> {
        let anchor = self
            .anchors
            .get_mut(&id)
            .ok_or(CableError::UnknownAnchor(id))?;
        anchor.transform = transform;
        Ok(())
    }

    /// Add a connection from `from` to `to` with one straight strand.
    ///
    /// Returns the connection's index in `from`'s path.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::UnknownAnchor`] if either anchor is missing.
    pub fn connect(&mut self, from: AnchorId, to: AnchorId) -> CableResult<usize> {
        if !self.contains(to) {
            return Err(CableError::UnknownAnchor(to));
        }
        Ok(self.path_mut(from)?.add_connection(Some(to)))
    }

    /// All anchor ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<AnchorId> {
        let mut ids: Vec<_> = self.anchors.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl AnchorGraph for CableScene {
    type Transform = Transform;

    fn transform(&self, id: AnchorId) -> Option<Transform> {
        self.anchors.get(&id).map(|a| a.transform)
    }

    fn path(&self, id: AnchorId) -> Option<&CablePath> {
        self.anchors.get(&id).map(|a| &a.path)
    }
}
