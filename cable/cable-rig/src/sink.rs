//! Handing finished meshes to a renderer.

use cable_mesh_types::MeshBuffers;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque material reference owned by the host renderer.
///
/// The rig never interprets it; it is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialHandle(u64);

impl MaterialHandle {
    /// Wrap a host material id.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The host material id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Receives rebuilt meshes.
///
/// An empty [`MeshBuffers`] is a valid mesh: it means nothing is drawn.
pub trait MeshSink {
    /// Replace whatever the sink currently shows with `buffers`.
    fn present(&mut self, buffers: &MeshBuffers, material: Option<MaterialHandle>);
}

/// A sink that keeps the most recent mesh, for hosts that pull instead of
/// being pushed to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedMesh {
    /// Last presented buffers.
    pub buffers: MeshBuffers,
    /// Last presented material.
    pub material: Option<MaterialHandle>,
    /// Number of times `present` was called.
    pub presents: usize,
}

impl MeshSink for CapturedMesh {
    fn present(&mut self, buffers: &MeshBuffers, material: Option<MaterialHandle>) {
        self.buffers.clone_from(buffers);
        self.material = material;
        self.presents += 1;
    }
}

impl<S: MeshSink + ?Sized> MeshSink for &mut S {
    fn present(&mut self, buffers: &MeshBuffers, material: Option<MaterialHandle>) {
        (**self).present(buffers, material);
    }
}
