//! Anchor identity and storage.

use std::fmt;

use crate::{CablePath, Transform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of an anchor.
///
/// Connections refer to their target by id rather than by pointer, so an
/// anchor can be the target of any number of connections and a deleted
/// anchor simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnchorId(u64);

impl AnchorId {
    /// Wrap a raw id, e.g. one issued by a host scene graph.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// A point in space that cables start from and end at.
///
/// The anchor owns its outgoing connections; incoming connections live on
/// the anchors they start from.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    /// World transform.
    pub transform: Transform,
    /// Outgoing connections.
    pub path: CablePath,
}

impl Anchor {
    /// Anchor at `transform` with no connections.
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            path: CablePath::new(),
        }
    }

    /// Replace the path (builder pattern).
    #[must_use]
    pub fn with_path(mut self, path: CablePath) -> Self {
        self.path = path;
        self
    }
}
