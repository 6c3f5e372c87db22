//! Connections between anchors and their strands.

use nalgebra::Vector3;

use crate::AnchorId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One start/end tangent offset pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Strand {
    /// Offset from the source anchor, in its local space.
    pub start_offset: Vector3<f64>,
    /// Offset from the target anchor, in its local space.
    pub end_offset: Vector3<f64>,
}

impl Strand {
    /// A strand with both offsets at the anchor origins (a straight cable).
    #[must_use]
    pub fn straight() -> Self {
        Self {
            start_offset: Vector3::zeros(),
            end_offset: Vector3::zeros(),
        }
    }
}

/// A directed link from the owning anchor to a target anchor.
///
/// `start_offsets[i]` and `end_offsets[i]` together define strand `i`.
/// Only `min(start_offsets.len(), end_offsets.len())` strands exist;
/// surplus entries in the longer sequence are kept but ignored.
///
/// # Example
///
/// ```
/// use cable_path::{AnchorId, Connection};
/// use nalgebra::Vector3;
///
/// let mut conn = Connection::new(AnchorId::from_raw(1));
/// assert_eq!(conn.strand_count(), 1);
///
/// conn.start_offsets.push(Vector3::x());
/// conn.start_offsets.push(Vector3::y());
/// // Three starts but only one end: still one strand.
/// assert_eq!(conn.strand_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    /// Target anchor. `None` makes the connection inert.
    pub target: Option<AnchorId>,
    /// Tangent offsets at the source end.
    pub start_offsets: Vec<Vector3<f64>>,
    /// Tangent offsets at the target end.
    pub end_offsets: Vec<Vector3<f64>>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::unset()
    }
}

impl Connection {
    /// A connection to `target` with one straight strand.
    #[must_use]
    pub fn new(target: AnchorId) -> Self {
        Self {
            target: Some(target),
            ..Self::unset()
        }
    }

    /// A connection with no target yet and one straight strand.
    #[must_use]
    pub fn unset() -> Self {
        Self {
            target: None,
            start_offsets: vec![Vector3::zeros()],
            end_offsets: vec![Vector3::zeros()],
        }
    }

    /// A connection to `target` with the given strands.
    #[must_use]
    pub fn with_strands(target: AnchorId, strands: impl IntoIterator<Item = Strand>) -> Self {
        let (start_offsets, end_offsets) = strands
            .into_iter()
            .map(|s| (s.start_offset, s.end_offset))
            .unzip();
        Self {
            target: Some(target),
            start_offsets,
            end_offsets,
        }
    }

    /// Number of strands that will be generated.
    #[must_use]
    pub fn strand_count(&self) -> usize {
        self.start_offsets.len().min(self.end_offsets.len())
    }

    /// Strand `index`, if it exists.
    #[must_use]
    pub fn strand(&self, index: usize) -> Option<Strand> {
        if index >= self.strand_count() {
            return None;
        }
        Some(Strand {
            start_offset: self.start_offsets[index],
            end_offset: self.end_offsets[index],
        })
    }

    /// Iterate over the generated strands in index order.
    pub fn strands(&self) -> impl Iterator<Item = Strand> + '_ {
        self.start_offsets
            .iter()
            .zip(&self.end_offsets)
            .map(|(&start_offset, &end_offset)| Strand {
                start_offset,
                end_offset,
            })
    }

    /// True when the connection can produce geometry: it has a target and
    /// at least one strand. Whether the target resolves is up to the graph.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.target.is_some() && self.strand_count() > 0
    }

    /// Add a strand after the existing ones and return its index.
    ///
    /// The pair is inserted at index `strand_count()` on both sides, so
    /// surplus entries of the longer sequence stay after it.
    pub fn push_strand(&mut self, strand: Strand) -> usize {
        let count = self.strand_count();
        self.start_offsets.insert(count, strand.start_offset);
        self.end_offsets.insert(count, strand.end_offset);
        count
    }

    /// Remove strand `index` from both sequences.
    ///
    /// Returns `None` if the strand does not exist.
    pub fn remove_strand(&mut self, index: usize) -> Option<Strand> {
        let strand = self.strand(index)?;
        self.start_offsets.remove(index);
        self.end_offsets.remove(index);
        Some(strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> AnchorId {
        AnchorId::from_raw(9)
    }

    #[test]
    fn new_has_one_straight_strand() {
        let conn = Connection::new(id());
        assert_eq!(conn.target, Some(id()));
        assert_eq!(conn.strand_count(), 1);
        assert_eq!(conn.strand(0), Some(Strand::straight()));
        assert!(conn.is_renderable());
    }

    #[test]
    fn unset_is_not_renderable() {
        let conn = Connection::unset();
        assert_eq!(conn.strand_count(), 1);
        assert!(!conn.is_renderable());
    }

    #[test]
    fn strand_count_is_min_length() {
        let mut conn = Connection::new(id());
        conn.start_offsets = vec![Vector3::x(); 3];
        conn.end_offsets = vec![Vector3::y(); 5];
        assert_eq!(conn.strand_count(), 3);
        assert_eq!(conn.strands().count(), 3);
        assert!(conn.strand(3).is_none());
    }

    #[test]
    fn empty_sequence_has_no_strands() {
        let mut conn = Connection::new(id());
        conn.end_offsets.clear();
        assert_eq!(conn.strand_count(), 0);
        assert!(!conn.is_renderable());
    }

    #[test]
    fn push_strand_lands_at_strand_count() {
        let mut conn = Connection::new(id());
        let index = conn.push_strand(Strand {
            start_offset: Vector3::x(),
            end_offset: Vector3::y(),
        });
        assert_eq!(index, 1);
        assert_eq!(conn.strand_count(), 2);
        assert_eq!(conn.strand(1).map(|s| s.start_offset), Some(Vector3::x()));
        assert_eq!(conn.strand(1).map(|s| s.end_offset), Some(Vector3::y()));
    }

    #[test]
    fn push_strand_keeps_surplus_offsets() {
        let mut conn = Connection::new(id());
        conn.start_offsets.push(Vector3::z());
        conn.start_offsets.push(-Vector3::z());
        let index = conn.push_strand(Strand {
            start_offset: Vector3::x(),
            end_offset: Vector3::y(),
        });
        assert_eq!(index, 1);
        assert_eq!(conn.strand_count(), 2);
        assert_eq!(
            conn.start_offsets,
            vec![Vector3::zeros(), Vector3::x(), Vector3::z(), -Vector3::z()]
        );
        assert_eq!(conn.end_offsets, vec![Vector3::zeros(), Vector3::y()]);
        assert_eq!(conn.strand(1).map(|s| s.start_offset), Some(Vector3::x()));
    }

    #[test]
    fn remove_strand_from_both() {
        let mut conn = Connection::with_strands(
            id(),
            [
                Strand::straight(),
                Strand {
                    start_offset: Vector3::x(),
                    end_offset: Vector3::x(),
                },
            ],
        );
        let removed = conn.remove_strand(0);
        assert_eq!(removed, Some(Strand::straight()));
        assert_eq!(conn.strand_count(), 1);
        assert!(conn.remove_strand(5).is_none());
    }
}
