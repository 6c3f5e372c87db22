//! The per-anchor list of outgoing connections and its authoring edits.

use nalgebra::Vector3;
use tracing::warn;

use crate::{AnchorId, CableError, CableResult, Connection, Strand};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest usable resolution: a segment needs two points.
pub const MIN_RESOLUTION: usize = 2;

/// Samples per strand when nothing else is configured.
pub const DEFAULT_RESOLUTION: usize = 20;

/// Number of sample points per strand, always at least [`MIN_RESOLUTION`].
///
/// # Example
///
/// ```
/// use cable_path::Resolution;
///
/// assert_eq!(Resolution::default().get(), 20);
/// assert!(Resolution::new(1).is_err());
/// assert_eq!(Resolution::clamped(0).get(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct Resolution(usize);

impl Resolution {
    /// Validate a resolution.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::InvalidResolution`] if `samples < 2`.
    pub fn new(samples: usize) -> CableResult<Self> {
        if samples < MIN_RESOLUTION {
            return Err(CableError::InvalidResolution {
                min: MIN_RESOLUTION,
                actual: samples,
            });
        }
        Ok(Self(samples))
    }

    /// Clamp to the minimum instead of failing.
    #[must_use]
    pub fn clamped(samples: usize) -> Self {
        if samples < MIN_RESOLUTION {
            warn!(
                requested = samples,
                clamped = MIN_RESOLUTION,
                "Resolution below minimum, clamping"
            );
            return Self(MIN_RESOLUTION);
        }
        Self(samples)
    }

    /// Samples per strand.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self(DEFAULT_RESOLUTION)
    }
}

impl TryFrom<usize> for Resolution {
    type Error = CableError;

    fn try_from(samples: usize) -> CableResult<Self> {
        Self::new(samples)
    }
}

impl From<Resolution> for usize {
    fn from(resolution: Resolution) -> Self {
        resolution.0
    }
}

/// Outgoing connections of one anchor, in insertion order, plus the
/// sampling resolution shared by all of them.
///
/// Connection order only affects the order of generated strands.
///
/// # Example
///
/// ```
/// use cable_path::{AnchorId, CablePath};
/// use nalgebra::Vector3;
///
/// let mut path = CablePath::new();
/// let c = path.add_connection(Some(AnchorId::from_raw(2)));
/// path.push_start_offset(c, Vector3::x()).unwrap();
/// path.push_end_offset(c, Vector3::y()).unwrap();
///
/// assert_eq!(path.len(), 1);
/// assert_eq!(path.strand_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CablePath {
    /// Outgoing connections.
    pub connections: Vec<Connection>,
    /// Samples per strand.
    pub resolution: Resolution,
}

impl CablePath {
    /// An empty path at the default resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution (builder pattern).
    #[must_use]
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Add a connection (builder pattern).
    #[must_use]
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    /// Number of connections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// True when there are no connections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Total strands across all connections, targeted or not.
    #[must_use]
    pub fn strand_count(&self) -> usize {
        self.connections.iter().map(Connection::strand_count).sum()
    }

    /// Connection `index`.
    #[must_use]
    pub fn connection(&self, index: usize) -> Option<&Connection> {
        self.connections.get(index)
    }

    /// Targets of all connections that have one.
    pub fn targets(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.connections.iter().filter_map(|c| c.target)
    }

    fn connection_mut(&mut self, index: usize) -> CableResult<&mut Connection> {
        let len = self.connections.len();
        self.connections
            .get_mut(index)
            .ok_or(CableError::ConnectionOutOfRange { index, len })
    }

    /// Append a connection with one straight strand and return its index.
    pub fn add_connection(&mut self, target: Option<AnchorId>) -> usize {
        let connection = match target {
            Some(id) => Connection::new(id),
            None => Connection::unset(),
        };
        self.connections.push(connection);
        self.connections.len() - 1
    }

    /// Remove connection `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] for a bad index.
    pub fn remove_connection(&mut self, index: usize) -> CableResult<Connection> {
        let len = self.connections.len();
        if index >= len {
            return Err(CableError::ConnectionOutOfRange { index, len });
        }
        Ok(self.connections.remove(index))
    }

    /// Point connection `index` at `target`, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] for a bad index.
    pub fn set_target(&mut self, index: usize, target: Option<AnchorId>) -> CableResult<()> {
        self.connection_mut(index)?.target = target;
        Ok(())
    }

    /// Add a strand to connection `index` and return the strand index.
    ///
    /// Surplus offsets on the longer side are kept after the new strand.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] for a bad index.
    pub fn add_strand(&mut self, index: usize, strand: Strand) -> CableResult<usize> {
        Ok(self.connection_mut(index)?.push_strand(strand))
    }

    /// Remove strand `strand` (both offsets) from connection `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] or
    /// [`CableError::StrandOutOfRange`].
    pub fn remove_strand(&mut self, index: usize, strand: usize) -> CableResult<Strand> {
        let connection = self.connection_mut(index)?;
        let len = connection.strand_count();
        connection
            .remove_strand(strand)
            .ok_or(CableError::StrandOutOfRange {
                connection: index,
                index: strand,
                len,
            })
    }

    /// Append a start offset to connection `index`; returns its position.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] for a bad index.
    pub fn push_start_offset(&mut self, index: usize, offset: Vector3<f64>) -> CableResult<usize> {
        let offsets = &mut self.connection_mut(index)?.start_offsets;
        offsets.push(offset);
        Ok(offsets.len() - 1)
    }

    /// Append an end offset to connection `index`; returns its position.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] for a bad index.
    pub fn push_end_offset(&mut self, index: usize, offset: Vector3<f64>) -> CableResult<usize> {
        let offsets = &mut self.connection_mut(index)?.end_offsets;
        offsets.push(offset);
        Ok(offsets.len() - 1)
    }

    /// Overwrite start offset `slot` of connection `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] or
    /// [`CableError::StrandOutOfRange`].
    pub fn set_start_offset(
        &mut self,
        index: usize,
        slot: usize,
        offset: Vector3<f64>,
    ) -> CableResult<()> {
        let offsets = &mut self.connection_mut(index)?.start_offsets;
        set_slot(offsets, index, slot, offset)
    }

    /// Overwrite end offset `slot` of connection `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] or
    /// [`CableError::StrandOutOfRange`].
    pub fn set_end_offset(
        &mut self,
        index: usize,
        slot: usize,
        offset: Vector3<f64>,
    ) -> CableResult<()> {
        let offsets = &mut self.connection_mut(index)?.end_offsets;
        set_slot(offsets, index, slot, offset)
    }

    /// Remove start offset `slot` of connection `index`.
    ///
    /// End offsets are untouched, so later strands pair differently.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] or
    /// [`CableError::StrandOutOfRange`].
    pub fn remove_start_offset(&mut self, index: usize, slot: usize) -> CableResult<Vector3<f64>> {
        let offsets = &mut self.connection_mut(index)?.start_offsets;
        remove_slot(offsets, index, slot)
    }

    /// Remove end offset `slot` of connection `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::ConnectionOutOfRange`] or
    /// [`CableError::StrandOutOfRange`].
    pub fn remove_end_offset(&mut self, index: usize, slot: usize) -> CableResult<Vector3<f64>> {
        let offsets = &mut self.connection_mut(index)?.end_offsets;
        remove_slot(offsets, index, slot)
    }

    /// Validate and set the resolution.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::InvalidResolution`] if `samples < 2`; the
    /// current resolution is kept.
    pub fn set_resolution(&mut self, samples: usize) -> CableResult<()> {
        self.resolution = Resolution::new(samples)?;
        Ok(())
    }
}

fn set_slot(
    offsets: &mut [Vector3<f64>],
    connection: usize,
    slot: usize,
    offset: Vector3<f64>,
) -> CableResult<()> {
    let len = offsets.len();
    let entry = offsets.get_mut(slot).ok_or(CableError::StrandOutOfRange {
        connection,
        index: slot,
        len,
    })?;
    *entry = offset;
    Ok(())
}

fn remove_slot(
    offsets: &mut Vec<Vector3<f64>>,
    connection: usize,
    slot: usize,
) -> CableResult<Vector3<f64>> {
    let len = offsets.len();
    if slot >= len {
        return Err(CableError::StrandOutOfRange {
            connection,
            index: slot,
            len,
        });
    }
    Ok(offsets.remove(slot))
}
