//! Partition cells and their cluster lists.

use smallvec::SmallVec;

use crate::cluster::Cluster;

/// Flat, row-major index of a partition cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

/// Cluster list of a single cell, oldest first.
pub type ClusterList = SmallVec<[Cluster; 4]>;

/// A partition cell owning the clusters that started inside it.
#[derive(Debug, Default, Clone)]
pub struct Cell {
    /// Clusters in insertion order.
    pub clusters: ClusterList,
}

impl Cell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clusters currently owned by this cell.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
