//! Read-only view of finalized clusters.

use serde::{Serialize, Serializer};

use crate::cluster::Cluster;

/// Center and size of one finalized cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub center_x: f32,
    pub center_y: f32,
    pub count: u32,
}

impl From<&Cluster> for ClusterSummary {
    fn from(cluster: &Cluster) -> Self {
        let (center_x, center_y) = cluster.center();
        Self {
            center_x,
            center_y,
            count: cluster.count,
        }
    }
}

/// Final clusters of one category.
///
/// Only produced by [`CategoryGrid::build_clusters`](crate::CategoryGrid::build_clusters)
/// and never mutated afterwards. Order across cells carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub(crate) const fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Raw bounding boxes.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Center and count of every cluster.
    pub fn iter(&self) -> impl Iterator<Item = ClusterSummary> + '_ {
        self.clusters.iter().map(ClusterSummary::from)
    }

    /// Sum of all cluster counts, equal to the number of accepted points.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.clusters.iter().map(|c| u64::from(c.count)).sum()
    }
}

impl Serialize for ClusterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
