//! Multi-category front end.
//!
//! Routes a stream of `(category, position)` pairs to one [`CategoryGrid`]
//! per category and finalizes them all at once. Categories never interact,
//! so finalization runs across categories in parallel.

use hashbrown::HashMap;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use tracing::{debug, warn};

use crate::category::CategoryGrid;
use crate::config::ClusterConfig;
use crate::error::ConfigResult;
use crate::export::ClusterSet;
use crate::grid::GridPartition;
use crate::region::{Position, WorldRegion};

/// Accepted and discarded point counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Points inside the region.
    pub accepted: u64,
    /// Points outside the region, dropped without effect.
    pub discarded: u64,
}

impl IngestStats {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.accepted + self.discarded
    }
}

#[derive(Debug)]
struct CategoryState {
    grid: CategoryGrid,
    stats: IngestStats,
}

/// Clusters points of many categories over a shared world region.
#[derive(Debug)]
pub struct ClusterEngine {
    partition: GridPartition,
    categories: HashMap<String, CategoryState>,
}

impl ClusterEngine {
    /// Create an engine, validating region and configuration up front.
    pub fn new(region: WorldRegion, config: ClusterConfig) -> ConfigResult<Self> {
        Ok(Self {
            partition: GridPartition::new(region, config)?,
            categories: HashMap::new(),
        })
    }

    #[must_use]
    pub const fn partition(&self) -> &GridPartition {
        &self.partition
    }

    /// Add one point. The category's grid is created on its first point.
    ///
    /// Returns whether the point was inside the region.
    pub fn add(&mut self, category: &str, position: Position) -> bool {
        let partition = self.partition;
        let state = self.categories.entry_ref(category).or_insert_with(|| {
            debug!(
                category,
                columns = partition.columns(),
                rows = partition.rows(),
                "creating category grid"
            );
            CategoryState {
                grid: CategoryGrid::new(partition),
                stats: IngestStats::default(),
            }
        });

        let accepted = state.grid.add_instance(position);
        if accepted {
            state.stats.accepted += 1;
        } else {
            state.stats.discarded += 1;
        }
        accepted
    }

    /// Number of categories seen so far.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Ingest counts for a category, if any point of it was seen.
    #[must_use]
    pub fn stats(&self, category: &str) -> Option<IngestStats> {
        self.categories.get(category).map(|state| state.stats)
    }

    /// Run the merge sweep on every category and collect the results.
    #[must_use]
    pub fn finish(self) -> ClusterReport {
        let mut categories: Vec<CategoryClusters> = self
            .categories
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(category, state)| {
                if state.stats.discarded > 0 {
                    warn!(
                        category = %category,
                        discarded = state.stats.discarded,
                        accepted = state.stats.accepted,
                        "points outside world region were discarded"
                    );
                }
                CategoryClusters {
                    clusters: state.grid.build_clusters(),
                    category,
                    stats: state.stats,
                }
            })
            .collect();

        categories.sort_by(|a, b| a.category.cmp(&b.category));
        ClusterReport { categories }
    }
}

impl<S: AsRef<str>> Extend<(S, Position)> for ClusterEngine {
    fn extend<I: IntoIterator<Item = (S, Position)>>(&mut self, iter: I) {
        for (category, position) in iter {
            self.add(category.as_ref(), position);
        }
    }
}

/// Final clusters and counts of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryClusters {
    pub category: String,
    #[serde(flatten)]
    pub stats: IngestStats,
    pub clusters: ClusterSet,
}

/// Finalized clusters of every category, sorted by category name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ClusterReport {
    categories: Vec<CategoryClusters>,
}

impl ClusterReport {
    #[must_use]
    pub fn categories(&self) -> &[CategoryClusters] {
        &self.categories
    }

    /// Clusters of a single category.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryClusters> {
        self.categories
            .binary_search_by(|entry| entry.category.as_str().cmp(category))
            .ok()
            .map(|index| &self.categories[index])
    }

    /// Total number of clusters across all categories.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.categories.iter().map(|c| c.clusters.len()).sum()
    }
}
