//! Per-category clustering grid.
//!
//! # Lifecycle
//!
//! ```text
//! CategoryGrid::new        every cell allocated, all empty
//!   add_instance × N       first-fit absorption inside the point's cell
//!   build_clusters         one cross-cell merge sweep, grid consumed
//! ClusterSet               read-only result
//! ```
//!
//! `build_clusters` takes the grid by value, so it can only run once and no
//! point can be added after it.

use tracing::debug;

use crate::cell::{Cell, CellId};
use crate::cluster::Cluster;
use crate::export::ClusterSet;
use crate::grid::GridPartition;
use crate::region::Position;

/// Neighbours compared by the merge sweep: right, below, below-right.
///
/// One quadrant of the 3×3 neighbourhood, so each pair of cells is visited
/// from one side only. The anti-diagonal pair (x+1, y-1) is never compared.
const MERGE_NEIGHBOURS: [(u32, u32); 3] = [(1, 0), (0, 1), (1, 1)];

/// Clustering state for a single category.
#[derive(Debug, Clone)]
pub struct CategoryGrid {
    partition: GridPartition,
    cells: Vec<Cell>,
    accepted: u64,
}

impl CategoryGrid {
    /// Create a grid with every cell pre-allocated.
    #[must_use]
    pub fn new(partition: GridPartition) -> Self {
        Self {
            partition,
            cells: vec![Cell::new(); partition.len()],
            accepted: 0,
        }
    }

    #[must_use]
    pub const fn partition(&self) -> &GridPartition {
        &self.partition
    }

    /// Number of points accepted so far.
    #[must_use]
    pub const fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Number of clusters currently held across all cells.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cells.iter().map(Cell::len).sum()
    }

    /// Get a cell by ID.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0 as usize)
    }

    /// Add one point.
    ///
    /// Returns `false` and changes nothing if the point is outside the region.
    ///
    /// Otherwise the point joins the *first* cluster of its cell, in insertion
    /// order, whose box inflated by the merge threshold contains it. This is
    /// first-fit, not nearest-fit: an older, farther cluster wins over a newer,
    /// closer one. If no cluster reaches the point it starts a new one.
    pub fn add_instance(&mut self, position: Position) -> bool {
        let Some(id) = self.partition.cell_at(position) else {
            return false;
        };

        let threshold = self.partition.config().merge_threshold;
        let cell = &mut self.cells[id.0 as usize];

        match cell
            .clusters
            .iter_mut()
            .find(|cluster| cluster.reaches(position, threshold))
        {
            Some(cluster) => cluster.absorb(position),
            None => cell.clusters.push(Cluster::from_point(position)),
        }

        self.accepted += 1;
        true
    }

    /// Run the cross-cell merge sweep once and hand back the final clusters.
    #[must_use]
    pub fn build_clusters(mut self) -> ClusterSet {
        let before = self.cluster_count();
        let merges = self.merge_adjacent();

        debug!(
            columns = self.partition.columns(),
            rows = self.partition.rows(),
            points = self.accepted,
            before,
            merges,
            "merged clusters across cells"
        );

        ClusterSet::new(
            self.cells
                .into_iter()
                .flat_map(|cell| cell.clusters)
                .collect(),
        )
    }

    /// Single, non-iterative merge sweep. Returns the number of merges.
    ///
    /// Cells in the last row or last column are skipped as targets. Within
    /// each target cell, every cluster is tested against every cluster of the
    /// neighbour in list order; the target box grows as it absorbs, and an
    /// absorbed cluster leaves its cell, so it is merged at most once.
    ///
    /// Chains of clusters spanning several cells can stay partly unmerged.
    /// The sweep is deliberately not repeated until nothing changes.
    pub(crate) fn merge_adjacent(&mut self) -> usize {
        let columns = self.partition.columns();
        let rows = self.partition.rows();
        let mut merges = 0;

        for x in 0..columns.saturating_sub(1) {
            for y in 0..rows.saturating_sub(1) {
                let target = self.partition.id(x, y);
                for (dx, dy) in MERGE_NEIGHBOURS {
                    let source = self.partition.id(x + dx, y + dy);
                    merges += self.merge_cells(target, source);
                }
            }
        }

        merges
    }

    fn merge_cells(&mut self, target: CellId, source: CellId) -> usize {
        let threshold = self.partition.config().merge_threshold;
        let mut sources = std::mem::take(&mut self.cells[source.0 as usize].clusters);
        if sources.is_empty() {
            return 0;
        }

        let mut merged = 0;
        for cluster in &mut self.cells[target.0 as usize].clusters {
            sources.retain(|candidate| {
                if cluster.is_close_to(candidate, threshold) {
                    cluster.merge(candidate);
                    merged += 1;
                    false
                } else {
                    true
                }
            });
        }

        self.cells[source.0 as usize].clusters = sources;
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClusterConfig;
    use crate::region::WorldRegion;

    fn grid(size: f32, partition: f32, threshold: f32) -> CategoryGrid {
        let region = WorldRegion::new(0.0, 0.0, size, size).unwrap();
        let config = ClusterConfig::new(partition, threshold).unwrap();
        CategoryGrid::new(GridPartition::new(region, config).unwrap())
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_cells_are_preallocated() {
        let grid = grid(100.0, 25.0, 5.0);
        assert_eq!(grid.partition().len(), 16);
        assert!(grid.cell(CellId(15)).is_some_and(Cell::is_empty));
        assert!(grid.cell(CellId(16)).is_none());
    }

    #[test]
    fn test_out_of_region_point_has_no_effect() {
        let mut grid = grid(100.0, 50.0, 5.0);
        assert!(!grid.add_instance(Position::new(100.0, 10.0)));
        assert!(!grid.add_instance(Position::new(-0.5, 10.0)));
        assert_eq!(grid.accepted(), 0);
        assert_eq!(grid.cluster_count(), 0);
    }

    #[test]
    fn test_first_fit_prefers_older_cluster() {
        let mut grid = grid(100.0, 50.0, 5.0);
        grid.add_instance(Position::new(10.0, 10.0));
        grid.add_instance(Position::new(20.0, 10.0));
        // Within reach of both, closer to the second, joins the first.
        grid.add_instance(Position::new(15.0, 10.0));

        let cell = grid.cell(CellId(0)).unwrap();
        assert_eq!(cell.len(), 2);
        assert_eq!(cell.clusters[0].count, 2);
        assert!(approx(cell.clusters[0].max_x, 15.0));
        assert_eq!(cell.clusters[1].count, 1);
    }

    #[test]
    fn test_within_cell_neighbours_share_cluster_in_any_order() {
        for points in [
            [Position::new(10.0, 10.0), Position::new(13.0, 14.0)],
            [Position::new(13.0, 14.0), Position::new(10.0, 10.0)],
        ] {
            let mut grid = grid(100.0, 50.0, 5.0);
            for point in points {
                assert!(grid.add_instance(point));
            }
            assert_eq!(grid.cluster_count(), 1);
        }
    }

    #[test]
    fn test_worked_example() {
        let mut grid = grid(100.0, 50.0, 5.0);
        for (x, y) in [(10.0, 10.0), (12.0, 11.0), (48.0, 10.0), (52.0, 10.0)] {
            assert!(grid.add_instance(Position::new(x, y)));
        }
        assert_eq!(grid.cluster_count(), 3);

        let set = grid.build_clusters();
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_count(), 4);

        let mut summaries: Vec<_> = set.iter().collect();
        summaries.sort_by(|a, b| a.center_x.total_cmp(&b.center_x));
        assert!(approx(summaries[0].center_x, 11.0));
        assert!(approx(summaries[0].center_y, 10.5));
        assert_eq!(summaries[0].count, 2);
        assert!(approx(summaries[1].center_x, 50.0));
        assert!(approx(summaries[1].center_y, 10.0));
        assert_eq!(summaries[1].count, 2);
    }

    #[test]
    fn test_merges_each_compared_direction() {
        // 3×3 grid of 10-unit cells, so cell (0,0) is a merge target.
        for neighbour in [
            Position::new(12.0, 8.0),
            Position::new(8.0, 12.0),
            Position::new(12.0, 12.0),
        ] {
            let mut grid = grid(30.0, 10.0, 5.0);
            grid.add_instance(Position::new(9.0, 9.0));
            grid.add_instance(neighbour);
            assert_eq!(grid.cluster_count(), 2);

            let set = grid.build_clusters();
            assert_eq!(set.len(), 1, "neighbour {neighbour:?} was not merged");
            assert_eq!(set.total_count(), 2);
        }
    }

    #[test]
    fn test_anti_diagonal_pair_is_not_compared() {
        let mut grid = grid(30.0, 10.0, 5.0);
        grid.add_instance(Position::new(11.0, 9.0));
        grid.add_instance(Position::new(9.0, 11.0));

        assert_eq!(grid.build_clusters().len(), 2);
    }

    #[test]
    fn test_last_column_is_not_a_merge_target() {
        // Cells (1,0) and (1,1) in a 2×2 grid sit in the last column.
        let mut grid = grid(20.0, 10.0, 5.0);
        grid.add_instance(Position::new(15.0, 9.0));
        grid.add_instance(Position::new(15.0, 11.0));

        assert_eq!(grid.build_clusters().len(), 2);
    }

    #[test]
    fn test_chain_can_stay_split() {
        // B joins A first; the grown A is then too wide for C, even though C
        // was within threshold of A alone. B and C are anti-diagonal.
        let mut grid = grid(30.0, 10.0, 5.0);
        grid.add_instance(Position::new(8.0, 8.0));
        grid.add_instance(Position::new(12.0, 7.0));
        grid.add_instance(Position::new(7.0, 12.0));

        assert_eq!(grid.merge_adjacent(), 1);
        assert_eq!(grid.merge_adjacent(), 0);

        let set = grid.build_clusters();
        let mut counts: Vec<_> = set.iter().map(|s| s.count).collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_second_sweep_finds_nothing_after_worked_example() {
        let mut grid = grid(100.0, 50.0, 5.0);
        for (x, y) in [(10.0, 10.0), (12.0, 11.0), (48.0, 10.0), (52.0, 10.0)] {
            grid.add_instance(Position::new(x, y));
        }
        assert_eq!(grid.merge_adjacent(), 1);
        assert_eq!(grid.merge_adjacent(), 0);
    }

    #[test]
    fn test_second_sweep_finds_nothing_on_dense_data() {
        let mut state = 0x9e37_79b9_7f4a_7c15_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 40) as f32 / (1u64 << 24) as f32
        };

        let mut first_sweep = 0;
        for (partition, threshold) in [(10.0, 5.0), (16.0, 4.0), (25.0, 12.5)] {
            for count in [300, 3000] {
                let mut grid = grid(200.0, partition, threshold);
                for _ in 0..count {
                    grid.add_instance(Position::new(next() * 200.0, next() * 200.0));
                }

                let points = grid.accepted();
                first_sweep += grid.merge_adjacent();
                assert_eq!(grid.merge_adjacent(), 0);
                assert_eq!(grid.build_clusters().total_count(), points);
            }
        }
        assert!(first_sweep > 0);
    }

    #[test]
    fn test_source_merged_at_most_once() {
        // Two targets in (0,0) both close to one source in (1,0).
        let mut grid = grid(30.0, 10.0, 3.0);
        grid.add_instance(Position::new(9.0, 2.0));
        grid.add_instance(Position::new(9.0, 6.5));
        grid.add_instance(Position::new(10.0, 4.0));
        assert_eq!(grid.cluster_count(), 3);

        let set = grid.build_clusters();
        assert_eq!(set.total_count(), 3);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_height_does_not_affect_clustering() {
        let mut grid = grid(100.0, 50.0, 5.0);
        grid.add_instance(Position::with_height(10.0, 10.0, 0.0));
        grid.add_instance(Position::with_height(11.0, 10.0, 500.0));
        assert_eq!(grid.cluster_count(), 1);
    }
}
