//! Uniform partition grid over a world region.

use crate::cell::CellId;
use crate::config::ClusterConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::region::{Position, WorldRegion};

/// Layout of a uniform grid of square cells covering a [`WorldRegion`].
///
/// The grid only maps positions to cells; it owns no clusters. Cell ids are
/// row-major:
///
/// ```text
///        col 0   col 1   col 2
/// row 0    0       1       2
/// row 1    3       4       5
/// ```
///
/// The last row and column may extend past the region when its size is not
/// a multiple of the cell size. Those overhanging parts never receive points
/// because positions are checked against the region first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPartition {
    region: WorldRegion,
    config: ClusterConfig,
    columns: u32,
    rows: u32,
}

impl GridPartition {
    /// Lay out the grid for a region.
    ///
    /// Fails if `config` does not satisfy `partition_size >= 2 * merge_threshold`,
    /// or if the grid would hold more cells than a [`CellId`] can address.
    pub fn new(region: WorldRegion, config: ClusterConfig) -> ConfigResult<Self> {
        config.validate()?;

        let columns = f64::from((region.width() / config.partition_size).ceil().max(1.0));
        let rows = f64::from((region.height() / config.partition_size).ceil().max(1.0));

        if columns * rows > f64::from(u32::MAX) {
            return Err(ConfigError::GridTooLarge {
                columns: columns as u64,
                rows: rows as u64,
            });
        }

        let columns = columns as u32;
        let rows = rows as u32;

        Ok(Self {
            region,
            config,
            columns,
            rows,
        })
    }

    #[must_use]
    pub const fn region(&self) -> &WorldRegion {
        &self.region
    }

    #[must_use]
    pub const fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Get total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Check if grid is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell id for a column and row. Does not check bounds.
    #[must_use]
    pub const fn id(&self, column: u32, row: u32) -> CellId {
        CellId(row * self.columns + column)
    }

    /// Column and row of a cell id.
    #[must_use]
    pub const fn coords(&self, id: CellId) -> (u32, u32) {
        (id.0 % self.columns, id.0 / self.columns)
    }

    /// Get the cell holding a position, or `None` if it lies outside the region.
    #[must_use]
    pub fn cell_at(&self, position: Position) -> Option<CellId> {
        if !self.region.contains(position) {
            return None;
        }

        // Rounding can push a point just below max onto index `columns`.
        let size = self.config.partition_size;
        let x = ((position.x - self.region.min_x()) / size).floor() as u32;
        let y = ((position.y - self.region.min_y()) / size).floor() as u32;

        Some(self.id(x.min(self.columns - 1), y.min(self.rows - 1)))
    }
}
