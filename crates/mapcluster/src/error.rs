//! Configuration error types.

use thiserror::Error;

/// Errors raised while validating a region or clustering configuration.
///
/// Clustering itself never fails: out-of-region points are dropped, not
/// reported. Everything here is rejected up front, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Partition cells are too small for the merge threshold.
    ///
    /// Cross-cell merging only looks at one neighbouring cell in each
    /// direction, so a cell must span at least two thresholds.
    #[error(
        "partition size {partition_size} is smaller than twice the merge threshold {merge_threshold}"
    )]
    PartitionTooSmall {
        partition_size: f32,
        merge_threshold: f32,
    },

    /// Partition size is zero or negative.
    #[error("partition size must be positive, got {0}")]
    NonPositivePartition(f32),

    /// Merge threshold is negative.
    #[error("merge threshold must not be negative, got {0}")]
    NegativeThreshold(f32),

    /// A configuration or region value is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    /// Region and partition size need more cells than a cell id can address.
    #[error("grid of {columns} x {rows} cells is too large")]
    GridTooLarge { columns: u64, rows: u64 },

    /// The world region has no area.
    #[error("world region is empty: min ({min_x}, {min_y}) max ({max_x}, {max_y})")]
    EmptyRegion {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
