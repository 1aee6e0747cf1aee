//! Clustering parameters.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default partition cell size, in world units.
pub const DEFAULT_PARTITION_SIZE: f32 = 50.0;

/// Default merge threshold, in world units.
pub const DEFAULT_MERGE_THRESHOLD: f32 = 5.0;

/// Partition cell size and merge threshold.
///
/// Values built with [`ClusterConfig::new`] are always valid. Deserialized
/// values must be checked with [`ClusterConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Side length of a square partition cell (P).
    pub partition_size: f32,
    /// Maximum gap for two points or boxes to count as one group (T).
    pub merge_threshold: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            partition_size: DEFAULT_PARTITION_SIZE,
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
        }
    }
}

impl ClusterConfig {
    /// Create a validated configuration.
    pub fn new(partition_size: f32, merge_threshold: f32) -> ConfigResult<Self> {
        let config = Self {
            partition_size,
            merge_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that `partition_size >= 2 * merge_threshold` and both values are sane.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.partition_size.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "partition_size",
            });
        }
        if !self.merge_threshold.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "merge_threshold",
            });
        }
        if self.partition_size <= 0.0 {
            return Err(ConfigError::NonPositivePartition(self.partition_size));
        }
        if self.merge_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold(self.merge_threshold));
        }
        if self.partition_size < 2.0 * self.merge_threshold {
            return Err(ConfigError::PartitionTooSmall {
                partition_size: self.partition_size,
                merge_threshold: self.merge_threshold,
            });
        }
        Ok(())
    }
}
