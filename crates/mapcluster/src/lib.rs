//! Grid-partitioned spatial clustering.
//!
//! Condenses tens of thousands of categorized map points into a handful of
//! groups, each a center and a member count, for tables and map overlays.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  GridPartition   region split into square cells of size P   │
//! │  CategoryGrid    per cell, first-fit absorption of points   │
//! │                  into boxes within threshold T              │
//! │  build_clusters  one sweep merging boxes across each cell's │
//! │                  right, lower and lower-right neighbours    │
//! │  ClusterSet      read-only (center, count) summaries        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cells must be at least `2 * T` wide, otherwise a cross-cell pair could
//! be separated by a whole cell and silently missed. [`ClusterConfig`]
//! rejects such configurations.
//!
//! The result is a cheap, deterministic heuristic for a fixed insertion
//! order. It is not an optimal clustering and the merge sweep is not
//! repeated to a fixed point.
//!
//! # Example
//!
//! ```
//! use mapcluster::{ClusterConfig, ClusterEngine, Position, WorldRegion};
//!
//! let region = WorldRegion::new(0.0, 0.0, 100.0, 100.0)?;
//! let mut engine = ClusterEngine::new(region, ClusterConfig::new(50.0, 5.0)?)?;
//!
//! for (x, y) in [(10.0, 10.0), (12.0, 11.0), (48.0, 10.0), (52.0, 10.0)] {
//!     engine.add("Test", Position::new(x, y));
//! }
//!
//! let report = engine.finish();
//! let test = report.get("Test").unwrap();
//! assert_eq!(test.clusters.len(), 2);
//! assert_eq!(test.clusters.total_count(), 4);
//! # Ok::<(), mapcluster::ConfigError>(())
//! ```

pub mod category;
pub mod cell;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod grid;
pub mod region;

pub use category::CategoryGrid;
pub use cell::{Cell, CellId};
pub use cluster::Cluster;
pub use config::ClusterConfig;
pub use engine::{CategoryClusters, ClusterEngine, ClusterReport, IngestStats};
pub use error::{ConfigError, ConfigResult};
pub use export::{ClusterSet, ClusterSummary};
pub use grid::GridPartition;
pub use region::{Position, WorldRegion};
