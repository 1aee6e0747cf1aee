//! JSON point dump read by the CLI.

use mapcluster::{ClusterConfig, ClusterEngine, Position, WorldRegion};
use serde::Deserialize;

/// One categorized point.
#[derive(Debug, Deserialize)]
pub struct PointRecord {
    pub category: String,
    #[serde(flatten)]
    pub position: Position,
}

/// Top-level input document.
#[derive(Debug, Deserialize)]
pub struct PointDump {
    pub region: WorldRegion,
    /// Overrides the environment configuration when present.
    #[serde(default)]
    pub config: Option<ClusterConfig>,
    pub points: Vec<PointRecord>,
}

impl PointDump {
    /// Build an engine and feed every point into it.
    pub fn into_engine(self, fallback: ClusterConfig) -> eyre::Result<ClusterEngine> {
        let config = self.config.unwrap_or(fallback);
        let mut engine = ClusterEngine::new(self.region, config)?;
        engine.extend(
            self.points
                .into_iter()
                .map(|record| (record.category, record.position)),
        );
        Ok(engine)
    }
}
