//! Cluster a JSON dump of categorized map points.
//!
//! Usage: `mapcluster-cli [INPUT]`. Reads stdin when `INPUT` is absent or `-`.
//! Writes the cluster report as JSON to stdout.
//!
//! Environment:
//! - `PARTITION_SIZE` - partition cell size (default 50)
//! - `MERGE_THRESHOLD` - merge threshold (default 5)
//! - `RUST_LOG` - log filter
//!
//! A `config` object in the input overrides both variables.

mod input;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use eyre::WrapErr;
use mapcluster::ClusterConfig;
use mapcluster::config::{DEFAULT_MERGE_THRESHOLD, DEFAULT_PARTITION_SIZE};
use tracing::info;

use crate::input::PointDump;

fn main() -> eyre::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapcluster=info".parse()?),
        )
        .init();

    let fallback = ClusterConfig {
        partition_size: env_f32("PARTITION_SIZE", DEFAULT_PARTITION_SIZE),
        merge_threshold: env_f32("MERGE_THRESHOLD", DEFAULT_MERGE_THRESHOLD),
    };

    let dump = read_dump(std::env::args().nth(1))?;
    info!(
        points = dump.points.len(),
        partition_size = dump.config.unwrap_or(fallback).partition_size,
        merge_threshold = dump.config.unwrap_or(fallback).merge_threshold,
        "loaded point dump"
    );

    let report = dump.into_engine(fallback)?.finish();
    info!(
        categories = report.categories().len(),
        clusters = report.cluster_count(),
        "clustering finished"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

fn env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn read_dump(path: Option<String>) -> eyre::Result<PointDump> {
    let reader: Box<dyn Read> = match path.as_deref() {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => {
            let path = PathBuf::from(path);
            let file = File::open(&path)
                .wrap_err_with(|| format!("failed to open {}", path.display()))?;
            Box::new(file)
        }
    };

    serde_json::from_reader(BufReader::new(reader)).wrap_err("failed to parse point dump")
}
