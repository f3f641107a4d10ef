use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Dashboard of NYC bike counter ridership.
#[derive(Debug, Parser)]
#[command(name = "bike-counts", version, about)]
pub struct Args {
    /// Directory holding the pre-aggregated tables.
    #[arg(env = "BIKE_COUNTS_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Optional JSON file with dashboard settings.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

/// Settings read from the optional JSON config file. Missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Counter names selected when a dataset is first loaded.
    pub default_counters: Vec<String>,
    /// Map marker radius per rider.
    pub marker_scale: f64,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_counters: vec![
                "Brooklyn Br".to_string(),
                "Manhattan Br".to_string(),
                "Williamsburg Br".to_string(),
            ],
            marker_scale: 0.005,
            window_size: [1400.0, 900.0],
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
