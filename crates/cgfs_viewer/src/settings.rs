//! Render settings, optionally loaded from a JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use cgfs_rasterizer::RasterConfig;
use cgfs_raytracer::TraceConfig;
use serde::{Deserialize, Serialize};

/// Everything a chapter needs besides its scene.
///
/// Every field is optional in the JSON file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Trace with rayon buckets instead of a single thread
    pub parallel: bool,
    pub trace: TraceConfig,
    pub raster: RasterConfig,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            parallel: false,
            trace: TraceConfig::default(),
            raster: RasterConfig::default(),
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }
}
