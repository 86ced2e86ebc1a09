use crate::models::LngLat;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "NAVGENIUS_DATA_DIR";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub data_dir: PathBuf,
    pub destinations_file: String,
    pub full_paths_file: String,
    pub sources_file: String,
    // Basemap style id handed through to the host untouched
    pub map_style: String,
    pub city_center: LngLat,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            destinations_file: "destdf.json".to_string(),
            full_paths_file: "fulldf.json".to_string(),
            sources_file: "srcdf.json".to_string(),
            map_style: "mapbox://styles/mapbox/light-v9".to_string(),
            city_center: [72.8777, 19.0760],
        }
    }
}

impl ViewerConfig {
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        ron::from_str(text).context("Failed to parse viewer config")
    }

    pub fn from_ron_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_ron_str(&text)
    }

    /// Applies `NAVGENIUS_DATA_DIR` if it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        self
    }

    pub fn destinations_path(&self) -> PathBuf {
        self.data_dir.join(&self.destinations_file)
    }

    pub fn full_paths_path(&self) -> PathBuf {
        self.data_dir.join(&self.full_paths_file)
    }

    pub fn sources_path(&self) -> PathBuf {
        self.data_dir.join(&self.sources_file)
    }
}
