//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shipment_tracker::RenderConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub display: RenderConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// JSON dataset to load instead of the bundled demo data.
    /// Relative paths are resolved against the config file's directory.
    pub path: Option<PathBuf>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let (Some(dataset), Some(base)) = (config.dataset.path.as_mut(), path.parent()) {
        if dataset.is_relative() {
            *dataset = base.join(&*dataset);
        }
    }

    Ok(config)
}
