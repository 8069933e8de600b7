use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub data_dir: Option<String>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,

    pub sdvx: Option<SdvxFilesConfig>,
    pub legacy: Option<LegacyFilesConfig>,
}

/// File names inside `data_dir` for the SDVX database and its aliases.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SdvxFilesConfig {
    pub db_file: Option<String>,
    pub aliases_file: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LegacyFilesConfig {
    pub music_file: Option<String>,
    pub nick_file: Option<String>,
    pub nick_max_results: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
