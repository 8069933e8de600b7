mod file_config;

pub use file_config::{FileConfig, LegacyFilesConfig, SdvxFilesConfig};

use crate::legacy::DEFAULT_MAX_RESULTS;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_SDVX_DB_FILE: &str = "music_db.xml";
pub const DEFAULT_SDVX_ALIASES_FILE: &str = "aliases.json";
pub const DEFAULT_LEGACY_MUSIC_FILE: &str = "music_data.json";
pub const DEFAULT_LEGACY_NICK_FILE: &str = "music_nick.json";

/// CLI arguments that can be used for config resolution.
/// TOML values take precedence over these.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,

    pub sdvx: SdvxFiles,
    pub legacy: LegacyFiles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdvxFiles {
    pub db_file: String,
    pub aliases_file: String,
}

impl Default for SdvxFiles {
    fn default() -> Self {
        Self {
            db_file: DEFAULT_SDVX_DB_FILE.to_string(),
            aliases_file: DEFAULT_SDVX_ALIASES_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFiles {
    pub music_file: String,
    pub nick_file: String,
    pub nick_max_results: usize,
}

impl Default for LegacyFiles {
    fn default() -> Self {
        Self {
            music_file: DEFAULT_LEGACY_MUSIC_FILE.to_string(),
            nick_file: DEFAULT_LEGACY_NICK_FILE.to_string(),
            nick_max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("data_dir must be specified via --data-dir or in config file")
            })?;

        if !data_dir.exists() {
            bail!("Data directory does not exist: {:?}", data_dir);
        }
        if !data_dir.is_dir() {
            bail!("data_dir is not a directory: {:?}", data_dir);
        }

        let address = file.address.unwrap_or_else(|| cli.address.clone());
        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let sdvx_file = file.sdvx.unwrap_or_default();
        let sdvx_defaults = SdvxFiles::default();
        let sdvx = SdvxFiles {
            db_file: sdvx_file.db_file.unwrap_or(sdvx_defaults.db_file),
            aliases_file: sdvx_file.aliases_file.unwrap_or(sdvx_defaults.aliases_file),
        };

        let legacy_file = file.legacy.unwrap_or_default();
        let legacy_defaults = LegacyFiles::default();
        let legacy = LegacyFiles {
            music_file: legacy_file.music_file.unwrap_or(legacy_defaults.music_file),
            nick_file: legacy_file.nick_file.unwrap_or(legacy_defaults.nick_file),
            nick_max_results: legacy_file
                .nick_max_results
                .unwrap_or(legacy_defaults.nick_max_results),
        };

        Ok(Self {
            data_dir,
            address,
            port,
            logging_level,
            sdvx,
            legacy,
        })
    }

    pub fn sdvx_db_path(&self) -> PathBuf {
        self.data_dir.join(&self.sdvx.db_file)
    }

    pub fn sdvx_aliases_path(&self) -> PathBuf {
        self.data_dir.join(&self.sdvx.aliases_file)
    }

    pub fn legacy_music_path(&self) -> PathBuf {
        self.data_dir.join(&self.legacy.music_file)
    }

    pub fn legacy_nick_path(&self) -> PathBuf {
        self.data_dir.join(&self.legacy.nick_file)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
