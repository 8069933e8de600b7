use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sdvx_finder::config::{AppConfig, CliConfig, FileConfig};
use sdvx_finder::{run_server, LegacyLibrary, RequestsLoggingLevel, SdvxManager, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the music database, aliases and nick files.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Optional TOML config. Its values take precedence over flags.
    #[clap(short, long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    #[clap(long, default_value = "127.0.0.1")]
    pub address: String,

    #[clap(short, long, default_value_t = 9999)]
    pub port: u16,

    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config = CliConfig {
        data_dir: cli_args.data_dir,
        address: cli_args.address,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Loading legacy music database from {:?}...", config.data_dir);
    let legacy = LegacyLibrary::load(config.legacy_music_path(), config.legacy_nick_path())?;

    info!("Loading SDVX music database {:?}...", config.sdvx_db_path());
    let sdvx = SdvxManager::load(config.sdvx_db_path(), config.sdvx_aliases_path())
        .context("Failed to load SDVX data")?;

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        address: config.address,
        port: config.port,
        nick_max_results: config.legacy.nick_max_results,
    };

    info!("Ready to serve at port {}!", server_config.port);
    run_server(server_config, sdvx, legacy).await
}
