//! Arguments and logging setup shared by the binaries.

use crate::config::{CliConfig, WarehouseEngine, DEFAULT_CONFIG_PATH};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
pub struct CliArgs {
    /// Path to the TOML file with the CLUSTER, S3 and IAM_ROLE sections.
    #[clap(long, default_value = DEFAULT_CONFIG_PATH, value_parser = parse_path)]
    pub config: PathBuf,

    /// Warehouse engine, overrides ENGINE in the [WAREHOUSE] section.
    #[clap(long)]
    pub engine: Option<WarehouseEngine>,

    /// Path to the SQLite warehouse file, overrides DB_PATH in the [LOCAL] section.
    #[clap(long, value_parser = parse_path)]
    pub sqlite_path: Option<PathBuf>,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        CliConfig {
            config_path: args.config,
            engine: args.engine,
            sqlite_path: args.sqlite_path,
        }
    }
}

/// Install the fmt subscriber, filtered by `LOG_LEVEL` (default `info`).
pub fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}
