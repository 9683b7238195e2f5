use anyhow::{Context, Result};
use clap::Parser;
use sparkify_warehouse::cli::{init_logging, CliArgs};
use sparkify_warehouse::{open_warehouse, pipeline, AppConfig, CliConfig, QueryCatalog};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli: CliConfig = CliArgs::parse().into();
    init_logging()?;

    let config = AppConfig::load(&cli)
        .with_context(|| format!("Failed to load config from {:?}", cli.config_path))?;
    let catalog = QueryCatalog::build(&config);

    let mut warehouse = open_warehouse(&config).await?;
    pipeline::run_etl(warehouse.as_mut(), &catalog).await?;

    for (table, count) in pipeline::table_row_counts(warehouse.as_mut()).await? {
        info!("{}: {} rows", table, count);
    }
    Ok(())
}
