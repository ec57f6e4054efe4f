use anyhow::Result;
use clap::Parser;

use gigadmin_lib::bootstrap;
use gigadmin_lib::cli::Cli;
use gigadmin_lib::commands;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = bootstrap::resolve_config(cli.config.clone())?;
    bootstrap::init_tracing_subscriber(config.log_dir.as_deref(), cli.verbose)?;
    tracing::debug!(api = %config.api_base_url, page_size = config.page_size, "configuration loaded");

    let runtime = bootstrap::wire_dependencies(&config, !cli.no_persist)?;
    commands::run(&runtime, cli.command).await
}
