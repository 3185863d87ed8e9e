//! Box51 CLI binary.
//!
//! Prints each command's result as pretty JSON on stdout; logs go to stderr.

use box51::cli::{Cli, execute, load_config};
use box51::{AssetStore, LoggingConfig, init_logging};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(
        &LoggingConfig::default()
            .with_verbose(cli.verbose)
            .with_json_logs(cli.json_logs),
    )?;

    let config = load_config(cli.config.as_deref(), cli.asset_root.as_deref())?;
    let store = AssetStore::new(config)?;

    let output = execute(&store, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
