mod cli;

use crate::cli::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use jsonload::ConnectionConfig;
use jsonload::pipeline;
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let job = cli.job()?;

    if cli.dry_run {
        let prepared = pipeline::prepare(&job).await?;
        println!("{}", prepared.statement);
        println!(
            "-- {} records, {} bound values",
            prepared.batch.record_count(),
            prepared.batch.values().len()
        );
        return Ok(());
    }

    let config = ConnectionConfig::from_env().context("Error loading database configuration")?;
    jsonload::load(&config, &job).await?;

    println!("Data inserted successfully.");
    Ok(())
}
