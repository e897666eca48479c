use anyhow::Result;
use clap::Parser;
use std::{io, process};
use tracing::debug;

mod cli;
mod error;
mod extremes;
mod records;

use cli::Args;
use extremes::{aggregate, write_summary_file};
use records::read_csv;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    if let Err(error) = run(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = cli::resolve(args, io::stdin().lock(), io::stdout())?;
    debug!(?config, "resolved run configuration");

    let records = read_csv(&config.input)?;
    let aggregation = aggregate(&records, config.sort);
    debug!(
        scanned = aggregation.records.len(),
        states = aggregation.extremes.len(),
        "writing summary"
    );
    write_summary_file(&aggregation.extremes, &config.output)?;

    println!("Summary written to {}", config.output.display());
    Ok(())
}
