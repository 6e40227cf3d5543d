//! logstore CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};

use logstore::cli::args::LogStoreArgs;
use logstore::cli::commands::execute_command;

fn main() {
    // Parse command line arguments using clap
    let args = LogStoreArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: &LogStoreArgs) -> anyhow::Result<()> {
    let summary = execute_command(args).context("session failed")?;
    if !summary.ended {
        info!("input ended without END");
    }
    info!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
