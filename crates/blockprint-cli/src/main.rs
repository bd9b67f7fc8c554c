mod args;
mod report;

use std::process::ExitCode;

use blockprint_analysis::{MiningPipeline, Snapshot};
use blockprint_core::config::BlockprintConfig;
use blockprint_core::errors::{BlockprintErrorCode, PipelineError};
use clap::Parser;

use crate::args::Cli;

fn main() -> ExitCode {
    blockprint_core::tracing::init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.coded_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let config_dir = cli.config_dir.clone().unwrap_or_else(|| ".".into());
    let config = BlockprintConfig::load(&config_dir, Some(&cli.overrides()))?;

    let snapshot = Snapshot::from_path(&cli.snapshot)?;
    tracing::debug!(path = %cli.snapshot.display(), records = snapshot.len(), "snapshot loaded");

    let result = MiningPipeline::from_config(&config).mine(&snapshot);
    if cli.summary {
        eprintln!("{}", result.diagnostics);
    }

    let json = report::render(&result, cli.summary)?;
    println!("{json}");
    Ok(())
}
