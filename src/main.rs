//! Movpress batch video re-encoder
//!
//! Scans a directory for `.mov` files, re-encodes each to HEVC with an
//! external encoder while showing progress parsed from the encoder's
//! status stream, and moves originals to the system trash on success.
//!
//! # Usage
//!
//! ```bash
//! movpress -i /path/to/videos
//! ```

use clap::Parser;
use tracing::{error, info};

use movpress::batch::{BatchRunner, BatchSummary};
use movpress::cli::Cli;
use movpress::error::{MovpressError, MovpressResult};
use movpress::signals::{ActiveProcessSet, SignalCoordinator};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(summary) => {
            info!(
                "Batch complete: {} of {} file(s) converted",
                summary.converted, summary.discovered
            );
            0
        }
        Err(MovpressError::Cancelled) => {
            // Expected exit path; active encoders were already terminated
            info!("Interrupted; remaining files left untouched");
            130
        }
        Err(err) => {
            if let MovpressError::Encode { diagnostics, .. } = &err {
                eprintln!("{}", diagnostics.trim_end());
            }
            let err = anyhow::Error::new(err);
            error!("{:#}", err);
            1
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> MovpressResult<BatchSummary> {
    let processes = ActiveProcessSet::new();
    SignalCoordinator::install(processes.clone())?;

    BatchRunner::new(cli.input).with_processes(processes).run()
}
